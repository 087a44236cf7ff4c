//! The fixed-topology spreading-activation semantic network.
//! Uses `petgraph::DiGraph` since the slipnet is a fixed directed graph
//! interrogated by index far more often than it is mutated.

mod node;
mod topology;

pub use node::{CodeletTemplate, Link, LinkKind, Slipnode};
pub use topology::Platonic;

use crate::random::Stream;
use crate::{random, Activation};
use petgraph::graph::DiGraph;
use petgraph::visit::EdgeRef;
use petgraph::Direction;

pub type SlipId = petgraph::graph::NodeIndex;

pub struct Slipnet {
    graph: DiGraph<Slipnode, Link>,
}

impl Slipnet {
    fn new() -> Self {
        Self { graph: DiGraph::new() }
    }

    /// build the canonical fixed topology.
    pub fn build() -> (Self, Platonic) {
        topology::build()
    }

    fn add_node(&mut self, node: Slipnode) -> SlipId {
        self.graph.add_node(node)
    }

    fn add_link(&mut self, from: SlipId, to: SlipId, kind: LinkKind, length: Activation, label: Option<SlipId>) {
        let link = match label {
            Some(label) => Link::labeled(kind, label, length),
            None => Link::new(kind, length),
        };
        self.graph.add_edge(from, to, link);
    }

    pub fn node(&self, id: SlipId) -> &Slipnode {
        &self.graph[id]
    }

    /// every node id in the fixed topology, for top-down codelet posting.
    pub fn node_ids(&self) -> impl Iterator<Item = SlipId> + '_ {
        self.graph.node_indices()
    }

    fn node_mut(&mut self, id: SlipId) -> &mut Slipnode {
        &mut self.graph[id]
    }

    pub fn activation(&self, id: SlipId) -> Activation {
        self.graph[id].activation
    }

    pub fn is_active(&self, id: SlipId) -> bool {
        self.graph[id].is_active()
    }

    /// clamp a node's activation at 100 for the remainder of the clamp
    /// period.
    pub fn clamp(&mut self, id: SlipId) {
        let node = self.node_mut(id);
        node.clamp = true;
        node.activation = 100;
    }

    pub fn unclamp(&mut self, id: SlipId) {
        self.node_mut(id).clamp = false;
    }

    /// clamp every node whose `initially_clamped` flag is set; called once
    /// at run start and again whenever temperature's clamp period resets.
    pub fn clamp_initial_nodes(&mut self) {
        let ids: Vec<SlipId> = self.graph.node_indices().collect();
        for id in ids {
            if self.node(id).initially_clamped {
                self.clamp(id);
            }
        }
    }

    pub fn unclamp_all(&mut self) {
        let ids: Vec<SlipId> = self.graph.node_indices().collect();
        for id in ids {
            self.unclamp(id);
        }
    }

    /// nudge a node's activation buffer; codelets and workspace operations
    /// use this directly rather than mutating `activation`.
    pub fn nudge(&mut self, id: SlipId, amount: Activation) {
        self.node_mut(id).activation_buffer += amount;
    }

    pub fn apply_slippages(&self, id: SlipId, slippages: &[(SlipId, SlipId)]) -> SlipId {
        for &(from, to) in slippages {
            if from == id {
                return to;
            }
        }
        id
    }

    /// `get_bond_category(a, b)`: the bond category node linking descriptor
    /// `a` to descriptor `b` via a category link whose label matches that
    /// category, else `None`.
    pub fn get_bond_category(&self, a: SlipId, b: SlipId) -> Option<SlipId> {
        // bond category is derived from the descriptors' shared category,
        // not a direct edge between the descriptors themselves: if `a` and
        // `b` are literally equal, the bond is `sameness`; otherwise walk
        // each descriptor's category and see if one is laterally linked to
        // the other by a slip/nonslip edge whose endpoints are both in the
        // same category (predecessor/successor).
        if a == b {
            return self.category_bond(a, b, true);
        }
        self.category_bond(a, b, false)
    }

    /// the node `id` is linked to by a Category edge, if any (:
    /// "category (is-a)"). Used both to resolve bond categories and by
    /// top-down description scouts to infer a descriptor's description type.
    pub fn category_of(&self, id: SlipId) -> Option<SlipId> {
        self.graph.edges_directed(id, Direction::Outgoing).find(|e| e.weight().kind == LinkKind::Category).map(|e| e.target())
    }

    fn category_bond(&self, a: SlipId, b: SlipId, same: bool) -> Option<SlipId> {
        let category_of = |id: SlipId| self.category_of(id);
        let bond_categories: Vec<SlipId> = self
            .graph
            .node_indices()
            .filter(|&n| self.node(n).name == "predecessor" || self.node(n).name == "successor" || self.node(n).name == "sameness")
            .collect();
        if same {
            return bond_categories.into_iter().find(|&n| self.node(n).name == "sameness");
        }
        let (ca, cb) = (category_of(a), category_of(b));
        if ca.is_none() || cb.is_none() || ca != cb {
            return None;
        }
        // within the shared category, `a` precedes `b` (successor) or
        // follows it (predecessor) according to the category's own
        // nonslip chain (letters A..Z, numbers 1..5).
        if self.nonslip_follows(a, b) {
            bond_categories.into_iter().find(|&n| self.node(n).name == "successor")
        } else if self.nonslip_follows(b, a) {
            bond_categories.into_iter().find(|&n| self.node(n).name == "predecessor")
        } else {
            None
        }
    }

    /// true if `b` is the immediate nonslip-chain successor of `a` (used to
    /// detect predecessor/successor letter and number bonds).
    fn nonslip_follows(&self, a: SlipId, b: SlipId) -> bool {
        self.graph.edges_directed(a, Direction::Outgoing).any(|e| e.weight().kind == LinkKind::LateralNonslip && e.target() == b)
    }

    /// `get_related_node(x, relation)`: the node `y` such that `x
    /// -[relation]-> y`, e.g. `get_related_node(predecessor_group,
    /// bond_category) == predecessor`.
    pub fn get_related_node(&self, x: SlipId, relation: SlipId) -> Option<SlipId> {
        let relation_name = self.node(relation).name;
        if relation_name == "opposite" {
            return self.graph.edges_directed(x, Direction::Outgoing).find(|e| e.weight().kind == LinkKind::LateralSlip).map(|e| e.target());
        }
        self.graph.edges_directed(x, Direction::Outgoing).find(|e| e.weight().kind == LinkKind::HasProperty).map(|e| e.target())
    }

    /// `degree_of_association(node)`.
    pub fn degree_of_association(&self, id: SlipId) -> Activation {
        self.node(id).degree_of_association()
    }

    pub fn bond_degree_of_association(&self, id: SlipId) -> Activation {
        self.node(id).bond_degree_of_association()
    }

    /// sum of every node's activation -- used by the "conservation under
    /// pure decay" testable property.
    pub fn total_activation(&self) -> i64 {
        self.graph.node_weights().map(|n| n.activation as i64).sum()
    }

    /// one spreading-activation tick.
    pub fn update(&mut self, rng: &mut Stream) {
        let ids: Vec<SlipId> = self.graph.node_indices().collect();

        // step 1: push from active nodes along outgoing links whose label
        // (if any) is itself active enough to carry the push.
        for &id in &ids {
            if !self.node(id).is_active() {
                continue;
            }
            let source_activation = self.node(id).activation;
            let edges: Vec<(SlipId, Activation)> =
                self.graph.edges_directed(id, Direction::Outgoing).map(|e| (e.target(), e.weight().length)).collect();
            for (target, length) in edges {
                let intrinsic = 100 - length;
                if intrinsic <= 0 {
                    continue;
                }
                let amount = (source_activation as f64 * intrinsic as f64 / 100.0).round() as Activation;
                self.nudge(target, amount);
            }
        }

        // step 2: decay.
        for &id in &ids {
            self.node_mut(id).decay();
        }

        // step 3: commit buffers, clamped to [0, 100].
        for &id in &ids {
            let node = self.node_mut(id);
            let committed = node.activation + node.activation_buffer;
            node.activation = committed.clamp(0, 100);
            node.activation_buffer = 0;
        }

        // step 4: clamped nodes snap back to 100.
        for &id in &ids {
            let node = self.node_mut(id);
            if node.clamp {
                node.activation = 100;
            }
        }

        // step 5: probabilistic jump to full activation past the midpoint,
        // more likely for conceptually shallow nodes.
        for &id in &ids {
            let (activation, depth, clamp) = {
                let node = self.node(id);
                (node.activation, node.conceptual_depth, node.clamp)
            };
            if clamp || activation <= 50 || activation >= 100 {
                continue;
            }
            let probability = ((activation as f64 / 100.0).powf((100 - depth) as f64 / 100.0 + 0.5)).min(1.0);
            if random::flip_coin(rng, probability) {
                self.node_mut(id).activation = 100;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activation_stays_in_bounds_after_many_updates() {
        let (mut net, platonic) = Slipnet::build();
        net.clamp_initial_nodes();
        net.nudge(platonic.successor, 80);
        let mut rng = crate::random::stream(Some(3));
        for _ in 0..50 {
            net.update(&mut rng);
            for id in net.node_ids() {
                assert!((0..=100).contains(&net.activation(id)));
            }
        }
    }

    #[test]
    fn clamped_node_always_reads_100() {
        let (mut net, platonic) = Slipnet::build();
        net.clamp(platonic.letter_category);
        let mut rng = crate::random::stream(Some(1));
        net.update(&mut rng);
        assert_eq!(net.activation(platonic.letter_category), 100);
    }

    /// "Slipnet conservation under pure decay": with nothing
    /// clamped and no node saturated, only decay can act on a tick, so
    /// total activation is non-increasing.
    #[test]
    fn pure_decay_never_increases_total_activation() {
        let (mut net, platonic) = Slipnet::build();
        net.nudge(platonic.successor, 30);
        let mut rng = crate::random::stream(Some(9));
        let mut previous = net.total_activation();
        for _ in 0..20 {
            net.update(&mut rng);
            let total = net.total_activation();
            assert!(total <= previous, "total {total} rose above previous {previous}");
            previous = total;
        }
    }
}
