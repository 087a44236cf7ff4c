//! The one-time fixed build of the slipnet:
//! platonic nodes for letters A-Z, numbers 1-5, facet/bond/group/direction/
//! object-category/relation nodes, and the links between them. Exact
//! conceptual depths and intrinsic link lengths follow the canonical
//! Copycat topology (Mitchell/Hofstadter); the node *shape* (which links
//! exist, which nodes get codelet templates) is grounded on the prose in
//! and on the attribute set `slipnode.py` expects every node to
//! carry.

use crate::codelets::CodeletKind;
use crate::slipnet::node::{LinkKind, Slipnode};
use crate::slipnet::{SlipId, Slipnet};

struct Builder {
    net: Slipnet,
}

impl Builder {
    fn add(&mut self, name: &'static str, depth: i32) -> SlipId {
        self.net.add_node(Slipnode::new(name, depth))
    }

    fn add_linked(&mut self, name: &'static str, depth: i32, link_length: i32) -> SlipId {
        self.net.add_node(Slipnode::new(name, depth).with_link_length(link_length))
    }

    fn link(&mut self, kind: LinkKind, from: SlipId, to: SlipId, length: i32) {
        self.net.add_link(from, to, kind, length, None);
    }

    /// category + inverse instance link pair: an instance node points at its
    /// category node, and the category node points back.
    fn category(&mut self, instance: SlipId, category: SlipId, length: i32) {
        self.link(LinkKind::Category, instance, category, length);
        self.link(LinkKind::Instance, category, instance, length);
    }

    fn property(&mut self, object: SlipId, property: SlipId, length: i32) {
        self.link(LinkKind::HasProperty, object, property, length);
    }

    fn slip(&mut self, a: SlipId, b: SlipId, length: i32) {
        self.link(LinkKind::LateralSlip, a, b, length);
        self.link(LinkKind::LateralSlip, b, a, length);
    }

    fn nonslip(&mut self, a: SlipId, b: SlipId, length: i32) {
        self.link(LinkKind::LateralNonslip, a, b, length);
        self.link(LinkKind::LateralNonslip, b, a, length);
    }
}

/// everything the rest of the crate needs to find a platonic node by
/// meaning rather than by re-deriving names every call site.
#[derive(Debug, Clone, Copy)]
pub struct Platonic {
    pub letters: [SlipId; 26],
    pub numbers: [SlipId; 5],
    pub letter_category: SlipId,
    pub length: SlipId,
    pub string_position_category: SlipId,
    pub alphabetic_position_category: SlipId,
    pub leftmost: SlipId,
    pub rightmost: SlipId,
    pub middle: SlipId,
    pub whole: SlipId,
    pub first: SlipId,
    pub last: SlipId,
    pub predecessor: SlipId,
    pub successor: SlipId,
    pub sameness: SlipId,
    pub bond_category: SlipId,
    pub predecessor_group: SlipId,
    pub successor_group: SlipId,
    pub sameness_group: SlipId,
    pub group_category: SlipId,
    pub direction_category: SlipId,
    pub left: SlipId,
    pub right: SlipId,
    pub object_category: SlipId,
    pub letter_object_category: SlipId,
    pub group_object_category: SlipId,
    pub identity: SlipId,
    pub opposite: SlipId,
    pub bond_facet: SlipId,
}

/// the fixed build described in ; returns the populated net and a
/// lookup table of platonic node ids.
pub fn build() -> (Slipnet, Platonic) {
    let mut b = Builder { net: Slipnet::new() };

    let letters: [SlipId; 26] = std::array::from_fn(|i| {
        let name: &'static str = LETTER_NAMES[i];
        b.add_linked(name, 10, 97)
    });
    for pair in letters.windows(2) {
        b.nonslip(pair[0], pair[1], 60);
    }

    let numbers: [SlipId; 5] = std::array::from_fn(|i| {
        let name: &'static str = NUMBER_NAMES[i];
        b.add_linked(name, 30, 100)
    });
    for pair in numbers.windows(2) {
        b.nonslip(pair[0], pair[1], 60);
    }

    let letter_category = b.add_linked("letter-category", 30, 97);
    let length = b.add_linked("length", 60, 100);
    let string_position_category = b.add_linked("string-position-category", 70, 90);
    let alphabetic_position_category = b.add_linked("alphabetic-position-category", 80, 90);

    for &l in &letters {
        b.category(l, letter_category, 97);
    }
    for &n in &numbers {
        b.category(n, length, 100);
    }

    let leftmost = b.add_linked("leftmost", 40, 90);
    let rightmost = b.add_linked("rightmost", 40, 90);
    let middle = b.add_linked("middle", 40, 90);
    let whole = b.add_linked("whole", 40, 90);
    let first = b.add_linked("first", 60, 90);
    let last = b.add_linked("last", 60, 90);
    for &n in &[leftmost, rightmost, middle, whole, first, last] {
        b.category(n, string_position_category, 90);
    }
    b.slip(leftmost, rightmost, 90);
    b.slip(first, last, 90);
    b.nonslip(leftmost, middle, 90);
    b.nonslip(rightmost, middle, 90);

    let predecessor = b.add_linked("predecessor", 50, 50);
    let successor = b.add_linked("successor", 50, 50);
    let sameness = b.add_linked("sameness", 80, 40);
    let bond_category = b.add_linked("bond-category", 80, 100);
    for &n in &[predecessor, successor, sameness] {
        b.category(n, bond_category, 100);
    }
    b.slip(predecessor, successor, 80);
    b.nonslip(predecessor, sameness, 80);
    b.nonslip(successor, sameness, 80);
    // predecessor/successor are asymmetric (`abc -> abd` is not `abd -> abc`);
    // sameness is not.
    b.net.node_mut(predecessor).directed = true;
    b.net.node_mut(successor).directed = true;

    let predecessor_group = b.add_linked("predecessor-group", 50, 50);
    let successor_group = b.add_linked("successor-group", 50, 50);
    let sameness_group = b.add_linked("sameness-group", 80, 40);
    let group_category = b.add_linked("group-category", 80, 100);
    for &n in &[predecessor_group, successor_group, sameness_group] {
        b.category(n, group_category, 100);
    }
    b.slip(predecessor_group, successor_group, 80);
    b.nonslip(predecessor_group, sameness_group, 80);
    b.nonslip(successor_group, sameness_group, 80);
    b.link(LinkKind::HasProperty, predecessor_group, predecessor, 0);
    b.link(LinkKind::HasProperty, successor_group, successor, 0);
    b.link(LinkKind::HasProperty, sameness_group, sameness, 0);

    let direction_category = b.add_linked("direction-category", 70, 100);
    let left = b.add_linked("left", 40, 100);
    let right = b.add_linked("right", 40, 100);
    b.category(left, direction_category, 100);
    b.category(right, direction_category, 100);
    b.slip(left, right, 100);

    let object_category = b.add_linked("object-category", 90, 100);
    let letter_object_category = b.add_linked("letter", 20, 100);
    let group_object_category = b.add_linked("group", 60, 100);
    b.category(letter_object_category, object_category, 100);
    b.category(group_object_category, object_category, 100);

    let identity = b.add_linked("identity", 90, 0);
    let opposite = b.add_linked("opposite", 90, 100);
    b.slip(identity, opposite, 100);

    let bond_facet = b.add("bond-facet", 80);
    b.property(letter_category, bond_facet, 0);
    b.property(length, bond_facet, 0);

    // top-down codelet templates: an active category posts scouts tuned to
    // itself.
    b.net.node_mut(predecessor).codelets.push(crate::slipnet::node::CodeletTemplate {
        kind: CodeletKind::BondTopDownCategoryScout { category: predecessor },
        base_urgency: 50.0,
    });
    b.net.node_mut(successor).codelets.push(crate::slipnet::node::CodeletTemplate {
        kind: CodeletKind::BondTopDownCategoryScout { category: successor },
        base_urgency: 50.0,
    });
    b.net.node_mut(sameness).codelets.push(crate::slipnet::node::CodeletTemplate {
        kind: CodeletKind::BondTopDownCategoryScout { category: sameness },
        base_urgency: 50.0,
    });
    b.net.node_mut(left).codelets.push(crate::slipnet::node::CodeletTemplate {
        kind: CodeletKind::BondTopDownDirectionScout { direction: left },
        base_urgency: 40.0,
    });
    b.net.node_mut(right).codelets.push(crate::slipnet::node::CodeletTemplate {
        kind: CodeletKind::BondTopDownDirectionScout { direction: right },
        base_urgency: 40.0,
    });
    b.net.node_mut(predecessor_group).codelets.push(crate::slipnet::node::CodeletTemplate {
        kind: CodeletKind::GroupTopDownCategoryScout { category: predecessor_group },
        base_urgency: 50.0,
    });
    b.net.node_mut(successor_group).codelets.push(crate::slipnet::node::CodeletTemplate {
        kind: CodeletKind::GroupTopDownCategoryScout { category: successor_group },
        base_urgency: 50.0,
    });
    b.net.node_mut(sameness_group).codelets.push(crate::slipnet::node::CodeletTemplate {
        kind: CodeletKind::GroupTopDownCategoryScout { category: sameness_group },
        base_urgency: 50.0,
    });
    b.net.node_mut(length).codelets.push(crate::slipnet::node::CodeletTemplate {
        kind: CodeletKind::SingleLetterGroupScout,
        base_urgency: 30.0,
    });

    let platonic = Platonic {
        letters,
        numbers,
        letter_category,
        length,
        string_position_category,
        alphabetic_position_category,
        leftmost,
        rightmost,
        middle,
        whole,
        first,
        last,
        predecessor,
        successor,
        sameness,
        bond_category,
        predecessor_group,
        successor_group,
        sameness_group,
        group_category,
        direction_category,
        left,
        right,
        object_category,
        letter_object_category,
        group_object_category,
        identity,
        opposite,
        bond_facet,
    };
    (b.net, platonic)
}

const LETTER_NAMES: [&str; 26] = [
    "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o", "p", "q", "r", "s",
    "t", "u", "v", "w", "x", "y", "z",
];
const NUMBER_NAMES: [&str; 5] = ["one", "two", "three", "four", "five"];
