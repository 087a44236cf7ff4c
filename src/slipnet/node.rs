//! A single node of the slipnet and the labeled links between
//! them. Mirrors `Slipnode` in
//! `original_source/copycat-ajhager/copycat/slipnet/slipnode.py`, translated
//! from Python's duck-typed attribute bag into explicit fields and an enum
//! for link kind.

use crate::codelets::CodeletKind;
use crate::Activation;

/// the five outgoing link kinds plus the incoming-link bookkeeping list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    Category,
    Instance,
    HasProperty,
    LateralSlip,
    LateralNonslip,
}

/// an edge in the slipnet graph. `label` is itself a slipnode (e.g. the
/// `predecessor` node labels the link from `successor-group` to
/// `predecessor-group`); `length` is the link's intrinsic length in [0,100],
/// used directly by spreading activation.
#[derive(Debug, Clone, Copy)]
pub struct Link {
    pub kind: LinkKind,
    pub label: Option<petgraph::graph::NodeIndex>,
    pub length: Activation,
}

impl Link {
    pub fn new(kind: LinkKind, length: Activation) -> Self {
        Self { kind, label: None, length }
    }

    pub fn labeled(kind: LinkKind, label: petgraph::graph::NodeIndex, length: Activation) -> Self {
        Self { kind, label: Some(label), length }
    }
}

/// a codelet template attached to a node: when the node is active, the main
/// loop posts codelets of `kind` with urgency proportional to `base_urgency`
/// and the node's current activation.
#[derive(Debug, Clone)]
pub struct CodeletTemplate {
    pub kind: CodeletKind,
    pub base_urgency: f64,
}

/// node data stored at each `NodeIndex` of the slipnet graph.
#[derive(Debug, Clone)]
pub struct Slipnode {
    pub name: &'static str,
    pub conceptual_depth: Activation,
    pub initially_clamped: bool,
    pub directed: bool,
    pub intrinsic_link_length: Activation,
    pub shrunk_link_length: Activation,
    pub activation: Activation,
    pub activation_buffer: Activation,
    pub clamp: bool,
    pub codelets: Vec<CodeletTemplate>,
}

impl Slipnode {
    pub fn new(name: &'static str, conceptual_depth: Activation) -> Self {
        Self {
            name,
            conceptual_depth,
            initially_clamped: false,
            directed: false,
            intrinsic_link_length: 0,
            shrunk_link_length: 0,
            activation: 0,
            activation_buffer: 0,
            clamp: false,
            codelets: Vec::new(),
        }
    }

    pub fn with_link_length(mut self, intrinsic_link_length: Activation) -> Self {
        self.intrinsic_link_length = intrinsic_link_length;
        self.shrunk_link_length = (intrinsic_link_length as f64 * 0.4).round() as Activation;
        self
    }

    pub fn directed(mut self) -> Self {
        self.directed = true;
        self
    }

    pub fn clamped_initially(mut self) -> Self {
        self.initially_clamped = true;
        self.clamp = true;
        self.activation = 100;
        self
    }

    pub fn with_codelet(mut self, kind: CodeletKind, base_urgency: f64) -> Self {
        self.codelets.push(CodeletTemplate { kind, base_urgency });
        self
    }

    /// true once activation saturates; several queries branch on this.
    pub fn is_active(&self) -> bool {
        self.activation == 100
    }

    /// 100 minus the link length this node imposes when used as a link
    /// label, using the shrunk length while the node itself is active.
    pub fn degree_of_association(&self) -> Activation {
        100 - if self.is_active() { self.shrunk_link_length } else { self.intrinsic_link_length }
    }

    /// `min(100, round(11 * sqrt(degree_of_association)))` -- the concave
    /// scaling bond strength uses when deriving association from a category
    /// node's own degree of association.
    pub fn bond_degree_of_association(&self) -> Activation {
        let degree = self.degree_of_association() as f64;
        (11.0 * degree.sqrt()).round().min(100.0) as Activation
    }

    /// remove `(100 - conceptual_depth)%` of current activation into the
    /// buffer as a negative contribution.
    pub fn decay(&mut self) {
        let amount = ((100 - self.conceptual_depth) as f64 / 100.0 * self.activation as f64).round();
        self.activation_buffer -= amount as Activation;
    }
}
