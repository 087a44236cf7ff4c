//! The 5-slot symbolic transformation description and its
//! translation onto the target string.

use crate::slipnet::SlipId;

/// `(object_category1, descriptor1_facet, descriptor1, object_category2,
/// replaced_descriptor_facet, relation)` -- names five slots in
/// prose order; we additionally split out `relation` as distinct from
/// `descriptor1` since the original keeps "the new descriptor value" and
/// "the relation label" (identity/opposite/predecessor/successor/...) as
/// separate concepts threaded through translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rule {
    pub object_category1: Option<SlipId>,
    pub descriptor1_facet: Option<SlipId>,
    pub descriptor1: Option<SlipId>,
    pub object_category2: Option<SlipId>,
    pub replaced_descriptor_facet: Option<SlipId>,
    pub relation: Option<SlipId>,
}

impl Rule {
    /// : "a non-empty rule is required to emit an answer."
    pub fn is_empty(&self) -> bool {
        self.object_category1.is_none()
            && self.descriptor1_facet.is_none()
            && self.descriptor1.is_none()
            && self.object_category2.is_none()
            && self.replaced_descriptor_facet.is_none()
            && self.relation.is_none()
    }
}

pub type ProposedRule = Rule;
