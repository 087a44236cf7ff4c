//! Cross-string mappings between one initial-side and one target-side
//! object, the vehicle for accumulating the
//! slippage list rule translation consumes.

use crate::slipnet::SlipId;
use crate::workspace::ids::ObjectId;

/// a single concept substitution carried by a correspondence: a pair of
/// description types and descriptors (one per string), plus the slipnet
/// relation and label nodes the mapping runs through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConceptMapping {
    pub description_type1: SlipId,
    pub description_type2: SlipId,
    pub descriptor1: SlipId,
    pub descriptor2: SlipId,
    pub relation: Option<SlipId>,
    pub label: Option<SlipId>,
}

impl ConceptMapping {
    /// true for an identity mapping (`descriptor1 == descriptor2`) -- these
    /// don't contribute a slippage since translation is the identity.
    pub fn is_slippage(&self) -> bool {
        self.descriptor1 != self.descriptor2
    }

    /// two mappings are incompatible when they describe the same
    /// description-type pair but disagree on the mapped descriptors (used
    /// by `Group::is_incompatible_correspondence` in `group.py`).
    pub fn is_incompatible_with(&self, other: &ConceptMapping) -> bool {
        self.description_type1 == other.description_type1
            && self.description_type2 == other.description_type2
            && (self.descriptor1 != other.descriptor1 || self.descriptor2 != other.descriptor2)
    }
}

#[derive(Debug, Clone)]
pub struct ProposedCorrespondence {
    pub initial_object: ObjectId,
    pub target_object: ObjectId,
    pub concept_mappings: Vec<ConceptMapping>,
    pub accessory: bool,
}

/// a built correspondence. Invariant: connects one object in
/// `initial_string` to one in `target_string`, never same-string -- enforced
/// by construction since `initial_object`/`target_object` are only ever
/// populated from those two arenas respectively.
#[derive(Debug, Clone)]
pub struct Correspondence {
    pub initial_object: ObjectId,
    pub target_object: ObjectId,
    pub concept_mappings: Vec<ConceptMapping>,
    pub accessory: bool,
}

impl Correspondence {
    pub fn from_proposed(proposed: &ProposedCorrespondence) -> Self {
        Self {
            initial_object: proposed.initial_object,
            target_object: proposed.target_object,
            concept_mappings: proposed.concept_mappings.clone(),
            accessory: proposed.accessory,
        }
    }

    pub fn other_object(&self, object: ObjectId) -> Option<ObjectId> {
        if object == self.initial_object {
            Some(self.target_object)
        } else if object == self.target_object {
            Some(self.initial_object)
        } else {
            None
        }
    }

    pub fn slippages(&self) -> impl Iterator<Item = &ConceptMapping> {
        self.concept_mappings.iter().filter(|m| m.is_slippage())
    }
}
