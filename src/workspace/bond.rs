//! Bonds between neighboring objects of one string,
//! grounded on `BondBottomUpScout` / `BondBuilder` / `BondStrengthTester` in
//! `original_source/copycat-ajhager/copycat/coderack/codelets/bond.py`.

use crate::slipnet::SlipId;
use crate::workspace::ids::{ObjectId, StringSlot};

/// level in the lifecycle every proposable structure passes through. Built
/// bonds/groups/correspondences don't carry this field at all -- once built
/// they're unconditionally real, so only proposals need to track where they
/// are in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProposalLevel {
    Proposed,
    Evaluated,
}

/// a candidate bond in flight between `BondBottomUpScout`/
/// `BondTopDownCategoryScout`/`BondTopDownDirectionScout` and `BondBuilder`.
/// Equality is the 6-tuple from -- proposal level is deliberately
/// excluded from `PartialEq` so a scout's fresh proposal compares equal to
/// one already promoted to `Evaluated` by a tester.
#[derive(Debug, Clone)]
pub struct ProposedBond {
    pub string: StringSlot,
    pub from_object: ObjectId,
    pub to_object: ObjectId,
    pub bond_category: SlipId,
    pub bond_facet: SlipId,
    pub from_descriptor: SlipId,
    pub to_descriptor: SlipId,
    pub direction_category: Option<SlipId>,
    pub level: ProposalLevel,
}

impl PartialEq for ProposedBond {
    fn eq(&self, other: &Self) -> bool {
        self.string == other.string
            && self.from_object == other.from_object
            && self.to_object == other.to_object
            && self.bond_category == other.bond_category
            && self.bond_facet == other.bond_facet
            && self.from_descriptor == other.from_descriptor
            && self.to_descriptor == other.to_descriptor
    }
}

impl ProposedBond {
    pub fn new(
        string: StringSlot,
        from_object: ObjectId,
        to_object: ObjectId,
        bond_category: SlipId,
        bond_facet: SlipId,
        from_descriptor: SlipId,
        to_descriptor: SlipId,
        direction_category: Option<SlipId>,
    ) -> Self {
        Self {
            string,
            from_object,
            to_object,
            bond_category,
            bond_facet,
            from_descriptor,
            to_descriptor,
            direction_category,
            level: ProposalLevel::Proposed,
        }
    }
}

/// a built bond.
#[derive(Debug, Clone)]
pub struct Bond {
    pub string: StringSlot,
    pub from_object: ObjectId,
    pub to_object: ObjectId,
    pub bond_category: SlipId,
    pub bond_facet: SlipId,
    pub from_descriptor: SlipId,
    pub to_descriptor: SlipId,
    pub direction_category: Option<SlipId>,
}

impl Bond {
    pub fn from_proposed(proposed: &ProposedBond) -> Self {
        Self {
            string: proposed.string,
            from_object: proposed.from_object,
            to_object: proposed.to_object,
            bond_category: proposed.bond_category,
            bond_facet: proposed.bond_facet,
            from_descriptor: proposed.from_descriptor,
            to_descriptor: proposed.to_descriptor,
            direction_category: proposed.direction_category,
        }
    }

    pub fn matches_proposed(&self, proposed: &ProposedBond) -> bool {
        self.string == proposed.string
            && self.from_object == proposed.from_object
            && self.to_object == proposed.to_object
            && self.bond_category == proposed.bond_category
            && self.bond_facet == proposed.bond_facet
            && self.from_descriptor == proposed.from_descriptor
            && self.to_descriptor == proposed.to_descriptor
    }

    pub fn shares_endpoint(&self, other_from: ObjectId, other_to: ObjectId) -> bool {
        self.from_object == other_from
            || self.from_object == other_to
            || self.to_object == other_from
            || self.to_object == other_to
    }
}
