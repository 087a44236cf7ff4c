//! Contiguous, homogeneously-bonded spans of one string,
//! grounded on `original_source/copycat-ajhager/copycat/workspace/group.py`.
//! The neighbor-walking strength measures (`local_support`,
//! `number_of_local_supporting_groups`, `local_density`) stay free functions
//! over `&WorkspaceString` in `workspace::mod` rather than methods here,
//! since they need the arena to walk neighboring objects.

use crate::slipnet::SlipId;
use crate::workspace::ids::{BondId, ObjectId, StringSlot};

#[derive(Debug, Clone)]
pub struct ProposedGroup {
    pub string: StringSlot,
    pub group_category: SlipId,
    pub direction_category: Option<SlipId>,
    pub bond_facet: Option<SlipId>,
    pub left_index: usize,
    pub right_index: usize,
    pub objects: Vec<ObjectId>,
    pub bonds: Vec<BondId>,
}

impl ProposedGroup {
    pub fn matches_built(&self, built: &Group) -> bool {
        self.string == built.string
            && self.left_index == built.left_index
            && self.right_index == built.right_index
            && self.group_category == built.group_category
            && self.direction_category == built.direction_category
    }
}

/// a built group. Equality is `(left_index, right_index, group_category,
/// direction_category)` 
#[derive(Debug, Clone)]
pub struct Group {
    pub string: StringSlot,
    pub group_category: SlipId,
    pub direction_category: Option<SlipId>,
    pub bond_facet: Option<SlipId>,
    pub bond_category: Option<SlipId>,
    pub left_index: usize,
    pub right_index: usize,
    pub objects: Vec<ObjectId>,
    pub bonds: Vec<BondId>,
    /// the `Object::Group` entry in the string's object arena this
    /// structure backs;
    /// minted alongside this `Group` at build time.
    pub object: ObjectId,
}

impl Group {
    pub fn from_proposed(proposed: &ProposedGroup, bond_category: Option<SlipId>, object: ObjectId) -> Self {
        Self {
            string: proposed.string,
            group_category: proposed.group_category,
            direction_category: proposed.direction_category,
            bond_facet: proposed.bond_facet,
            bond_category,
            left_index: proposed.left_index,
            right_index: proposed.right_index,
            objects: proposed.objects.clone(),
            bonds: proposed.bonds.clone(),
            object,
        }
    }

    pub fn letter_span(&self) -> usize {
        self.right_index - self.left_index + 1
    }

    pub fn length(&self) -> usize {
        self.objects.len()
    }

    pub fn spans_whole_string(&self, string_length: usize) -> bool {
        self.letter_span() == string_length
    }

    pub fn is_leftmost_in_string(&self) -> bool {
        self.left_index == 0
    }

    pub fn is_rightmost_in_string(&self, string_length: usize) -> bool {
        self.right_index + 1 == string_length
    }

    /// `is_subgroup_of` in `group.py`: `other` fully contains `self`'s span.
    pub fn is_subgroup_of(&self, other: &Group) -> bool {
        other.left_index <= self.left_index && other.right_index >= self.right_index
    }

    pub fn overlaps(&self, other: &Group) -> bool {
        self.objects.iter().all(|o| other.objects.contains(o))
    }

    /// `calculate_internal_strength` in `group.py`: a letter-category-facet
    /// bond group is worth full weight, any other facet half; the bond's
    /// degree of association and a length lookup table are blended via
    /// `weighted_average` with `bond_component ** .98` as the bond weight.
    pub fn internal_strength(&self, letter_category: SlipId, bond_degree_of_association: f64) -> f64 {
        let bond_facet_factor = if self.bond_facet == Some(letter_category) { 1.0 } else { 0.5 };
        let bond_component = bond_degree_of_association * bond_facet_factor;
        let length_component = match self.length() {
            1 => 5.0,
            2 => 20.0,
            3 => 60.0,
            _ => 90.0,
        };
        let bond_weight = bond_component.powf(0.98);
        let length_weight = 100.0 - bond_weight;
        crate::random::weighted_average(&[bond_weight, length_weight], &[bond_component, length_component])
    }
}
