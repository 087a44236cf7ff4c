//! Letters and Groups share one tagged sum.

use crate::slipnet::SlipId;
use crate::workspace::description::Description;
use crate::workspace::ids::{BondId, CorrespondenceId, ObjectId, StringSlot};

/// fields every object carries regardless of kind.
#[derive(Debug, Clone)]
pub struct ObjectCommon {
    pub string: StringSlot,
    pub left_index: usize,
    pub right_index: usize,
    pub descriptions: Vec<Description>,
    pub parent_group: Option<ObjectId>,
    pub left_bond: Option<BondId>,
    pub right_bond: Option<BondId>,
    pub correspondence: Option<CorrespondenceId>,
    pub raw_salience: f64,
    pub intra_string_salience: f64,
    pub inter_string_salience: f64,
    pub total_salience: f64,
    /// set when a Group object is broken; its `ObjectId` stays allocated
    /// but the object is
    /// no longer a candidate for `top_level_objects` or any fresh structure.
    pub removed: bool,
}

impl ObjectCommon {
    pub fn new(string: StringSlot, left_index: usize, right_index: usize) -> Self {
        Self {
            string,
            left_index,
            right_index,
            descriptions: Vec::new(),
            parent_group: None,
            left_bond: None,
            right_bond: None,
            correspondence: None,
            raw_salience: 0.0,
            intra_string_salience: 0.0,
            inter_string_salience: 0.0,
            total_salience: 0.0,
            removed: false,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Object {
    Letter { common: ObjectCommon, letter: char, letter_category: SlipId },
    Group {
        common: ObjectCommon,
        group_category: SlipId,
        direction_category: Option<SlipId>,
        bond_facet: Option<SlipId>,
        /// member objects left to right, in the group's own string arena.
        objects: Vec<ObjectId>,
        bonds: Vec<BondId>,
        /// the `GroupId` of the `workspace::Group` structure this object
        /// backs -- `None` only in the instant between minting the object
        /// and inserting the matching structure in `Workspace::build_group`.
        structure: Option<crate::workspace::GroupId>,
    },
}

impl Object {
    pub fn common(&self) -> &ObjectCommon {
        match self {
            Self::Letter { common, .. } | Self::Group { common, .. } => common,
        }
    }

    pub fn common_mut(&mut self) -> &mut ObjectCommon {
        match self {
            Self::Letter { common, .. } | Self::Group { common, .. } => common,
        }
    }

    pub fn left_index(&self) -> usize {
        self.common().left_index
    }

    pub fn right_index(&self) -> usize {
        self.common().right_index
    }

    /// number of letters this object spans; 1 for a Letter.
    pub fn letter_span(&self) -> usize {
        self.right_index() - self.left_index() + 1
    }

    /// number of member objects backing this object: 1 for a Letter, the
    /// group's own member count for a Group (used by rule translation's
    /// group-length slippage check, which looks for a strict successor
    /// progression across a string's top-level objects).
    pub fn member_count(&self) -> usize {
        match self {
            Self::Letter { .. } => 1,
            Self::Group { objects, .. } => objects.len(),
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group { .. })
    }

    pub fn descriptions(&self) -> &[Description] {
        &self.common().descriptions
    }

    pub fn is_descriptor_present(&self, descriptor: SlipId) -> bool {
        self.descriptions().iter().any(|d| d.descriptor == descriptor)
    }

    pub fn is_description_type_present(&self, description_type: SlipId) -> bool {
        self.descriptions().iter().any(|d| d.description_type == description_type)
    }

    pub fn get_descriptor(&self, description_type: SlipId) -> Option<SlipId> {
        self.descriptions()
            .iter()
            .find(|d| d.description_type == description_type)
            .map(|d| d.descriptor)
    }

    pub fn add_description(&mut self, description: Description) {
        if !self.is_descriptor_present(description.descriptor) {
            self.common_mut().descriptions.push(description);
        }
    }

    pub fn leftmost_in_string(&self) -> bool {
        self.left_index() == 0
    }

    pub fn rightmost_in_string(&self, string_length: usize) -> bool {
        self.right_index() + 1 == string_length
    }

    /// average of the three salience measures, clamped to [0, 100] (used by
    /// `choose_object`'s "intra_string_salience" weighting, spec
    /// `bond.py::BondBottomUpScout`).
    pub fn update_total_salience(&mut self) {
        let common = self.common_mut();
        common.total_salience =
            ((common.intra_string_salience + common.inter_string_salience) / 2.0).clamp(0.0, 100.0);
    }

    /// patches a freshly created Letter's platonic letter-category node, set
    /// after `WorkspaceString::new` since the letter nodes live in the
    /// slipnet's `Platonic` table, not in the object arena itself.
    pub fn set_letter_category(&mut self, node: SlipId) {
        if let Self::Letter { letter_category, .. } = self {
            *letter_category = node;
        }
    }

    pub fn letter_category(&self) -> Option<SlipId> {
        match self {
            Self::Letter { letter_category, .. } => Some(*letter_category),
            Self::Group { .. } => None,
        }
    }

    pub fn letter(&self) -> Option<char> {
        match self {
            Self::Letter { letter, .. } => Some(*letter),
            Self::Group { .. } => None,
        }
    }
}
