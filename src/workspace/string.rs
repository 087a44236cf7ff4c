//! One of the three workspace strings: initial, modified, or target (spec
//! SS3 "Workspace string"). Each owns its own object/bond/group arenas, per
//! the arena-per-string Design Note.
//!
//! Built bonds and groups live in tombstoned arenas (`Vec<Option<T>>`)
//! rather than plain `Vec<T>`: `ObjectCommon::left_bond`/`right_bond` and
//! `Group::bonds` hold `BondId`s that must stay valid after some other bond
//! breaks, so removal can never shift indices the way `Vec::remove` would.

use crate::slipnet::SlipId;
use crate::workspace::bond::{Bond, ProposedBond};
use crate::workspace::description::Description;
use crate::workspace::group::{Group, ProposedGroup};
use crate::workspace::ids::{BondId, GroupId, ObjectId, StringSlot};
use crate::workspace::object::{Object, ObjectCommon};

#[derive(Debug, Clone)]
pub struct WorkspaceString {
    pub slot: StringSlot,
    pub letters: Vec<char>,
    objects: Vec<Object>,
    pub proposed_bonds: Vec<ProposedBond>,
    built_bonds: Vec<Option<Bond>>,
    pub proposed_groups: Vec<ProposedGroup>,
    built_groups: Vec<Option<Group>>,
    pub intra_string_unhappiness: f64,
}

impl WorkspaceString {
    pub fn new(slot: StringSlot, text: &str) -> Self {
        let letters: Vec<char> = text.chars().collect();
        let objects = letters
            .iter()
            .enumerate()
            .map(|(index, &ch)| Object::Letter {
                common: ObjectCommon::new(slot, index, index),
                letter: ch,
                letter_category: petgraph::graph::NodeIndex::end(),
            })
            .collect();
        Self {
            slot,
            letters,
            objects,
            proposed_bonds: Vec::new(),
            built_bonds: Vec::new(),
            proposed_groups: Vec::new(),
            built_groups: Vec::new(),
            intra_string_unhappiness: 0.0,
        }
    }

    pub fn length(&self) -> usize {
        self.letters.len()
    }

    pub fn letter_object(&self, index: usize) -> ObjectId {
        debug_assert!(index < self.letters.len());
        ObjectId(index)
    }

    pub fn object(&self, id: ObjectId) -> &Object {
        &self.objects[id.0]
    }

    pub fn object_mut(&mut self, id: ObjectId) -> &mut Object {
        &mut self.objects[id.0]
    }

    pub fn push_group_object(&mut self, object: Object) -> ObjectId {
        let id = ObjectId(self.objects.len());
        self.objects.push(object);
        id
    }

    pub fn object_ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        (0..self.objects.len()).map(ObjectId)
    }

    /// the outermost ungrouped ancestor of an object (its own top group, or
    /// itself if ungrouped) -- neighbor-finding operates at this level since
    /// a grouped letter's neighbors are the group's neighbors.
    pub fn top_level_object(&self, mut id: ObjectId) -> ObjectId {
        while let Some(parent) = self.object(id).common().parent_group {
            id = parent;
        }
        id
    }

    pub fn choose_left_neighbor(&self, id: ObjectId) -> Option<ObjectId> {
        let top = self.top_level_object(id);
        let left_index = self.object(top).left_index();
        if left_index == 0 {
            return None;
        }
        Some(self.top_level_object(self.letter_object(left_index - 1)))
    }

    pub fn choose_right_neighbor(&self, id: ObjectId) -> Option<ObjectId> {
        let top = self.top_level_object(id);
        let right_index = self.object(top).right_index();
        if right_index + 1 >= self.length() {
            return None;
        }
        Some(self.top_level_object(self.letter_object(right_index + 1)))
    }

    pub fn get_bond(&self, from_object: ObjectId, to_object: ObjectId) -> Option<BondId> {
        self.built_bond_ids()
            .find(|&id| {
                let b = self.bond(id);
                b.from_object == from_object && b.to_object == to_object
            })
    }

    pub fn get_existing_bond(&self, proposed: &ProposedBond) -> Option<BondId> {
        self.built_bond_ids().find(|&id| self.bond(id).matches_proposed(proposed))
    }

    pub fn remove_proposed_bond(&mut self, proposed: &ProposedBond) {
        self.proposed_bonds.retain(|b| b != proposed);
    }

    pub fn bond(&self, id: BondId) -> &Bond {
        self.built_bonds[id.0].as_ref().expect("BondId referenced after it was broken")
    }

    pub fn insert_bond(&mut self, bond: Bond) -> BondId {
        let id = BondId(self.built_bonds.len());
        self.built_bonds.push(Some(bond));
        id
    }

    pub fn built_bond_ids(&self) -> impl Iterator<Item = BondId> + '_ {
        self.built_bonds
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(i, _)| BondId(i))
    }

    pub fn group(&self, id: GroupId) -> &Group {
        self.built_groups[id.0].as_ref().expect("GroupId referenced after it was broken")
    }

    pub fn insert_group(&mut self, group: Group) -> GroupId {
        let id = GroupId(self.built_groups.len());
        self.built_groups.push(Some(group));
        id
    }

    pub fn remove_group(&mut self, id: GroupId) -> Group {
        self.built_groups[id.0].take().expect("GroupId removed twice")
    }

    pub fn built_group_ids(&self) -> impl Iterator<Item = GroupId> + '_ {
        self.built_groups
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(i, _)| GroupId(i))
    }

    pub fn incompatible_bonds(&self, from_object: ObjectId, to_object: ObjectId) -> Vec<BondId> {
        self.built_bond_ids().filter(|&id| self.bond(id).shares_endpoint(from_object, to_object)).collect()
    }

    /// breaks a built bond: unlinks its endpoints' back-pointers before the
    /// tombstone is set, crediting the break once.
    pub fn remove_bond(&mut self, id: BondId) -> Bond {
        let bond = self.built_bonds[id.0].take().expect("BondId removed twice");
        if self.object(bond.from_object).common().right_bond == Some(id) {
            self.object_mut(bond.from_object).common_mut().right_bond = None;
        }
        if self.object(bond.to_object).common().left_bond == Some(id) {
            self.object_mut(bond.to_object).common_mut().left_bond = None;
        }
        bond
    }

    /// objects with no parent group, left to right -- what rule-scout and
    /// correspondence-scout walk over (a built group supersedes its members
    /// for top-level candidate selection).
    pub fn top_level_objects(&self) -> Vec<ObjectId> {
        self.object_ids()
            .filter(|&id| !self.object(id).common().removed && self.object(id).common().parent_group.is_none())
            .collect()
    }

    pub fn descriptions_of(&self, id: ObjectId) -> &[Description] {
        self.object(id).descriptions()
    }

    /// string-level unhappiness: the complement of the average
    /// intra-string salience across every object -- a string stays unhappy
    /// until bonds, groups, and descriptions lower its objects' saliences.
    pub fn recompute_unhappiness(&mut self) -> f64 {
        let unhappiness = if self.objects.is_empty() {
            0.0
        } else {
            let total: f64 = self.objects.iter().map(|o| o.common().intra_string_salience).sum();
            (100.0 - total / self.objects.len() as f64).clamp(0.0, 100.0)
        };
        self.intra_string_unhappiness = unhappiness;
        unhappiness
    }

    pub fn local_bond_category_relevance(&self, category: SlipId) -> f64 {
        let total = self.built_bond_ids().count().max(1);
        let matching = self.built_bond_ids().filter(|&id| self.bond(id).bond_category == category).count();
        100.0 * (matching as f64 / total as f64)
    }

    pub fn local_direction_category_relevance(&self, direction: SlipId) -> f64 {
        let total = self.built_bond_ids().count().max(1);
        let matching = self
            .built_bond_ids()
            .filter(|&id| self.bond(id).direction_category == Some(direction))
            .count();
        100.0 * (matching as f64 / total as f64)
    }
}
