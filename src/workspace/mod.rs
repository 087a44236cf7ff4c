//! The mutable percept graph: three `WorkspaceString`s
//! (initial/modified/target) plus the workspace-scope correspondence table
//! and the single in-progress `Rule`, together with the propose/build/break
//! operations and the fight-it-out competitive-acceptance protocol every
//! non-trivial structure goes through.

pub mod bond;
pub mod correspondence;
pub mod description;
pub mod group;
pub mod ids;
pub mod object;
pub mod rule;
pub mod string;

pub use bond::{Bond, ProposalLevel, ProposedBond};
pub use correspondence::{ConceptMapping, Correspondence, ProposedCorrespondence};
pub use description::Description;
pub use group::{Group, ProposedGroup};
pub use ids::{BondId, CorrespondenceId, GroupId, ObjectId, StringSlot};
pub use object::{Object, ObjectCommon};
pub use rule::{ProposedRule, Rule};
pub use string::WorkspaceString;

use crate::error::CopycatError;
use crate::random::{self, Stream};
use crate::slipnet::{Platonic, SlipId, Slipnet};
use crate::temperature::Temperature;

/// a description candidate in flight between a description scout and its
/// builder -- descriptions don't fight incumbents, so there is no
/// `ProposalLevel` here, just "proposed, not yet attached".
#[derive(Debug, Clone, Copy)]
pub struct ProposedDescription {
    pub string: StringSlot,
    pub object: ObjectId,
    pub description_type: SlipId,
    pub descriptor: SlipId,
}

/// which salience measure a scout weights its random pick by, mirroring
/// `choose_object('intra_string_salience')` in the original bond scout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Salience {
    Intra,
    Total,
}

pub struct Workspace {
    pub platonic: Platonic,
    pub initial: WorkspaceString,
    pub modified: WorkspaceString,
    pub target: WorkspaceString,
    correspondences: Vec<Option<Correspondence>>,
    pub proposed_correspondences: Vec<ProposedCorrespondence>,
    pub proposed_descriptions: Vec<ProposedDescription>,
    pub rule: Option<Rule>,
    pub proposed_rules: Vec<ProposedRule>,
    /// accumulated (descriptor1 -> descriptor2) identity/opposite
    /// substitutions from built correspondences (glossary),
    /// consumed by `translate_rule`.
    slippages: Vec<(SlipId, SlipId)>,
}

impl Workspace {
    pub fn new(initial: &str, modified: &str, target: &str, platonic: &Platonic) -> Self {
        let mut initial = WorkspaceString::new(StringSlot::Initial, initial);
        let mut modified = WorkspaceString::new(StringSlot::Modified, modified);
        let mut target = WorkspaceString::new(StringSlot::Target, target);
        for string in [&mut initial, &mut modified, &mut target] {
            Self::wire_letters(string, platonic);
        }
        Self {
            platonic: *platonic,
            initial,
            modified,
            target,
            correspondences: Vec::new(),
            proposed_correspondences: Vec::new(),
            proposed_descriptions: Vec::new(),
            rule: None,
            proposed_rules: Vec::new(),
            slippages: Vec::new(),
        }
    }

    /// patches each Letter's platonic letter-category node and attaches its
    /// initial descriptions (letter-category, leftmost/rightmost,
    /// first/last alphabetic position). Letters are created once at
    /// start-up and never destroyed.
    fn wire_letters(string: &mut WorkspaceString, platonic: &Platonic) {
        let length = string.length();
        for index in 0..length {
            let id = string.letter_object(index);
            let Some(ch) = string.object(id).letter() else { continue };
            let Some(letter_node) = letter_node(platonic, ch) else { continue };
            string.object_mut(id).set_letter_category(letter_node);
            string.object_mut(id).add_description(Description::new(id, platonic.letter_category, letter_node));
            if index == 0 {
                string.object_mut(id).add_description(Description::new(id, platonic.string_position_category, platonic.leftmost));
            }
            if index + 1 == length {
                string.object_mut(id).add_description(Description::new(id, platonic.string_position_category, platonic.rightmost));
            }
            if ch == 'a' {
                string.object_mut(id).add_description(Description::new(id, platonic.alphabetic_position_category, platonic.first));
            }
            if ch == 'z' {
                string.object_mut(id).add_description(Description::new(id, platonic.alphabetic_position_category, platonic.last));
            }
        }
    }

    pub fn string(&self, slot: StringSlot) -> &WorkspaceString {
        match slot {
            StringSlot::Initial => &self.initial,
            StringSlot::Modified => &self.modified,
            StringSlot::Target => &self.target,
        }
    }

    pub fn string_mut(&mut self, slot: StringSlot) -> &mut WorkspaceString {
        match slot {
            StringSlot::Initial => &mut self.initial,
            StringSlot::Modified => &mut self.modified,
            StringSlot::Target => &mut self.target,
        }
    }

    // ---- salience & unhappiness -----------------------------------------

    /// recompute raw/intra/inter/total salience for every object and each
    /// string's `intra_string_unhappiness`. Called once per coderack step
    /// from the main loop, the same cadence `workspace.updateEverything()`
    /// runs on in the original, ahead of `choose_object`.
    pub fn update_saliences(&mut self) {
        for slot in [StringSlot::Initial, StringSlot::Modified, StringSlot::Target] {
            self.update_saliences_in(slot);
        }
    }

    fn update_saliences_in(&mut self, slot: StringSlot) {
        let has_correspondence: Vec<(ObjectId, bool)> = {
            let string = self.string(slot);
            string.object_ids().map(|id| (id, string.object(id).common().correspondence.is_some())).collect()
        };
        let string = self.string_mut(slot);
        for (id, has_corr) in has_correspondence {
            let descriptions = string.object(id).descriptions().len() as f64;
            let unbonded = string.object(id).common().left_bond.is_none() && string.object(id).common().right_bond.is_none();
            let obj = string.object_mut(id);
            let common = obj.common_mut();
            common.raw_salience = (10.0 * descriptions + if unbonded { 10.0 } else { 0.0 }).min(100.0);
            common.intra_string_salience = common.raw_salience;
            common.inter_string_salience = if has_corr { 20.0 } else { 80.0 };
            obj.update_total_salience();
        }
        string.recompute_unhappiness();
    }

    /// the value fed to `Temperature::update`: a blend of both
    /// non-modified strings' unhappiness, pulled down by the strength of
    /// whatever rule is currently built.
    pub fn temperature_input(&self, slipnet: &Slipnet) -> f64 {
        let unhappiness = random::average(self.initial.intra_string_unhappiness, self.target.intra_string_unhappiness);
        let rule_strength = self.rule.as_ref().map(|r| self.rule_strength(r, slipnet)).unwrap_or(0.0);
        random::weighted_average(&[90.0, 10.0], &[unhappiness, 100.0 - rule_strength]).clamp(0.0, 100.0)
    }

    pub fn choose_object(&self, rng: &mut Stream, slot: StringSlot, field: Salience) -> Option<ObjectId> {
        let string = self.string(slot);
        let ids = string.top_level_objects();
        if ids.is_empty() {
            return None;
        }
        let weights: Vec<f64> = ids
            .iter()
            .map(|&id| match field {
                Salience::Intra => string.object(id).common().intra_string_salience.max(1.0),
                Salience::Total => string.object(id).common().total_salience.max(1.0),
            })
            .collect();
        random::weighted_select(rng, &weights, ids)
    }

    /// probabilistically picks initial-string or target-string, weighted by
    /// the average of a category/direction's local relevance and the
    /// string's unhappiness ().
    pub fn choose_string_by_relevance(&self, rng: &mut Stream, relevance: impl Fn(&WorkspaceString) -> f64) -> StringSlot {
        let i = random::average(relevance(&self.initial), self.initial.intra_string_unhappiness);
        let t = random::average(relevance(&self.target), self.target.intra_string_unhappiness);
        random::weighted_select(rng, &[i.max(1.0), t.max(1.0)], vec![StringSlot::Initial, StringSlot::Target])
            .unwrap_or(StringSlot::Initial)
    }

    // ---- bond facet choice -------------------------------------------------

    /// picks the facet (letter-category or length) both objects have a
    /// descriptor for, weighted by the facet node's activation.
    pub fn choose_bond_facet(&self, rng: &mut Stream, slipnet: &Slipnet, slot: StringSlot, a: ObjectId, b: ObjectId) -> Option<SlipId> {
        let string = self.string(slot);
        let facets = [self.platonic.letter_category, self.platonic.length];
        let mut candidates = Vec::new();
        let mut weights = Vec::new();
        for &facet in &facets {
            if string.object(a).get_descriptor(facet).is_some() && string.object(b).get_descriptor(facet).is_some() {
                candidates.push(facet);
                weights.push((slipnet.activation(facet) as f64).max(1.0));
            }
        }
        random::weighted_select(rng, &weights, candidates)
    }

    // ---- bonds --------------------------------------------------------------

    pub fn propose_bond(&mut self, proposed: ProposedBond) {
        let string = self.string_mut(proposed.string);
        if !string.proposed_bonds.contains(&proposed) {
            string.proposed_bonds.push(proposed);
        }
    }

    /// total strength of a proposed bond: internal (category association,
    /// facet-weighted) blended with external (how supported it is by the
    /// rest of the string -- 100 when it would span the whole 2-letter
    /// string, otherwise the fraction of same-category/direction bonds
    /// already built).
    pub fn bond_strength(&self, slipnet: &Slipnet, proposed: &ProposedBond) -> f64 {
        let facet_factor = if proposed.bond_facet == self.platonic.letter_category { 1.0 } else { 0.5 };
        let internal = slipnet.bond_degree_of_association(proposed.bond_category) as f64 * facet_factor;
        let string = self.string(proposed.string);
        let external = if string.length() <= 2 {
            100.0
        } else {
            let total = string.built_bond_ids().count();
            if total == 0 {
                50.0
            } else {
                let matching = string
                    .built_bond_ids()
                    .filter(|&id| string.bond(id).bond_category == proposed.bond_category)
                    .count();
                100.0 * matching as f64 / total as f64
            }
        };
        random::weighted_average(&[internal.powf(0.98), 100.0 - internal.powf(0.98)], &[internal, external])
    }

    /// "Bond construction specifics": duplicate detection credits
    /// the existing bond's category (and direction, if any) and fizzles.
    pub fn duplicate_bond(&mut self, slipnet: &mut Slipnet, proposed: &ProposedBond) -> bool {
        let string = self.string_mut(proposed.string);
        let Some(existing) = string.get_existing_bond(proposed) else { return false };
        let (category, direction) = {
            let bond = string.bond(existing);
            (bond.bond_category, bond.direction_category)
        };
        string.remove_proposed_bond(proposed);
        slipnet.nudge(category, 10);
        if let Some(direction) = direction {
            slipnet.nudge(direction, 10);
        }
        true
    }

    /// promotes a proposed bond from level 1 to level 2 once its strength
    /// test passes a coin flip.
    pub fn mark_bond_evaluated(&mut self, proposed: &ProposedBond) {
        let string = self.string_mut(proposed.string);
        if let Some(entry) = string.proposed_bonds.iter_mut().find(|b| b.eq(proposed)) {
            entry.level = ProposalLevel::Evaluated;
        }
    }

    pub fn incompatible_bonds(&self, slot: StringSlot, a: ObjectId, b: ObjectId) -> Vec<BondId> {
        self.string(slot).incompatible_bonds(a, b)
    }

    /// groups in the bond's string whose bond-structure the new bond would
    /// contradict: any built group containing either endpoint whose
    /// internal bond set doesn't already include this exact bond.
    pub fn incompatible_groups_for_bond(&self, slot: StringSlot, a: ObjectId, b: ObjectId) -> Vec<GroupId> {
        let string = self.string(slot);
        string
            .built_group_ids()
            .filter(|&id| {
                let group = string.group(id);
                (group.objects.contains(&a) || group.objects.contains(&b))
                    && !(group.left_index <= string.object(a).left_index().min(string.object(b).left_index())
                        && group.right_index >= string.object(a).right_index().max(string.object(b).right_index()))
            })
            .collect()
    }

    /// : "only if the bond is at a string edge and is directed".
    pub fn incompatible_correspondences_for_bond(&self, slipnet: &Slipnet, proposed: &ProposedBond) -> Vec<CorrespondenceId> {
        let directed = proposed.direction_category.is_some() && slipnet.node(proposed.bond_category).directed;
        let string = self.string(proposed.string);
        let at_edge = string.object(proposed.from_object).leftmost_in_string()
            || string.object(proposed.to_object).rightmost_in_string(string.length());
        if !directed || !at_edge || proposed.string != StringSlot::Initial && proposed.string != StringSlot::Target {
            return Vec::new();
        }
        self.correspondence_ids_touching(proposed.from_object, proposed.string)
            .chain(self.correspondence_ids_touching(proposed.to_object, proposed.string))
            .collect()
    }

    fn correspondence_ids_touching(&self, object: ObjectId, slot: StringSlot) -> impl Iterator<Item = CorrespondenceId> + '_ {
        self.correspondences.iter().enumerate().filter_map(move |(i, c)| {
            let c = c.as_ref()?;
            let matches = match slot {
                StringSlot::Initial => c.initial_object == object,
                StringSlot::Target => c.target_object == object,
                StringSlot::Modified => false,
            };
            matches.then_some(CorrespondenceId(i))
        })
    }

    /// re-derives a built bond's current strength by re-running
    /// `bond_strength` over its stored fields -- used to weight it as a
    /// fight-it-out incumbent ("s_i = strength(L_i) x w_i").
    pub fn built_bond_strength(&self, slipnet: &Slipnet, slot: StringSlot, id: BondId) -> f64 {
        let bond = self.string(slot).bond(id);
        let proposed = ProposedBond {
            string: slot,
            from_object: bond.from_object,
            to_object: bond.to_object,
            bond_category: bond.bond_category,
            bond_facet: bond.bond_facet,
            from_descriptor: bond.from_descriptor,
            to_descriptor: bond.to_descriptor,
            direction_category: bond.direction_category,
            level: ProposalLevel::Proposed,
        };
        self.bond_strength(slipnet, &proposed)
    }

    pub fn build_bond(&mut self, proposed: &ProposedBond) -> BondId {
        let string = self.string_mut(proposed.string);
        string.remove_proposed_bond(proposed);
        let bond = Bond::from_proposed(proposed);
        let id = string.insert_bond(bond);
        let b = string.bond(id);
        let (from, to) = (b.from_object, b.to_object);
        string.object_mut(from).common_mut().right_bond = Some(id);
        string.object_mut(to).common_mut().left_bond = Some(id);
        id
    }

    pub fn break_bond(&mut self, slipnet: &mut Slipnet, slot: StringSlot, id: BondId) {
        let string = self.string_mut(slot);
        let bond = string.remove_bond(id);
        slipnet.nudge(bond.bond_category, 5);
        if let Some(direction) = bond.direction_category {
            slipnet.nudge(direction, 5);
        }
    }

    // ---- groups ---------------------------------------------------------

    pub fn propose_group(&mut self, proposed: ProposedGroup) {
        let string = self.string_mut(proposed.string);
        if !string.proposed_groups.iter().any(|g| g.left_index == proposed.left_index && g.right_index == proposed.right_index && g.group_category == proposed.group_category) {
            string.proposed_groups.push(proposed);
        }
    }

    pub fn group_strength(&self, slipnet: &Slipnet, proposed: &ProposedGroup) -> f64 {
        let bond_category = proposed
            .bonds
            .first()
            .map(|&id| self.string(proposed.string).bond(id).bond_category)
            .or_else(|| slipnet.get_related_node(proposed.group_category, self.platonic.bond_category));
        let bond_doa = bond_category.map(|c| slipnet.bond_degree_of_association(c) as f64).unwrap_or(0.0);
        let facet_factor = if proposed.bond_facet == Some(self.platonic.letter_category) { 1.0 } else { 0.5 };
        let bond_component = bond_doa * facet_factor;
        let length_component = match proposed.objects.len() {
            1 => 5.0,
            2 => 20.0,
            3 => 60.0,
            _ => 90.0,
        };
        let bond_weight = bond_component.powf(0.98);
        let internal = random::weighted_average(&[bond_weight, 100.0 - bond_weight], &[bond_component, length_component]);

        let string = self.string(proposed.string);
        let spans_whole = proposed.right_index - proposed.left_index + 1 == string.length();
        let external = if spans_whole { 100.0 } else { self.local_support(proposed.string, proposed.group_category, proposed.direction_category, proposed.left_index, proposed.right_index) };
        random::average(internal, external)
    }

    /// / "group fight weighted by letter span" is
    /// silent on external strength, so this carries over `local_support`
    /// from `group.py` -- the count of other same-category/direction groups
    /// in the string (`number_of_local_supporting_groups`) scaled by how
    /// densely they occupy the neighboring slots (`local_density`).
    pub fn local_support(&self, slot: StringSlot, category: SlipId, direction: Option<SlipId>, left: usize, right: usize) -> f64 {
        let string = self.string(slot);
        if right - left + 1 == string.length() {
            return 100.0;
        }
        let supporting = string
            .built_group_ids()
            .filter(|&id| {
                let g = string.group(id);
                g.group_category == category && g.direction_category == direction && (g.right_index < left || g.left_index > right)
            })
            .count();
        if supporting == 0 {
            return 0.0;
        }
        let slots = string.length().saturating_sub(right - left + 1).max(1);
        let density = 100.0 * (supporting as f64 / slots as f64).min(1.0);
        let adjusted_density = 100.0 * (density / 100.0).sqrt();
        let number_factor = (0.6_f64.powf(1.0 / (supporting as f64).powi(3))).min(1.0);
        (adjusted_density * number_factor).round()
    }

    /// re-derives a built group's current strength via `Group::internal_strength`
    /// blended with `local_support` for the external component -- used to
    /// weight it as a fight-it-out incumbent.
    pub fn built_group_strength(&self, slipnet: &Slipnet, slot: StringSlot, id: GroupId) -> f64 {
        let group = self.string(slot).group(id);
        let bond_doa = group.bond_category.map(|c| slipnet.bond_degree_of_association(c) as f64).unwrap_or(0.0);
        let internal = group.internal_strength(self.platonic.letter_category, bond_doa);
        let string = self.string(slot);
        let external = if group.spans_whole_string(string.length()) {
            100.0
        } else {
            self.local_support(slot, group.group_category, group.direction_category, group.left_index, group.right_index)
        };
        random::average(internal, external)
    }

    pub fn duplicate_group(&mut self, slipnet: &mut Slipnet, proposed: &ProposedGroup) -> bool {
        let string = self.string_mut(proposed.string);
        let Some(existing) = string.built_group_ids().find(|&id| proposed.matches_built(string.group(id))) else { return false };
        let category = string.group(existing).group_category;
        string.proposed_groups.retain(|g| !(g.left_index == proposed.left_index && g.right_index == proposed.right_index && g.group_category == proposed.group_category));
        slipnet.nudge(category, 10);
        true
    }

    /// discards a group proposal that failed its strength test.
    pub fn discard_group(&mut self, proposed: &ProposedGroup) {
        let string = self.string_mut(proposed.string);
        string.proposed_groups.retain(|g| {
            !(g.left_index == proposed.left_index && g.right_index == proposed.right_index && g.group_category == proposed.group_category)
        });
    }

    pub fn incompatible_groups_overlapping(&self, slot: StringSlot, left: usize, right: usize) -> Vec<GroupId> {
        let string = self.string(slot);
        string.built_group_ids().filter(|&id| { let g = string.group(id); g.left_index <= right && g.right_index >= left }).collect()
    }

    /// attaches the description set `group.py::__init__` builds (object
    /// category, string position, bond facet/category, and -- with a
    /// length-dependent activation-modulated probability -- a length
    /// descriptor).
    pub fn build_group(&mut self, rng: &mut Stream, slipnet: &Slipnet, temperature: &Temperature, proposed: &ProposedGroup) -> GroupId {
        let bond_category = proposed
            .bonds
            .first()
            .map(|&id| self.string(proposed.string).bond(id).bond_category)
            .or_else(|| slipnet.get_related_node(proposed.group_category, self.platonic.bond_category));
        let string = self.string_mut(proposed.string);
        string.proposed_groups.retain(|g| !(g.left_index == proposed.left_index && g.right_index == proposed.right_index && g.group_category == proposed.group_category));

        let object_id = string.push_group_object(Object::Group {
            common: ObjectCommon::new(proposed.string, proposed.left_index, proposed.right_index),
            group_category: proposed.group_category,
            direction_category: proposed.direction_category,
            bond_facet: proposed.bond_facet,
            objects: proposed.objects.clone(),
            bonds: proposed.bonds.clone(),
            structure: None,
        });
        for &member in &proposed.objects {
            string.object_mut(member).common_mut().parent_group = Some(object_id);
        }

        let platonic = self.platonic;
        let length = string.length();
        let span = proposed.right_index - proposed.left_index + 1;
        let mut descriptions = vec![Description::new(object_id, platonic.object_category, platonic.group_object_category)];
        if span == length {
            descriptions.push(Description::new(object_id, platonic.object_category, platonic.whole));
        } else if proposed.left_index == 0 {
            descriptions.push(Description::new(object_id, platonic.string_position_category, platonic.leftmost));
        } else if proposed.right_index + 1 == length {
            descriptions.push(Description::new(object_id, platonic.string_position_category, platonic.rightmost));
        } else {
            descriptions.push(Description::new(object_id, platonic.string_position_category, platonic.middle));
        }
        descriptions.push(Description::new(object_id, platonic.group_category, proposed.group_category));
        if let Some(direction) = proposed.direction_category {
            descriptions.push(Description::new(object_id, platonic.direction_category, direction));
        }
        if let Some(facet) = proposed.bond_facet {
            descriptions.push(Description::new(object_id, platonic.bond_facet, facet));
        }
        if proposed.group_category == platonic.sameness_group && proposed.bond_facet == Some(platonic.letter_category) {
            if let Some(letter) = string.object(proposed.objects[0]).letter_category() {
                descriptions.push(Description::new(object_id, platonic.letter_category, letter));
            }
        }
        for d in descriptions {
            string.object_mut(object_id).add_description(d);
        }

        let group_length = proposed.objects.len();
        if group_length <= 5 {
            let value = (group_length as f64).powi(3);
            let percent = (100.0 - slipnet.activation(platonic.length) as f64) / 100.0;
            let raw_probability = 0.5_f64.powf(value * percent);
            let probability = temperature.clone().adjust_probability(raw_probability);
            if random::flip_coin(rng, probability) {
                if let Some(number_node) = number_node(&platonic, group_length) {
                    string.object_mut(object_id).add_description(Description::new(object_id, platonic.length, number_node));
                }
            }
        }

        let group = Group::from_proposed(proposed, bond_category, object_id);
        let id = string.insert_group(group);
        if let Object::Group { structure, .. } = string.object_mut(object_id) {
            *structure = Some(id);
        }
        id
    }

    pub fn break_group(&mut self, slipnet: &mut Slipnet, slot: StringSlot, id: GroupId) {
        let string = self.string_mut(slot);
        let group = string.remove_group(id);
        for &member in &group.objects {
            string.object_mut(member).common_mut().parent_group = None;
        }
        string.object_mut(group.object).common_mut().removed = true;
        slipnet.nudge(group.group_category, 5);
        if let Some(direction) = group.direction_category {
            slipnet.nudge(direction, 5);
        }
    }

    // ---- descriptions -----------------------------------------------------

    pub fn propose_description(&mut self, proposed: ProposedDescription) {
        if !self.proposed_descriptions.iter().any(|d| d.object == proposed.object && d.string == proposed.string && d.descriptor == proposed.descriptor) {
            self.proposed_descriptions.push(proposed);
        }
    }

    pub fn description_strength(&self, slipnet: &Slipnet, proposed: &ProposedDescription) -> f64 {
        slipnet.degree_of_association(proposed.descriptor) as f64
    }

    /// discards a description proposal that failed its strength test (spec
    /// SS4.3 step 2: "on tails it discards the proposal").
    pub fn discard_description(&mut self, proposed: &ProposedDescription) {
        self.proposed_descriptions
            .retain(|d| !(d.object == proposed.object && d.string == proposed.string && d.descriptor == proposed.descriptor));
    }

    pub fn build_description(&mut self, proposed: &ProposedDescription) {
        self.proposed_descriptions.retain(|d| !(d.object == proposed.object && d.string == proposed.string && d.descriptor == proposed.descriptor));
        let description = Description::new(proposed.object, proposed.description_type, proposed.descriptor);
        self.string_mut(proposed.string).object_mut(proposed.object).add_description(description);
    }

    // ---- correspondences ----------------------------------------------------

    pub fn propose_correspondence(&mut self, proposed: ProposedCorrespondence) {
        if !self.proposed_correspondences.iter().any(|c| c.initial_object == proposed.initial_object && c.target_object == proposed.target_object) {
            self.proposed_correspondences.push(proposed);
        }
    }

    pub fn correspondence_strength(&self, proposed: &ProposedCorrespondence) -> f64 {
        let real_mappings = proposed.concept_mappings.iter().filter(|m| m.is_slippage() || m.relation.is_some()).count();
        if real_mappings == 0 {
            return 0.0;
        }
        (100.0 * (real_mappings as f64 / 4.0)).min(100.0)
    }

    /// discards a correspondence proposal that failed its strength test.
    pub fn discard_correspondence(&mut self, proposed: &ProposedCorrespondence) {
        self.proposed_correspondences
            .retain(|c| !(c.initial_object == proposed.initial_object && c.target_object == proposed.target_object));
    }

    pub fn duplicate_correspondence(&mut self, proposed: &ProposedCorrespondence) -> bool {
        let exists = self.correspondences.iter().flatten().any(|c| c.initial_object == proposed.initial_object && c.target_object == proposed.target_object);
        if exists {
            self.proposed_correspondences.retain(|c| !(c.initial_object == proposed.initial_object && c.target_object == proposed.target_object));
        }
        exists
    }

    /// correspondences that cross the proposed one on the mapping grid
    ///: any built correspondence
    /// sharing an endpoint, or whose initial/target ordering is inverted
    /// relative to the new one.
    pub fn incompatible_correspondences(&self, proposed: &ProposedCorrespondence) -> Vec<CorrespondenceId> {
        let initial_pos = self.initial.object(proposed.initial_object).left_index();
        let target_pos = self.target.object(proposed.target_object).left_index();
        self.correspondences
            .iter()
            .enumerate()
            .filter_map(|(i, c)| {
                let c = c.as_ref()?;
                let shares = c.initial_object == proposed.initial_object || c.target_object == proposed.target_object;
                let crosses = {
                    let ci = self.initial.object(c.initial_object).left_index();
                    let ct = self.target.object(c.target_object).left_index();
                    (ci < initial_pos && ct > target_pos) || (ci > initial_pos && ct < target_pos)
                };
                (shares || crosses).then_some(CorrespondenceId(i))
            })
            .collect()
    }

    /// re-derives a built correspondence's current strength -- used to weight
    /// it as a fight-it-out incumbent.
    pub fn built_correspondence_strength(&self, id: CorrespondenceId) -> f64 {
        let correspondence = self.correspondence(id);
        let proposed = ProposedCorrespondence {
            initial_object: correspondence.initial_object,
            target_object: correspondence.target_object,
            concept_mappings: correspondence.concept_mappings.clone(),
            accessory: correspondence.accessory,
        };
        self.correspondence_strength(&proposed)
    }

    pub fn build_correspondence(&mut self, proposed: &ProposedCorrespondence) -> CorrespondenceId {
        self.proposed_correspondences.retain(|c| !(c.initial_object == proposed.initial_object && c.target_object == proposed.target_object));
        let correspondence = Correspondence::from_proposed(proposed);
        for &(d1, d2) in &correspondence.slippages().map(|m| (m.descriptor1, m.descriptor2)).collect::<Vec<_>>() {
            if !self.slippages.contains(&(d1, d2)) {
                self.slippages.push((d1, d2));
            }
        }
        let id = CorrespondenceId(self.correspondences.len());
        self.correspondences.push(Some(correspondence));
        self.initial.object_mut(proposed.initial_object).common_mut().correspondence = Some(id);
        self.target.object_mut(proposed.target_object).common_mut().correspondence = Some(id);
        id
    }

    pub fn break_correspondence(&mut self, id: CorrespondenceId) {
        let Some(correspondence) = self.correspondences[id.0].take() else { return };
        self.initial.object_mut(correspondence.initial_object).common_mut().correspondence = None;
        self.target.object_mut(correspondence.target_object).common_mut().correspondence = None;
        for m in correspondence.slippages() {
            self.slippages.retain(|&(d1, d2)| !(d1 == m.descriptor1 && d2 == m.descriptor2));
        }
    }

    pub fn correspondence(&self, id: CorrespondenceId) -> &Correspondence {
        self.correspondences[id.0].as_ref().expect("CorrespondenceId referenced after break")
    }

    pub fn built_correspondence_ids(&self) -> impl Iterator<Item = CorrespondenceId> + '_ {
        self.correspondences.iter().enumerate().filter(|(_, c)| c.is_some()).map(|(i, _)| CorrespondenceId(i))
    }

    // ---- rule -----------------------------------------------------------

    pub fn propose_rule(&mut self, proposed: ProposedRule) {
        if !self.proposed_rules.contains(&proposed) {
            self.proposed_rules.push(proposed);
        }
    }

    pub fn rule_strength(&self, rule: &Rule, slipnet: &Slipnet) -> f64 {
        if rule.is_empty() {
            return 0.0;
        }
        let mut components = Vec::new();
        if let Some(facet) = rule.descriptor1_facet {
            components.push(slipnet.activation(facet) as f64);
        }
        if let Some(relation) = rule.relation {
            components.push(slipnet.degree_of_association(relation) as f64);
        }
        if components.is_empty() {
            50.0
        } else {
            components.iter().sum::<f64>() / components.len() as f64
        }
    }

    pub fn has_proposed_rule_matching(&self, proposed: &ProposedRule) -> bool {
        self.rule.as_ref() == Some(proposed)
    }

    pub fn build_rule(&mut self, proposed: &ProposedRule) {
        self.proposed_rules.retain(|r| r != proposed);
        self.rule = Some(*proposed);
    }

    pub fn break_rule(&mut self) {
        self.rule = None;
    }

    pub fn has_built_rule(&self) -> bool {
        self.rule.is_some_and(|r| !r.is_empty())
    }

    /// "Rule translation": walk the rule's slots, apply each
    /// slippage (identity/opposite accumulated from built correspondences),
    /// and construct the answer letters. Returns `None` on any slot the
    /// translator can't apply (e.g. the replaced descriptor wraps past 'z'),
    /// "failure to apply yields no answer".
    ///
    /// The target object the rule's relation lands on is resolved via the
    /// rule's own slots, not a fixed position: `find_rule_object` locates
    /// the initial-side object whose `(object_category1, descriptor1_facet,
    /// descriptor1)` match, and its built correspondence -- itself
    /// slippage-aware, including position slippage like leftmost<->rightmost
    /// -- gives the target-side object directly. A source object with no
    /// correspondence yet (early in a run) falls back to the target's
    /// rightmost object matching `object_category2`.
    ///
    /// When that object is a Group, the relation is applied at the
    /// descriptor level rather than to one member's position: every member
    /// shifts by the same letter offset, keeping a sameness group uniform
    /// (`kk` -> `ll`, not `kl`). A second case handles group-length
    /// slippage, read off `replaced_descriptor_facet` naming `length` or
    /// (absent that) off the target's top-level objects forming a strict
    /// successor progression of group lengths (`m`, `rr`, `jjj` at lengths
    /// 1, 2, 3): the rule's relation is read as applying to that
    /// progression instead of to the letter, so the group grows or shrinks
    /// by one member at its own unchanged letter (`jjj` -> `jjjj`). This
    /// only changes how many characters `translate_rule` renders for that
    /// group -- it never needs to grow the target string's own letter
    /// arena, since the rendered answer is plain text, not a persisted
    /// workspace structure.
    pub fn translate_rule(&self, slipnet: &Slipnet) -> Option<String> {
        let rule = self.rule?;
        if rule.is_empty() {
            return None;
        }
        let relation = rule.relation?;
        let relation_name = slipnet.node(slipnet.apply_slippages(relation, &self.slippages)).name;
        let delta: i32 = match relation_name {
            "successor" => 1,
            "predecessor" => -1,
            _ => 0,
        };
        let apply = |ch: char| -> Option<char> { if delta == 0 { Some(ch) } else { char_offset(ch, delta) } };

        let target_objects = self.target.top_level_objects();
        if target_objects.is_empty() {
            return None;
        }

        let source_object = self.find_rule_object(&self.initial, rule.object_category1, rule.descriptor1_facet, rule.descriptor1);
        let target_object = source_object
            .and_then(|id| self.initial.object(id).common().correspondence)
            .map(|id| self.correspondence(id).target_object)
            .or_else(|| self.fallback_target_object(rule.object_category2, &target_objects))?;

        let lengths: Vec<usize> = target_objects.iter().map(|&id| self.target.object(id).member_count()).collect();
        let is_length_progression = delta != 0 && lengths.len() > 1 && lengths.windows(2).all(|w| w[1] == w[0] + 1);
        let applies_to_length = rule.replaced_descriptor_facet == Some(self.platonic.length) || is_length_progression;

        let mut result = String::new();
        for &id in &target_objects {
            let obj = self.target.object(id);
            if id != target_object {
                self.render_unchanged(obj, &mut result);
                continue;
            }
            match obj {
                Object::Letter { letter, .. } => result.push(apply(*letter)?),
                Object::Group { group_category, objects, .. } if applies_to_length && *group_category == self.platonic.sameness_group => {
                    let letter = self.target.object(objects[0]).letter()?;
                    let new_length = (objects.len() as i32 + delta).max(1) as usize;
                    result.extend(std::iter::repeat(letter).take(new_length));
                }
                Object::Group { objects, .. } => {
                    for &member in objects {
                        result.push(apply(self.target.object(member).letter()?)?);
                    }
                }
            }
        }
        Some(result)
    }

    /// locates the top-level object in `string` whose `(object_category,
    /// facet, descriptor)` match the rule's source slots, so translation
    /// can follow its built correspondence instead of assuming a fixed
    /// position.
    fn find_rule_object(
        &self,
        string: &WorkspaceString,
        object_category: Option<SlipId>,
        facet: Option<SlipId>,
        descriptor: Option<SlipId>,
    ) -> Option<ObjectId> {
        let facet = facet?;
        let descriptor = descriptor?;
        string.top_level_objects().into_iter().find(|&id| {
            let obj = string.object(id);
            let category_matches = object_category.is_none_or(|category| {
                let actual = if obj.is_group() { self.platonic.group_object_category } else { self.platonic.letter_object_category };
                actual == category
            });
            category_matches && obj.get_descriptor(facet) == Some(descriptor)
        })
    }

    /// the target's rightmost object matching `object_category2`, used
    /// only when the rule's source object has no built correspondence yet.
    fn fallback_target_object(&self, object_category2: Option<SlipId>, target_objects: &[ObjectId]) -> Option<ObjectId> {
        let filtered: Vec<ObjectId> = match object_category2 {
            Some(category) => target_objects
                .iter()
                .copied()
                .filter(|&id| {
                    let obj = self.target.object(id);
                    let actual = if obj.is_group() { self.platonic.group_object_category } else { self.platonic.letter_object_category };
                    actual == category
                })
                .collect(),
            None => target_objects.to_vec(),
        };
        let pool: &[ObjectId] = if filtered.is_empty() { target_objects } else { &filtered };
        pool.iter().copied().max_by_key(|&id| self.target.object(id).right_index())
    }

    /// renders an object's letters unchanged, for every top-level object
    /// but the one the rule's relation lands on.
    fn render_unchanged(&self, obj: &Object, result: &mut String) {
        match obj {
            Object::Letter { letter, .. } => result.push(*letter),
            Object::Group { objects, .. } => {
                for &member in objects {
                    if let Some(ch) = self.target.object(member).letter() {
                        result.push(ch);
                    }
                }
            }
        }
    }

    /// the first position (scanning left to right) where `initial` and
    /// `modified` differ -- where `RuleScout` looks for a difference
    /// between the two strings to build the rule from. General over the
    /// whole string rather than one fixed slot, since `run`/`run_many`
    /// (spec SS6) accept arbitrary initial/modified/target strings, not
    /// just the canonical `abc -> abd` shape.
    pub fn changed_letter(&self) -> Option<(ObjectId, char, char)> {
        let len = self.initial.length().min(self.modified.length());
        for index in 0..len {
            let initial_letter = self.initial.object(ObjectId(index)).letter()?;
            let modified_letter = self.modified.object(ObjectId(index)).letter()?;
            if initial_letter != modified_letter {
                return Some((ObjectId(index), initial_letter, modified_letter));
            }
        }
        None
    }

    /// checks the three structural invariants every built bond/group/
    /// correspondence must hold: a built bond's endpoints are adjacent
    /// top-level neighbors in their string (bond-neighbor invariant), a
    /// built group's span exactly tiles its member objects with no gaps
    /// (group-span invariant), and a built correspondence always links one
    /// `initial` object to one `target` object (cross-string invariant).
    /// Called once per step from the main loop; any violation is a
    /// programming error, surfaced as `CopycatError::BrokenInvariant`
    /// rather than panicking so a caller embedding the engine gets a
    /// normal `Result` back.
    pub fn check_invariants(&self) -> Result<(), CopycatError> {
        for slot in [StringSlot::Initial, StringSlot::Modified, StringSlot::Target] {
            let string = self.string(slot);
            for id in string.built_bond_ids() {
                let bond = string.bond(id);
                let from = string.object(bond.from_object);
                let to = string.object(bond.to_object);
                if to.left_index() != from.right_index() + 1 {
                    return Err(CopycatError::BrokenInvariant(format!(
                        "bond {id:?} in {slot:?} does not connect adjacent neighbors ({}..{} -> {}..{})",
                        from.left_index(),
                        from.right_index(),
                        to.left_index(),
                        to.right_index()
                    )));
                }
            }
            for id in string.built_group_ids() {
                let group = string.group(id);
                let Some(&first_member) = group.objects.first() else {
                    return Err(CopycatError::BrokenInvariant(format!("group {id:?} in {slot:?} has no members")));
                };
                let first = string.object(first_member);
                if first.left_index() != group.left_index {
                    return Err(CopycatError::BrokenInvariant(format!(
                        "group {id:?} in {slot:?} spans from {} but its first member starts at {}",
                        group.left_index,
                        first.left_index()
                    )));
                }
                let last_member = *group.objects.last().expect("checked non-empty above");
                let last = string.object(last_member);
                if last.right_index() != group.right_index {
                    return Err(CopycatError::BrokenInvariant(format!(
                        "group {id:?} in {slot:?} spans to {} but its last member ends at {}",
                        group.right_index,
                        last.right_index()
                    )));
                }
                for pair in group.objects.windows(2) {
                    let a = string.object(pair[0]);
                    let b = string.object(pair[1]);
                    if b.left_index() != a.right_index() + 1 {
                        return Err(CopycatError::BrokenInvariant(format!(
                            "group {id:?} in {slot:?} members are not contiguous ({}..{} then {}..{})",
                            a.left_index(),
                            a.right_index(),
                            b.left_index(),
                            b.right_index()
                        )));
                    }
                }
            }
        }
        for id in self.built_correspondence_ids() {
            let correspondence = self.correspondence(id);
            if !self.initial.object_ids().any(|oid| oid == correspondence.initial_object) {
                return Err(CopycatError::BrokenInvariant(format!(
                    "correspondence {id:?} initial_object {:?} is not an object of the initial string",
                    correspondence.initial_object
                )));
            }
            if !self.target.object_ids().any(|oid| oid == correspondence.target_object) {
                return Err(CopycatError::BrokenInvariant(format!(
                    "correspondence {id:?} target_object {:?} is not an object of the target string",
                    correspondence.target_object
                )));
            }
        }
        Ok(())
    }
}

pub(crate) fn letter_node(platonic: &Platonic, ch: char) -> Option<SlipId> {
    let ch = ch.to_ascii_lowercase();
    if !ch.is_ascii_lowercase() {
        return None;
    }
    Some(platonic.letters[(ch as u8 - b'a') as usize])
}

fn number_node(platonic: &Platonic, length: usize) -> Option<SlipId> {
    if length == 0 || length > platonic.numbers.len() {
        return None;
    }
    Some(platonic.numbers[length - 1])
}

pub(crate) fn char_offset(ch: char, delta: i32) -> Option<char> {
    let base = ch as i32 - 'a' as i32;
    let shifted = base + delta;
    if !(0..=25).contains(&shifted) {
        return None;
    }
    Some((b'a' + shifted as u8) as char)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slipnet::Slipnet;
    use crate::temperature::Temperature;

    fn fixture() -> (Slipnet, Platonic, Workspace) {
        let (slipnet, platonic) = Slipnet::build();
        let workspace = Workspace::new("abc", "abd", "ijk", &platonic);
        (slipnet, platonic, workspace)
    }

    #[test]
    fn built_bond_endpoints_are_neighbors_in_their_string() {
        let (_slipnet, platonic, mut workspace) = fixture();
        let a = workspace.initial.letter_object(0);
        let b = workspace.initial.letter_object(1);
        let proposed = ProposedBond::new(
            StringSlot::Initial,
            a,
            b,
            platonic.successor,
            platonic.letter_category,
            platonic.letters[0],
            platonic.letters[1],
            Some(platonic.right),
        );
        workspace.propose_bond(proposed.clone());
        let id = workspace.build_bond(&proposed);
        let bond = workspace.string(StringSlot::Initial).bond(id);
        let left = workspace.string(StringSlot::Initial).object(bond.from_object).left_index();
        let right = workspace.string(StringSlot::Initial).object(bond.to_object).left_index();
        assert_eq!(right, left + 1);
    }

    #[test]
    fn building_a_bond_clears_its_proposal() {
        let (_slipnet, platonic, mut workspace) = fixture();
        let a = workspace.initial.letter_object(0);
        let b = workspace.initial.letter_object(1);
        let proposed = ProposedBond::new(
            StringSlot::Initial,
            a,
            b,
            platonic.successor,
            platonic.letter_category,
            platonic.letters[0],
            platonic.letters[1],
            Some(platonic.right),
        );
        workspace.propose_bond(proposed.clone());
        assert_eq!(workspace.string(StringSlot::Initial).proposed_bonds.len(), 1);
        workspace.build_bond(&proposed);
        assert!(workspace.string(StringSlot::Initial).proposed_bonds.is_empty());
    }

    #[test]
    fn built_group_span_matches_its_member_count() {
        let (slipnet, platonic, mut workspace) = fixture();
        let a = workspace.initial.letter_object(0);
        let b = workspace.initial.letter_object(1);
        let proposed_bond = ProposedBond::new(
            StringSlot::Initial,
            a,
            b,
            platonic.successor,
            platonic.letter_category,
            platonic.letters[0],
            platonic.letters[1],
            Some(platonic.right),
        );
        workspace.propose_bond(proposed_bond.clone());
        let bond_id = workspace.build_bond(&proposed_bond);
        let proposed_group = ProposedGroup {
            string: StringSlot::Initial,
            group_category: platonic.successor_group,
            direction_category: Some(platonic.right),
            bond_facet: Some(platonic.letter_category),
            left_index: 0,
            right_index: 1,
            objects: vec![a, b],
            bonds: vec![bond_id],
        };
        workspace.propose_group(proposed_group.clone());
        let mut rng = crate::random::stream(Some(1));
        let temperature = Temperature::new(0);
        let group_id = workspace.build_group(&mut rng, &slipnet, &temperature, &proposed_group);
        let group = workspace.string(StringSlot::Initial).group(group_id);
        assert_eq!(group.right_index - group.left_index + 1, group.objects.len());
    }

    #[test]
    fn correspondence_always_links_initial_to_target() {
        let (_slipnet, _platonic, mut workspace) = fixture();
        let i = workspace.initial.letter_object(0);
        let t = workspace.target.letter_object(0);
        let proposed = ProposedCorrespondence { initial_object: i, target_object: t, concept_mappings: Vec::new(), accessory: false };
        workspace.propose_correspondence(proposed.clone());
        let id = workspace.build_correspondence(&proposed);
        let correspondence = workspace.correspondence(id);
        assert_eq!(correspondence.initial_object, i);
        assert_eq!(correspondence.target_object, t);
    }
}
