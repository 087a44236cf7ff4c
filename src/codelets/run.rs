//! Codelet dispatch: a flat switch over
//! `CodeletKind` that runs one small scripted transaction against
//! (coderack's caller, slipnet, workspace, temperature), grounded
//! throughout on `original_source/copycat-ajhager/copycat/coderack/codelets/bond.py`
//! and generalized per-structure-kind the way that file's five bond codelets
//! generalize to groups, descriptions, correspondences, and the rule.

use crate::codelets::CodeletKind;
use crate::random::{self, Stream};
use crate::slipnet::{Platonic, SlipId, Slipnet};
use crate::temperature::Temperature;
use crate::workspace::{
    ConceptMapping, Description, Object, ProposedCorrespondence, ProposedDescription, ProposedGroup,
    Rule, Salience, StringSlot, Workspace,
};
use crate::Urgency;

/// what running one codelet produced: either it fizzled (no structure built,
/// possibly only activation nudges as a side effect) or it posted zero or
/// more follow-up codelets ("any returned (codelet, urgency)
/// pairs are posted").
#[derive(Debug)]
pub enum CodeletOutcome {
    Fizzle,
    Posted(Vec<(CodeletKind, Urgency)>),
}

/// the canonical competitive acceptance rule: `N`
/// wins a weighted draw against its incumbents, strengths bent through
/// `Temperature::adjust_value` first so low temperature favors the stronger
/// side almost deterministically. An empty incumbent set is an unconditional
/// win.
fn fight_it_out(
    rng: &mut Stream,
    temperature: &Temperature,
    new_strength: f64,
    new_weight: f64,
    incumbents: &[(f64, f64)],
) -> bool {
    if incumbents.is_empty() {
        return true;
    }
    let adjust = |strength: f64| temperature.adjust_value((strength / 100.0).clamp(0.0, 1.0));
    let mut weights = Vec::with_capacity(incumbents.len() + 1);
    weights.push(adjust(new_strength) * new_weight.max(0.01));
    weights.extend(incumbents.iter().map(|&(strength, weight)| adjust(strength) * weight.max(0.01)));
    match random::weighted_index(rng, &weights) {
        Some(0) => true,
        Some(_) => false,
        None => true,
    }
}

/// the group-category node that corresponds to a bond-category node; there
/// is no generic slipnet query for this direction (only the forward
/// `group_category -[HasProperty]-> bond_category` edge exists), so it's
/// resolved directly off `Platonic`.
fn group_category_for(platonic: &Platonic, bond_category: SlipId) -> SlipId {
    if bond_category == platonic.predecessor {
        platonic.predecessor_group
    } else if bond_category == platonic.successor {
        platonic.successor_group
    } else {
        platonic.sameness_group
    }
}

/// one concept mapping per shared description type between an initial-side
/// and target-side object: identical descriptors
/// are an identity mapping, descriptors linked by the slipnet's `opposite`
/// lateral-slip are an opposite mapping, anything else is recorded without a
/// relation label.
fn concept_mappings(slipnet: &Slipnet, platonic: &Platonic, initial: &[Description], target: &[Description]) -> Vec<ConceptMapping> {
    let mut mappings = Vec::new();
    for id in initial {
        let Some(td) = target.iter().find(|t| t.description_type == id.description_type) else { continue };
        let relation = if id.descriptor == td.descriptor {
            Some(platonic.identity)
        } else if slipnet.get_related_node(id.descriptor, platonic.opposite) == Some(td.descriptor) {
            Some(platonic.opposite)
        } else {
            None
        };
        mappings.push(ConceptMapping {
            description_type1: id.description_type,
            description_type2: td.description_type,
            descriptor1: id.descriptor,
            descriptor2: td.descriptor,
            relation,
            label: relation,
        });
    }
    mappings
}

const ALL_STRINGS: [StringSlot; 3] = [StringSlot::Initial, StringSlot::Modified, StringSlot::Target];

/// runs one codelet to completion: reads and mutates `workspace`/`slipnet`/`temperature`,
/// and returns whatever follow-up codelets it posts. The caller (the main
/// loop in `run.rs`) owns re-posting them onto the coderack.
pub fn run_codelet(
    kind: CodeletKind,
    rng: &mut Stream,
    slipnet: &mut Slipnet,
    workspace: &mut Workspace,
    temperature: &mut Temperature,
) -> CodeletOutcome {
    match kind {
        // ---- bonds ----------------------------------------------------
        CodeletKind::BondBottomUpScout => {
            let Some(slot) = random::uniform_select(rng, &ALL_STRINGS).copied() else { return CodeletOutcome::Fizzle };
            bond_scout(rng, slipnet, workspace, slot, None, None)
        }
        CodeletKind::BondTopDownCategoryScout { category } => {
            let slot = workspace.choose_string_by_relevance(rng, |s| s.local_bond_category_relevance(category));
            bond_scout(rng, slipnet, workspace, slot, Some(category), None)
        }
        CodeletKind::BondTopDownDirectionScout { direction } => {
            let slot = workspace.choose_string_by_relevance(rng, |s| s.local_direction_category_relevance(direction));
            bond_scout(rng, slipnet, workspace, slot, None, Some(direction))
        }
        CodeletKind::BondStrengthTester { bond } => {
            if workspace.duplicate_bond(slipnet, &bond) {
                return CodeletOutcome::Fizzle;
            }
            let strength = workspace.bond_strength(slipnet, &bond);
            let probability = temperature.adjust_probability(strength / 100.0);
            if random::flip_coin(rng, probability) {
                workspace.mark_bond_evaluated(&bond);
                slipnet.nudge(bond.bond_category, 5);
                if let Some(direction) = bond.direction_category {
                    slipnet.nudge(direction, 5);
                }
                CodeletOutcome::Posted(vec![(CodeletKind::BondBuilder { bond, strength }, strength)])
            } else {
                workspace.string_mut(bond.string).remove_proposed_bond(&bond);
                CodeletOutcome::Fizzle
            }
        }
        CodeletKind::BondBuilder { bond, strength } => {
            if workspace.duplicate_bond(slipnet, &bond) {
                return CodeletOutcome::Fizzle;
            }
            let slot = bond.string;
            let incompatible_bonds = workspace.incompatible_bonds(slot, bond.from_object, bond.to_object);
            let incompatible_groups = workspace.incompatible_groups_for_bond(slot, bond.from_object, bond.to_object);
            let incompatible_correspondences = workspace.incompatible_correspondences_for_bond(slipnet, &bond);

            let bond_incumbents: Vec<(f64, f64)> =
                incompatible_bonds.iter().map(|&id| (workspace.built_bond_strength(slipnet, slot, id), 1.0)).collect();
            if !fight_it_out(rng, temperature, strength, 1.0, &bond_incumbents) {
                return CodeletOutcome::Fizzle;
            }

            let group_weight =
                incompatible_groups.iter().map(|&id| workspace.string(slot).group(id).letter_span() as f64).fold(0.0, f64::max);
            let group_incumbents: Vec<(f64, f64)> = incompatible_groups
                .iter()
                .map(|&id| (workspace.built_group_strength(slipnet, slot, id), group_weight))
                .collect();
            if !fight_it_out(rng, temperature, strength, 1.0, &group_incumbents) {
                return CodeletOutcome::Fizzle;
            }

            let correspondence_incumbents: Vec<(f64, f64)> = incompatible_correspondences
                .iter()
                .map(|&id| (workspace.built_correspondence_strength(id), 3.0))
                .collect();
            if !fight_it_out(rng, temperature, strength, 2.0, &correspondence_incumbents) {
                return CodeletOutcome::Fizzle;
            }

            for id in incompatible_bonds {
                workspace.break_bond(slipnet, slot, id);
            }
            for id in incompatible_groups {
                workspace.break_group(slipnet, slot, id);
            }
            for id in incompatible_correspondences {
                workspace.break_correspondence(id);
            }
            workspace.build_bond(&bond);
            log::trace!("built bond in {slot:?}");
            CodeletOutcome::Posted(Vec::new())
        }
        CodeletKind::BondBreaker => {
            let Some(slot) = random::uniform_select(rng, &ALL_STRINGS).copied() else { return CodeletOutcome::Fizzle };
            let ids: Vec<_> = workspace.string(slot).built_bond_ids().collect();
            if ids.is_empty() {
                return CodeletOutcome::Fizzle;
            }
            let weights: Vec<f64> = ids.iter().map(|&id| 100.0 - workspace.built_bond_strength(slipnet, slot, id)).collect();
            let Some(id) = random::weighted_select(rng, &weights, ids) else { return CodeletOutcome::Fizzle };
            workspace.break_bond(slipnet, slot, id);
            CodeletOutcome::Posted(Vec::new())
        }

        // ---- groups -----------------------------------------------------
        CodeletKind::GroupBottomUpScout => {
            let Some(slot) = random::uniform_select(rng, &ALL_STRINGS).copied() else { return CodeletOutcome::Fizzle };
            group_scout(rng, slipnet, workspace, slot, None, None)
        }
        CodeletKind::GroupTopDownCategoryScout { category } => {
            let slot = workspace.choose_string_by_relevance(rng, |s| s.local_bond_category_relevance(category));
            group_scout(rng, slipnet, workspace, slot, Some(category), None)
        }
        CodeletKind::GroupTopDownDirectionScout { direction } => {
            let slot = workspace.choose_string_by_relevance(rng, |s| s.local_direction_category_relevance(direction));
            group_scout(rng, slipnet, workspace, slot, None, Some(direction))
        }
        CodeletKind::SingleLetterGroupScout => {
            let Some(slot) = random::uniform_select(rng, &ALL_STRINGS).copied() else { return CodeletOutcome::Fizzle };
            let string = workspace.string(slot);
            if string.length() != 1 {
                return CodeletOutcome::Fizzle;
            }
            let object = string.letter_object(0);
            if string.object(object).common().parent_group.is_some() {
                return CodeletOutcome::Fizzle;
            }
            let platonic = workspace.platonic;
            let proposed = ProposedGroup {
                string: slot,
                group_category: platonic.sameness_group,
                direction_category: None,
                bond_facet: Some(platonic.letter_category),
                left_index: 0,
                right_index: 0,
                objects: vec![object],
                bonds: Vec::new(),
            };
            workspace.propose_group(proposed.clone());
            let urgency = (slipnet.activation(platonic.length) as f64).max(10.0);
            CodeletOutcome::Posted(vec![(CodeletKind::GroupStrengthTester { group: proposed }, urgency)])
        }
        CodeletKind::GroupStrengthTester { group } => {
            if workspace.duplicate_group(slipnet, &group) {
                return CodeletOutcome::Fizzle;
            }
            let strength = workspace.group_strength(slipnet, &group);
            let probability = temperature.adjust_probability(strength / 100.0);
            if random::flip_coin(rng, probability) {
                slipnet.nudge(group.group_category, 5);
                if let Some(direction) = group.direction_category {
                    slipnet.nudge(direction, 5);
                }
                CodeletOutcome::Posted(vec![(CodeletKind::GroupBuilder { group, strength }, strength)])
            } else {
                workspace.discard_group(&group);
                CodeletOutcome::Fizzle
            }
        }
        CodeletKind::GroupBuilder { group, strength } => {
            if workspace.duplicate_group(slipnet, &group) {
                return CodeletOutcome::Fizzle;
            }
            let incompatibles = workspace.incompatible_groups_overlapping(group.string, group.left_index, group.right_index);
            let weight = incompatibles.iter().map(|&id| workspace.string(group.string).group(id).letter_span() as f64).fold(0.0, f64::max);
            let incumbents: Vec<(f64, f64)> =
                incompatibles.iter().map(|&id| (workspace.built_group_strength(slipnet, group.string, id), weight)).collect();
            if !fight_it_out(rng, temperature, strength, 1.0, &incumbents) {
                return CodeletOutcome::Fizzle;
            }
            for id in incompatibles {
                workspace.break_group(slipnet, group.string, id);
            }
            workspace.build_group(rng, slipnet, temperature, &group);
            log::trace!("built group in {:?}", group.string);
            CodeletOutcome::Posted(Vec::new())
        }
        CodeletKind::GroupBreaker => {
            let Some(slot) = random::uniform_select(rng, &ALL_STRINGS).copied() else { return CodeletOutcome::Fizzle };
            let ids: Vec<_> = workspace.string(slot).built_group_ids().collect();
            if ids.is_empty() {
                return CodeletOutcome::Fizzle;
            }
            let weights: Vec<f64> = ids.iter().map(|&id| 100.0 - workspace.built_group_strength(slipnet, slot, id)).collect();
            let Some(id) = random::weighted_select(rng, &weights, ids) else { return CodeletOutcome::Fizzle };
            workspace.break_group(slipnet, slot, id);
            CodeletOutcome::Posted(Vec::new())
        }

        // ---- descriptions -------------------------------------------------
        CodeletKind::DescriptionBottomUpScout => {
            let Some(slot) = random::uniform_select(rng, &ALL_STRINGS).copied() else { return CodeletOutcome::Fizzle };
            let Some(object) = workspace.choose_object(rng, slot, Salience::Intra) else { return CodeletOutcome::Fizzle };
            let platonic = workspace.platonic;
            let is_group = workspace.string(slot).object(object).is_group();
            let object_category = if is_group { platonic.group_object_category } else { platonic.letter_object_category };
            if workspace.string(slot).object(object).is_description_type_present(platonic.object_category) {
                return CodeletOutcome::Fizzle;
            }
            let proposed = ProposedDescription { string: slot, object, description_type: platonic.object_category, descriptor: object_category };
            workspace.propose_description(proposed.clone());
            let urgency = slipnet.degree_of_association(object_category) as f64;
            CodeletOutcome::Posted(vec![(CodeletKind::DescriptionStrengthTester { description: proposed }, urgency)])
        }
        CodeletKind::TopDownDescriptionScout { descriptor } => {
            let Some(description_type) = slipnet.category_of(descriptor) else { return CodeletOutcome::Fizzle };
            let slot = workspace.choose_string_by_relevance(rng, |_| 0.0);
            let Some(object) = workspace.choose_object(rng, slot, Salience::Total) else { return CodeletOutcome::Fizzle };
            if workspace.string(slot).object(object).is_description_type_present(description_type) {
                return CodeletOutcome::Fizzle;
            }
            let proposed = ProposedDescription { string: slot, object, description_type, descriptor };
            workspace.propose_description(proposed.clone());
            let urgency = slipnet.degree_of_association(descriptor) as f64;
            CodeletOutcome::Posted(vec![(CodeletKind::DescriptionStrengthTester { description: proposed }, urgency)])
        }
        CodeletKind::DescriptionStrengthTester { description } => {
            let strength = workspace.description_strength(slipnet, &description);
            let probability = temperature.adjust_probability(strength / 100.0);
            if random::flip_coin(rng, probability) {
                CodeletOutcome::Posted(vec![(CodeletKind::DescriptionBuilder { description }, strength)])
            } else {
                workspace.discard_description(&description);
                CodeletOutcome::Fizzle
            }
        }
        CodeletKind::DescriptionBuilder { description } => {
            workspace.build_description(&description);
            CodeletOutcome::Posted(Vec::new())
        }

        // ---- correspondences ----------------------------------------------
        CodeletKind::CorrespondenceBottomUpScout => {
            let Some(initial_object) = workspace.choose_object(rng, StringSlot::Initial, Salience::Intra) else {
                return CodeletOutcome::Fizzle;
            };
            let Some(target_object) = workspace.choose_object(rng, StringSlot::Target, Salience::Intra) else {
                return CodeletOutcome::Fizzle;
            };
            let initial_descs = workspace.initial.descriptions_of(initial_object).to_vec();
            let target_descs = workspace.target.descriptions_of(target_object).to_vec();
            let mappings = concept_mappings(slipnet, &workspace.platonic, &initial_descs, &target_descs);
            if mappings.is_empty() {
                return CodeletOutcome::Fizzle;
            }
            let proposed = ProposedCorrespondence { initial_object, target_object, concept_mappings: mappings, accessory: false };
            workspace.propose_correspondence(proposed.clone());
            let urgency = workspace.correspondence_strength(&proposed).max(20.0);
            CodeletOutcome::Posted(vec![(CodeletKind::CorrespondenceStrengthTester { correspondence: proposed }, urgency)])
        }
        CodeletKind::CorrespondenceStrengthTester { correspondence } => {
            if workspace.duplicate_correspondence(&correspondence) {
                return CodeletOutcome::Fizzle;
            }
            let strength = workspace.correspondence_strength(&correspondence);
            let probability = temperature.adjust_probability(strength / 100.0);
            if random::flip_coin(rng, probability) {
                CodeletOutcome::Posted(vec![(CodeletKind::CorrespondenceBuilder { correspondence, strength }, strength)])
            } else {
                workspace.discard_correspondence(&correspondence);
                CodeletOutcome::Fizzle
            }
        }
        CodeletKind::CorrespondenceBuilder { correspondence, strength } => {
            if workspace.duplicate_correspondence(&correspondence) {
                return CodeletOutcome::Fizzle;
            }
            let incompatibles = workspace.incompatible_correspondences(&correspondence);
            let weight = correspondence.concept_mappings.len() as f64;
            let incumbents: Vec<(f64, f64)> = incompatibles
                .iter()
                .map(|&id| (workspace.built_correspondence_strength(id), weight))
                .collect();
            if !fight_it_out(rng, temperature, strength, weight, &incumbents) {
                return CodeletOutcome::Fizzle;
            }
            for id in incompatibles {
                workspace.break_correspondence(id);
            }
            workspace.build_correspondence(&correspondence);
            log::trace!("built correspondence");
            CodeletOutcome::Posted(Vec::new())
        }
        CodeletKind::CorrespondenceBreaker => {
            let ids: Vec<_> = workspace.built_correspondence_ids().collect();
            if ids.is_empty() {
                return CodeletOutcome::Fizzle;
            }
            let weights: Vec<f64> = ids.iter().map(|&id| 100.0 - workspace.built_correspondence_strength(id)).collect();
            let Some(id) = random::weighted_select(rng, &weights, ids) else { return CodeletOutcome::Fizzle };
            workspace.break_correspondence(id);
            CodeletOutcome::Posted(Vec::new())
        }

        // ---- rule -----------------------------------------------------
        CodeletKind::RuleScout => {
            let Some((_, initial_letter, modified_letter)) = workspace.changed_letter() else {
                return CodeletOutcome::Fizzle;
            };
            let platonic = workspace.platonic;
            let relation = if crate::workspace::char_offset(initial_letter, 1) == Some(modified_letter) {
                platonic.successor
            } else if crate::workspace::char_offset(initial_letter, -1) == Some(modified_letter) {
                platonic.predecessor
            } else {
                return CodeletOutcome::Fizzle;
            };
            let Some(descriptor1) = crate::workspace::letter_node(&platonic, initial_letter) else {
                return CodeletOutcome::Fizzle;
            };
            let rule = Rule {
                object_category1: Some(platonic.letter_object_category),
                descriptor1_facet: Some(platonic.letter_category),
                descriptor1: Some(descriptor1),
                object_category2: Some(platonic.letter_object_category),
                replaced_descriptor_facet: Some(platonic.letter_category),
                relation: Some(relation),
            };
            workspace.propose_rule(rule);
            let urgency = slipnet.degree_of_association(relation) as f64;
            CodeletOutcome::Posted(vec![(CodeletKind::RuleStrengthTester { rule }, urgency)])
        }
        CodeletKind::RuleStrengthTester { rule } => {
            if workspace.has_proposed_rule_matching(&rule) {
                if let Some(relation) = rule.relation {
                    slipnet.nudge(relation, 10);
                }
                return CodeletOutcome::Fizzle;
            }
            let strength = workspace.rule_strength(&rule, slipnet);
            let probability = temperature.adjust_probability(strength / 100.0);
            if random::flip_coin(rng, probability) {
                if let Some(relation) = rule.relation {
                    slipnet.nudge(relation, 5);
                }
                CodeletOutcome::Posted(vec![(CodeletKind::RuleBuilder { rule, strength }, strength)])
            } else {
                workspace.proposed_rules.retain(|r| r != &rule);
                CodeletOutcome::Fizzle
            }
        }
        CodeletKind::RuleBuilder { rule, strength } => {
            let incumbent = workspace.rule.map(|existing| workspace.rule_strength(&existing, slipnet));
            let incumbents: Vec<(f64, f64)> = incumbent.into_iter().map(|s| (s, 1.0)).collect();
            if !fight_it_out(rng, temperature, strength, 1.0, &incumbents) {
                return CodeletOutcome::Fizzle;
            }
            workspace.break_rule();
            workspace.build_rule(&rule);
            log::debug!("built rule");
            CodeletOutcome::Posted(vec![(CodeletKind::RuleTranslator, 100.0)])
        }
        CodeletKind::RuleBreaker => {
            let Some(rule) = workspace.rule else { return CodeletOutcome::Fizzle };
            let strength = workspace.rule_strength(&rule, slipnet);
            if random::flip_coin(rng, (1.0 - strength / 100.0).max(0.0)) {
                workspace.break_rule();
                CodeletOutcome::Posted(Vec::new())
            } else {
                CodeletOutcome::Fizzle
            }
        }
        CodeletKind::RuleTranslator => {
            if workspace.translate_rule(slipnet).is_some() {
                CodeletOutcome::Posted(Vec::new())
            } else {
                log::trace!("rule translation produced no answer this attempt");
                CodeletOutcome::Fizzle
            }
        }
    }
}

/// shared scout body for all three bond-scout kinds: pick a
/// neighboring pair, pick a coherent facet, resolve the bond category the
/// slipnet says links their descriptors, and propose it.
fn bond_scout(
    rng: &mut Stream,
    slipnet: &Slipnet,
    workspace: &mut Workspace,
    slot: StringSlot,
    required_category: Option<SlipId>,
    required_direction: Option<SlipId>,
) -> CodeletOutcome {
    let Some(object) = workspace.choose_object(rng, slot, Salience::Intra) else { return CodeletOutcome::Fizzle };
    let neighbor = if random::flip_coin(rng, 0.5) {
        workspace.string(slot).choose_left_neighbor(object)
    } else {
        workspace.string(slot).choose_right_neighbor(object)
    };
    let Some(neighbor) = neighbor else { return CodeletOutcome::Fizzle };
    let (left, right) = if workspace.string(slot).object(object).left_index() < workspace.string(slot).object(neighbor).left_index() {
        (object, neighbor)
    } else {
        (neighbor, object)
    };
    let Some(facet) = workspace.choose_bond_facet(rng, slipnet, slot, left, right) else { return CodeletOutcome::Fizzle };
    let string = workspace.string(slot);
    let (Some(from_descriptor), Some(to_descriptor)) =
        (string.object(left).get_descriptor(facet), string.object(right).get_descriptor(facet))
    else {
        return CodeletOutcome::Fizzle;
    };
    let Some(bond_category) = slipnet.get_bond_category(from_descriptor, to_descriptor) else { return CodeletOutcome::Fizzle };
    if required_category.is_some_and(|c| c != bond_category) {
        return CodeletOutcome::Fizzle;
    }
    let directed = slipnet.node(bond_category).directed;
    let direction_category = if directed { Some(required_direction.unwrap_or(workspace.platonic.right)) } else { None };
    if required_direction.is_some_and(|d| direction_category != Some(d)) {
        return CodeletOutcome::Fizzle;
    }
    let proposed = crate::workspace::ProposedBond::new(slot, left, right, bond_category, facet, from_descriptor, to_descriptor, direction_category);
    workspace.propose_bond(proposed.clone());
    let urgency = slipnet.bond_degree_of_association(bond_category) as f64;
    CodeletOutcome::Posted(vec![(CodeletKind::BondStrengthTester { bond: proposed }, urgency)])
}

/// shared scout body for the three bond-seeded group-scout kinds: pick a
/// built bond, then extend its span outward over every adjacent,
/// ungrouped bond of the same category/facet/direction -- a sameness run
/// of three or more bonded letters (`aaa`) forms one group, not a chain of
/// 2-object groups contending for the same letters.
fn group_scout(
    rng: &mut Stream,
    slipnet: &Slipnet,
    workspace: &mut Workspace,
    slot: StringSlot,
    required_category: Option<SlipId>,
    required_direction: Option<SlipId>,
) -> CodeletOutcome {
    let string = workspace.string(slot);
    let candidates: Vec<_> = string
        .built_bond_ids()
        .filter(|&id| {
            let bond = string.bond(id);
            string.object(bond.from_object).common().parent_group.is_none()
                && string.object(bond.to_object).common().parent_group.is_none()
                && required_category.is_none_or(|c| c == bond.bond_category)
                && required_direction.is_none_or(|d| bond.direction_category == Some(d))
        })
        .collect();
    let Some(&bond_id) = random::uniform_select(rng, &candidates) else { return CodeletOutcome::Fizzle };
    let (category, facet, direction, seed_from, seed_to) = {
        let bond = string.bond(bond_id);
        (bond.bond_category, bond.bond_facet, bond.direction_category, bond.from_object, bond.to_object)
    };

    let mut objects = vec![seed_from, seed_to];
    let mut bonds = vec![bond_id];
    while let Some(left_id) = string.object(objects[0]).common().left_bond {
        let left = string.bond(left_id);
        if left.bond_category != category || left.bond_facet != facet || left.direction_category != direction {
            break;
        }
        if string.object(left.from_object).common().parent_group.is_some() {
            break;
        }
        objects.insert(0, left.from_object);
        bonds.insert(0, left_id);
    }
    while let Some(right_id) = string.object(*objects.last().expect("non-empty")).common().right_bond {
        let right = string.bond(right_id);
        if right.bond_category != category || right.bond_facet != facet || right.direction_category != direction {
            break;
        }
        if string.object(right.to_object).common().parent_group.is_some() {
            break;
        }
        objects.push(right.to_object);
        bonds.push(right_id);
    }

    let left_index = string.object(objects[0]).left_index();
    let right_index = string.object(*objects.last().expect("non-empty")).right_index();
    let group_category = group_category_for(&workspace.platonic, category);
    let proposed = ProposedGroup {
        string: slot,
        group_category,
        direction_category: direction,
        bond_facet: Some(facet),
        left_index,
        right_index,
        objects,
        bonds,
    };
    workspace.propose_group(proposed.clone());
    let urgency = slipnet.bond_degree_of_association(category) as f64;
    CodeletOutcome::Posted(vec![(CodeletKind::GroupStrengthTester { group: proposed }, urgency)])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zero_temperature() -> Temperature {
        let mut temperature = Temperature::new(0);
        temperature.try_unclamp(0);
        temperature.update(0.0);
        temperature
    }

    #[test]
    fn an_unopposed_candidate_always_wins() {
        let temperature = zero_temperature();
        let mut rng = random::stream(Some(1));
        assert!(fight_it_out(&mut rng, &temperature, 1.0, 1.0, &[]));
    }

    /// "Fight-it-out monotonicity": at T = 0, raising the
    /// candidate's strength at a fixed incumbent strength never lowers its
    /// win probability.
    #[test]
    fn higher_strength_wins_more_often_at_zero_temperature() {
        let temperature = zero_temperature();
        let trials = 4000;
        let win_rate = |new_strength: f64| -> f64 {
            let mut rng = random::stream(Some(123));
            let wins = (0..trials).filter(|_| fight_it_out(&mut rng, &temperature, new_strength, 1.0, &[(50.0, 1.0)])).count();
            wins as f64 / trials as f64
        };
        let low = win_rate(20.0);
        let mid = win_rate(50.0);
        let high = win_rate(80.0);
        assert!(low < mid, "low={low} mid={mid}");
        assert!(mid < high, "mid={mid} high={high}");
    }
}
