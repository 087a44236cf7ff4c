//! The codelet zoo: tagged variants over
//! (coderack, slipnet, workspace), grounded on the
//! `BondBottomUpScout` / `BondBuilder` / `BondStrengthTester` /
//! `BondTopDownCategoryScout` / `BondTopDownDirectionScout` family in
//! `original_source/copycat-ajhager/copycat/coderack/codelets/bond.py`,
//! generalized to bonds, groups, descriptions, correspondences, and the rule.

use crate::slipnet::SlipId;
use crate::workspace::{
    ProposedBond, ProposedCorrespondence, ProposedDescription, ProposedGroup, ProposedRule,
};

/// a structure-category tag, used for `Coderack::clear_category`
/// and for matching a slipnode's attached codelet templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructureCategory {
    Bond,
    Group,
    Description,
    Correspondence,
    Rule,
}

#[derive(Debug, Clone)]
pub enum CodeletKind {
    BondBottomUpScout,
    BondTopDownCategoryScout { category: SlipId },
    BondTopDownDirectionScout { direction: SlipId },
    BondStrengthTester { bond: ProposedBond },
    BondBuilder { bond: ProposedBond, strength: f64 },
    BondBreaker,

    GroupBottomUpScout,
    GroupTopDownCategoryScout { category: SlipId },
    GroupTopDownDirectionScout { direction: SlipId },
    SingleLetterGroupScout,
    GroupStrengthTester { group: ProposedGroup },
    GroupBuilder { group: ProposedGroup, strength: f64 },
    GroupBreaker,

    DescriptionBottomUpScout,
    TopDownDescriptionScout { descriptor: SlipId },
    DescriptionStrengthTester { description: ProposedDescription },
    DescriptionBuilder { description: ProposedDescription },

    CorrespondenceBottomUpScout,
    CorrespondenceStrengthTester { correspondence: ProposedCorrespondence },
    CorrespondenceBuilder { correspondence: ProposedCorrespondence, strength: f64 },
    CorrespondenceBreaker,

    RuleScout,
    RuleStrengthTester { rule: ProposedRule },
    RuleBuilder { rule: ProposedRule, strength: f64 },
    RuleBreaker,
    RuleTranslator,
}

impl CodeletKind {
    /// the structure category this codelet contributes to, used to decide
    /// which category to clear once a rule is built and for top-down
    /// template registration.
    pub fn structure_category(&self) -> StructureCategory {
        match self {
            Self::BondBottomUpScout
            | Self::BondTopDownCategoryScout { .. }
            | Self::BondTopDownDirectionScout { .. }
            | Self::BondStrengthTester { .. }
            | Self::BondBuilder { .. }
            | Self::BondBreaker => StructureCategory::Bond,

            Self::GroupBottomUpScout
            | Self::GroupTopDownCategoryScout { .. }
            | Self::GroupTopDownDirectionScout { .. }
            | Self::SingleLetterGroupScout
            | Self::GroupStrengthTester { .. }
            | Self::GroupBuilder { .. }
            | Self::GroupBreaker => StructureCategory::Group,

            Self::DescriptionBottomUpScout
            | Self::TopDownDescriptionScout { .. }
            | Self::DescriptionStrengthTester { .. }
            | Self::DescriptionBuilder { .. } => StructureCategory::Description,

            Self::CorrespondenceBottomUpScout
            | Self::CorrespondenceStrengthTester { .. }
            | Self::CorrespondenceBuilder { .. }
            | Self::CorrespondenceBreaker => StructureCategory::Correspondence,

            Self::RuleScout
            | Self::RuleStrengthTester { .. }
            | Self::RuleBuilder { .. }
            | Self::RuleBreaker
            | Self::RuleTranslator => StructureCategory::Rule,
        }
    }

    /// a short stable tag, used as the registration key for slipnode codelet
    /// templates.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::BondBottomUpScout => "bond-bottom-up-scout",
            Self::BondTopDownCategoryScout { .. } => "bond-top-down-category-scout",
            Self::BondTopDownDirectionScout { .. } => "bond-top-down-direction-scout",
            Self::BondStrengthTester { .. } => "bond-strength-tester",
            Self::BondBuilder { .. } => "bond-builder",
            Self::BondBreaker => "bond-breaker",
            Self::GroupBottomUpScout => "group-bottom-up-scout",
            Self::GroupTopDownCategoryScout { .. } => "group-top-down-category-scout",
            Self::GroupTopDownDirectionScout { .. } => "group-top-down-direction-scout",
            Self::SingleLetterGroupScout => "single-letter-group-scout",
            Self::GroupStrengthTester { .. } => "group-strength-tester",
            Self::GroupBuilder { .. } => "group-builder",
            Self::GroupBreaker => "group-breaker",
            Self::DescriptionBottomUpScout => "description-bottom-up-scout",
            Self::TopDownDescriptionScout { .. } => "top-down-description-scout",
            Self::DescriptionStrengthTester { .. } => "description-strength-tester",
            Self::DescriptionBuilder { .. } => "description-builder",
            Self::CorrespondenceBottomUpScout => "correspondence-bottom-up-scout",
            Self::CorrespondenceStrengthTester { .. } => "correspondence-strength-tester",
            Self::CorrespondenceBuilder { .. } => "correspondence-builder",
            Self::CorrespondenceBreaker => "correspondence-breaker",
            Self::RuleScout => "rule-scout",
            Self::RuleStrengthTester { .. } => "rule-strength-tester",
            Self::RuleBuilder { .. } => "rule-builder",
            Self::RuleBreaker => "rule-breaker",
            Self::RuleTranslator => "rule-translator",
        }
    }
}
