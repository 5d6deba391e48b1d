//! Rule lookup through the world-state layers.

use crate::error::{ErrorSeverity, SpellError};
use crate::spell::SpellKind;
use crate::state::{Sections, SpellRule};

/// A configuration node that was expected but is absent.
///
/// The `Display` form names the missing path and tells the author where to
/// add it.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MissingConfig {
    #[error(
        "no \"{section}\" section found in world state; make sure one exists for the current map"
    )]
    Section { section: String },

    #[error(
        "no \"{section}.entities\" table found in world state; add an \"entities\" table to this section listing every spellable object"
    )]
    Entities { section: String },

    #[error(
        "no \"{entity}\" entity found in \"{section}.entities\"; make sure it shares the name of the Tiled object's \"group\" property (or \"key\" if no group is set)"
    )]
    Entity { section: String, entity: String },

    #[error(
        "no \"{spell}\" rule found in \"{section}.entities[\"{entity}\"].spell\"; add a \"spell.{spell}\" rule for this entity, or remove \"spellable\" from the Tiled object"
    )]
    SpellRule {
        section: String,
        entity: String,
        spell: SpellKind,
    },
}

impl MissingConfig {
    pub fn section(&self) -> &str {
        match self {
            Self::Section { section }
            | Self::Entities { section }
            | Self::Entity { section, .. }
            | Self::SpellRule { section, .. } => section,
        }
    }
}

impl SpellError for MissingConfig {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Configuration
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Section { .. } => "MISSING_SECTION",
            Self::Entities { .. } => "MISSING_ENTITIES",
            Self::Entity { .. } => "MISSING_ENTITY",
            Self::SpellRule { .. } => "MISSING_SPELL_RULE",
        }
    }
}

/// Result of walking section → entities → entity → spell rule.
#[derive(Debug)]
pub enum RuleLookup<'a> {
    Found(&'a SpellRule),
    Missing(MissingConfig),
}

/// Finds the rule for `kind` on `entity_key` inside `section`.
///
/// Stops at the first absent layer and reports which one it was.
pub fn lookup_rule<'a>(
    sections: &'a Sections,
    section: &str,
    entity_key: &str,
    kind: SpellKind,
) -> RuleLookup<'a> {
    let Some(state_section) = sections.get(section) else {
        return RuleLookup::Missing(MissingConfig::Section {
            section: section.to_string(),
        });
    };

    let Some(entities) = state_section.entities() else {
        return RuleLookup::Missing(MissingConfig::Entities {
            section: section.to_string(),
        });
    };

    let Some(entity) = entities.get(entity_key) else {
        return RuleLookup::Missing(MissingConfig::Entity {
            section: section.to_string(),
            entity: entity_key.to_string(),
        });
    };

    match entity.spell(kind) {
        Some(rule) => RuleLookup::Found(rule),
        None => RuleLookup::Missing(MissingConfig::SpellRule {
            section: section.to_string(),
            entity: entity_key.to_string(),
            spell: kind,
        }),
    }
}
