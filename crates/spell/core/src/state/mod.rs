//! Author-provided world state.
//!
//! The world state is a mapping from section name (see [`crate::naming`]) to
//! [`StateSection`]. Each section lists the entities of one map, and each
//! entity lists a [`SpellRule`] per [`SpellKind`]. Alongside the rule tables
//! lives [`StoryFlags`], the mutable progress data hooks write to.
//!
//! Every layer is optional from the evaluator's point of view: a missing
//! section, entity table, entity or spell bucket is reported as a distinct
//! [`crate::requirements::MissingConfig`] variant rather than an error.

mod flags;
mod rule;

use std::collections::HashMap;

pub use flags::StoryFlags;
pub use rule::{Hook, Predicate, Requirement, SpellRule};

use crate::spell::SpellKind;

/// Section name → section configuration.
pub type Sections = HashMap<String, StateSection>;

/// Entity configuration for one map or level.
#[derive(Debug, Default)]
pub struct StateSection {
    entities: Option<HashMap<String, EntityConfig>>,
}

impl StateSection {
    /// Section without an entity table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entity, creating the entity table on first use.
    #[must_use]
    pub fn with_entity(mut self, key: impl Into<String>, entity: EntityConfig) -> Self {
        self.entities
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), entity);
        self
    }

    pub fn entities(&self) -> Option<&HashMap<String, EntityConfig>> {
        self.entities.as_ref()
    }

    pub fn entity(&self, key: &str) -> Option<&EntityConfig> {
        self.entities.as_ref()?.get(key)
    }
}

/// Spell rules for one entity, keyed by spell kind.
#[derive(Debug, Default)]
pub struct EntityConfig {
    spell: HashMap<SpellKind, SpellRule>,
}

impl EntityConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_spell(mut self, kind: SpellKind, rule: SpellRule) -> Self {
        self.spell.insert(kind, rule);
        self
    }

    pub fn spell(&self, kind: SpellKind) -> Option<&SpellRule> {
        self.spell.get(&kind)
    }
}

/// Complete author-provided world state.
#[derive(Debug, Default)]
pub struct WorldState {
    pub sections: Sections,
    pub flags: StoryFlags,
}

impl WorldState {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_section(mut self, name: impl Into<String>, section: StateSection) -> Self {
        self.sections.insert(name.into(), section);
        self
    }

    #[must_use]
    pub fn with_flags(mut self, flags: StoryFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn section(&self, name: &str) -> Option<&StateSection> {
        self.sections.get(name)
    }
}
