//! Cast events and the targets they name.
//!
//! A [`Target`] is the in-world object a spell is cast on. It is addressed by
//! its `group` when one is set, otherwise by its `key`. A target is spellable
//! exactly when it carries a [`SpellKind`]; raw Tiled property records go
//! through [`TargetProperties`] so an unknown spell type is caught while the
//! level loads instead of at cast time.

use std::str::FromStr;

use crate::error::{ErrorSeverity, SpellError};
use crate::spell::SpellKind;

/// Errors raised while building a [`Target`] from authored properties.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TargetError {
    #[error("target '{key}' has unknown spell type '{spell_type}'")]
    UnknownSpellKind { key: String, spell_type: String },

    #[error("target '{key}' is spellable but has no spell type")]
    MissingSpellKind { key: String },

    #[error("target has an empty key")]
    EmptyKey,
}

impl SpellError for TargetError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownSpellKind { .. } => "TARGET_UNKNOWN_SPELL_KIND",
            Self::MissingSpellKind { .. } => "TARGET_MISSING_SPELL_KIND",
            Self::EmptyKey => "TARGET_EMPTY_KEY",
        }
    }
}

/// Entity or object eligible to receive a spell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Target {
    key: String,
    group: Option<String>,
    spell: Option<SpellKind>,
    unlocks_object: Option<String>,
    unlocks_transition: Option<String>,
}

impl Target {
    /// Creates a non-spellable target with the given key.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            group: None,
            spell: None,
            unlocks_object: None,
            unlocks_transition: None,
        }
    }

    /// Marks the target spellable with the given spell kind (builder pattern).
    #[must_use]
    pub fn spellable(mut self, kind: SpellKind) -> Self {
        self.spell = Some(kind);
        self
    }

    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    #[must_use]
    pub fn unlocks_object(mut self, object: impl Into<String>) -> Self {
        self.unlocks_object = Some(object.into());
        self
    }

    #[must_use]
    pub fn unlocks_transition(mut self, transition: impl Into<String>) -> Self {
        self.unlocks_transition = Some(transition.into());
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    /// Identifier used for world-state lookups and object primitives.
    ///
    /// The group wins over the key so that every object sharing a group
    /// resolves to the same entity configuration.
    pub fn entity_key(&self) -> &str {
        self.group.as_deref().unwrap_or(&self.key)
    }

    pub fn is_spellable(&self) -> bool {
        self.spell.is_some()
    }

    /// Spell kind, present only for spellable targets.
    pub fn spell(&self) -> Option<SpellKind> {
        self.spell
    }

    pub fn object_to_unlock(&self) -> Option<&str> {
        self.unlocks_object.as_deref()
    }

    pub fn transition_to_unlock(&self) -> Option<&str> {
        self.unlocks_transition.as_deref()
    }
}

/// Raw property record as exported from a Tiled object layer.
///
/// Field names follow the property names used in the level files.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TargetProperties {
    pub key: String,
    pub group: Option<String>,
    pub spellable: bool,
    pub spell_type: Option<String>,
    #[cfg_attr(feature = "serde", serde(alias = "unlocksObject"))]
    pub unlocks_object: Option<String>,
    #[cfg_attr(feature = "serde", serde(alias = "unlocksTransition"))]
    pub unlocks_transition: Option<String>,
}

impl TryFrom<TargetProperties> for Target {
    type Error = TargetError;

    fn try_from(props: TargetProperties) -> Result<Self, Self::Error> {
        if props.key.is_empty() {
            return Err(TargetError::EmptyKey);
        }

        // A spell type on a non-spellable object is ignored, matching how the
        // level editor leaves stale properties behind.
        let spell = if props.spellable {
            let raw = props
                .spell_type
                .ok_or_else(|| TargetError::MissingSpellKind {
                    key: props.key.clone(),
                })?;
            let kind =
                SpellKind::from_str(&raw).map_err(|_| TargetError::UnknownSpellKind {
                    key: props.key.clone(),
                    spell_type: raw,
                })?;
            Some(kind)
        } else {
            None
        };

        Ok(Self {
            key: props.key,
            group: props.group.filter(|g| !g.is_empty()),
            spell,
            unlocks_object: props.unlocks_object.filter(|o| !o.is_empty()),
            unlocks_transition: props.unlocks_transition.filter(|t| !t.is_empty()),
        })
    }
}

/// A cast action performed by the player.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpellEvent {
    pub target: Option<Target>,
}

impl SpellEvent {
    pub fn new(target: Target) -> Self {
        Self {
            target: Some(target),
        }
    }

    /// Event with nothing under the cursor.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the target together with its spell kind when the target is
    /// spellable. Every other event is a no-op for the spell pipeline.
    pub fn spell_target(&self) -> Option<(&Target, SpellKind)> {
        let target = self.target.as_ref()?;
        target.spell().map(|kind| (target, kind))
    }
}
