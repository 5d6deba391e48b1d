//! Spell interaction rules shared by the runtime and content tooling.
//!
//! `spell-core` decides whether a spell cast on an in-world target is allowed:
//! it names the active world-state section ([`naming`]), looks up the
//! entity's spell rule and evaluates its requirements ([`requirements`]).
//! What happens after approval (locking control, effect behaviors and their
//! continuations) lives in the runtime crate; the [`World`] trait is the
//! boundary both sides share.
pub mod config;
pub mod error;
pub mod naming;
pub mod requirements;
pub mod spell;
pub mod state;
pub mod target;
pub mod world;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use config::{MissingConfigPolicy, OverlapPolicy, SpellConfig};
pub use error::{ErrorSeverity, SpellError};
pub use naming::{DEFAULT_MAP_NAME, SECTION_PREFIX, format_section_name, resolve_state_section_name};
pub use requirements::{
    HookContext, MissingConfig, RequirementContext, RequirementEvaluator, RuleLookup, Verdict,
    lookup_rule,
};
pub use spell::SpellKind;
pub use state::{
    EntityConfig, Hook, Predicate, Requirement, Sections, SpellRule, StateSection, StoryFlags,
    WorldState,
};
pub use target::{SpellEvent, Target, TargetError, TargetProperties};
pub use world::{Location, ObjectError, World};
