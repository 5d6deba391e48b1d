//! Data-driven content for the spell runtime.
//!
//! Provides loaders for the files level authors edit by hand:
//! - Spell configuration (TOML)
//! - Spellable target records exported from Tiled object layers (RON)
//! - Initial story flags (JSON)
//!
//! Requirement predicates and hooks are code and are not loaded from files.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, FlagsLoader, LoadResult, TargetLoader};
