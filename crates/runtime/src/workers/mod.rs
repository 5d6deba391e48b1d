//! Worker tasks that back the runtime orchestration.
//!
//! The spell worker owns the world and the author's world state; every cast
//! and every continuation is applied on it, one at a time.

mod spell;

pub use spell::{Command, SpellWorker};
