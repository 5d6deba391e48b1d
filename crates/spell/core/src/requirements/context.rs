//! Views handed to requirement predicates and hooks.

use crate::state::StoryFlags;
use crate::target::SpellEvent;
use crate::world::World;

/// Read-only view passed to requirement predicates.
pub struct RequirementContext<'a> {
    pub event: &'a SpellEvent,
    pub world: &'a dyn World,
    pub flags: &'a StoryFlags,
}

/// Mutable view passed to success/failure hooks.
///
/// Hooks may change the world (e.g. play a "fizzle" sound, drop an item) and
/// the story flags, but never the rule tables being evaluated.
pub struct HookContext<'a> {
    pub event: &'a SpellEvent,
    pub world: &'a mut dyn World,
    pub flags: &'a mut StoryFlags,
}
