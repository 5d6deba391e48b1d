//! Built-in garden scenario used when no content files are given.
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use spell_core::{EntityConfig, SpellKind, SpellRule, StateSection, StoryFlags, Target, WorldState};
use spell_runtime::{AnimationError, Animator};

pub const LEVEL: &str = "overgrown_garden";

/// Section name for [`LEVEL`] on the default map.
const SECTION: &str = "insideOvergrownGarden";

/// Animator that stands in for a sprite tween by sleeping.
pub struct TweenAnimator {
    duration: Duration,
}

impl TweenAnimator {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }
}

#[async_trait]
impl Animator for TweenAnimator {
    async fn disappear(&self, key: &str) -> Result<(), AnimationError> {
        debug!(key, ms = self.duration.as_millis() as u64, "tween started");
        tokio::time::sleep(self.duration).await;
        Ok(())
    }
}

pub fn starting_flags() -> StoryFlags {
    let mut flags = StoryFlags::new();
    flags.set("learned_vanish", true);
    flags
}

/// Vines hide the gate; the shed needs a key the player picks up by
/// failing to open it once.
pub fn garden_state(flags: StoryFlags) -> WorldState {
    WorldState::new().with_flags(flags).with_section(
        SECTION,
        StateSection::new()
            .with_entity(
                "vines",
                EntityConfig::new().with_spell(
                    SpellKind::Disappear,
                    SpellRule::new()
                        .require("learned_vanish", |ctx| ctx.flags.is_set("learned_vanish"))
                        .on_success("learned_vanish", |ctx| {
                            ctx.flags.increment("vanish_casts", 1);
                        }),
                ),
            )
            .with_entity(
                "shed_door",
                EntityConfig::new().with_spell(
                    SpellKind::Unlock,
                    SpellRule::new()
                        .require("has_key", |ctx| ctx.flags.is_set("shed_key"))
                        .on_failure("has_key", |ctx| {
                            ctx.flags.set("shed_key", true);
                        }),
                ),
            ),
    )
}

pub fn garden_targets() -> Vec<Target> {
    vec![
        Target::new("signpost"),
        Target::new("vine_1")
            .with_group("vines")
            .spellable(SpellKind::Disappear)
            .unlocks_object("garden_gate")
            .unlocks_transition("to_orchard"),
        Target::new("shed_door").spellable(SpellKind::Unlock),
        Target::new("shed_door").spellable(SpellKind::Unlock),
        // No rule configured: cast goes ahead under the default policy
        Target::new("statue").spellable(SpellKind::Move),
    ]
}
