//! Spell effect behaviors.
//!
//! Each behavior runs in two halves. [`begin`] runs right after the dispatcher
//! has locked player control and either finishes on the spot
//! ([`Step::Restore`]) or names the signal it is waiting for
//! ([`Step::Suspend`]). Once that signal fires, [`finish`] applies the
//! remaining world mutations and always restores player control.
//!
//! | kind        | begin                 | signal          | finish                              |
//! |-------------|-----------------------|-----------------|-------------------------------------|
//! | `disappear` | -                     | vanish tween    | destroy, unlock object/transition   |
//! | `move`      | - (placeholder)       | none            | -                                   |
//! | `unlock`    | open door             | animator wait   | -                                   |

use std::time::Duration;

use spell_core::{ObjectError, SpellConfig, SpellError, SpellKind, Target, World};
use tracing::{debug, error};

/// What the dispatcher does after [`begin`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Nothing left to wait for; restore control now.
    Restore,
    /// Resume with `finish` once `signal` fires.
    Suspend(Suspension),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suspension {
    pub signal: Signal,
    pub finish: Finish,
}

/// External condition a suspended cast waits for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    /// Completion of the disappear tween on `key`.
    Animation { key: String },
    /// Configured delay, measured by [`Animator::wait`](crate::Animator::wait).
    Delay(Duration),
}

/// World mutations applied when a suspended cast resumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finish {
    Vanish {
        key: String,
        unlocks_object: Option<String>,
        unlocks_transition: Option<String>,
    },
    RestoreControl,
}

/// Starts the behavior registered for `kind`.
pub fn begin(kind: SpellKind, target: &Target, world: &mut dyn World, config: &SpellConfig) -> Step {
    match kind {
        SpellKind::Disappear => disappear(target),
        SpellKind::Move => relocate(target),
        SpellKind::Unlock => unlock(target, world, config.unlock_delay()),
    }
}

fn disappear(target: &Target) -> Step {
    let key = target.entity_key().to_string();
    Step::Suspend(Suspension {
        signal: Signal::Animation { key: key.clone() },
        finish: Finish::Vanish {
            key,
            unlocks_object: target.object_to_unlock().map(str::to_string),
            unlocks_transition: target.transition_to_unlock().map(str::to_string),
        },
    })
}

/// Placeholder for moving the target; semantics are not defined yet.
fn relocate(target: &Target) -> Step {
    debug!(
        target: "spell::effects",
        entity = target.entity_key(),
        "move spell has no effect yet"
    );
    Step::Restore
}

fn unlock(target: &Target, world: &mut dyn World, delay: Duration) -> Step {
    let key = target.entity_key();
    report("open_door", key, world.open_door(key));

    Step::Suspend(Suspension {
        signal: Signal::Delay(delay),
        finish: Finish::RestoreControl,
    })
}

/// Applies the deferred half of a behavior, then restores control.
pub fn finish(finish: Finish, world: &mut dyn World) {
    if let Finish::Vanish {
        key,
        unlocks_object,
        unlocks_transition,
    } = finish
    {
        report("destroy_object", &key, world.destroy_object(&key));

        if let Some(object) = unlocks_object {
            report("unlock_object", &object, world.unlock_object(&object));
        }
        if let Some(transition) = unlocks_transition {
            report(
                "unlock_transition",
                &transition,
                world.unlock_transition(&transition),
            );
        }
    }

    restore_control(world);
}

/// Ends tool use and hands movement back to the player.
pub fn restore_control(world: &mut dyn World) {
    world.stop_using_tool();
    world.enable_player_movement();
}

fn report(operation: &'static str, key: &str, result: Result<(), ObjectError>) {
    if let Err(error) = result {
        error!(
            target: "spell::effects",
            operation,
            key,
            code = error.error_code(),
            severity = error.severity().as_str(),
            error = %error,
            "world object operation failed"
        );
    }
}
