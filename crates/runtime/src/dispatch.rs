//! Requirement-gated spell dispatch.
//!
//! [`SpellDispatcher`] is the synchronous core of a cast: it applies the entry
//! guards, resolves the world-state section, evaluates requirements, locks
//! player control and starts the effect behavior. Anything that has to wait
//! is handed back to the caller as a [`PendingCast`]; the worker runs the wait
//! and feeds the result back through [`SpellDispatcher::resume`].

use std::fmt;

use spell_core::{
    OverlapPolicy, RequirementEvaluator, SpellConfig, SpellEvent, SpellKind, Verdict, World,
    WorldState, resolve_state_section_name,
};
use tracing::{debug, info};

use crate::effects::{self, Finish, Signal, Step};

/// Identifier assigned to every cast that passes its requirements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CastId(pub u64);

impl fmt::Display for CastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cast#{}", self.0)
    }
}

/// Result of handing one event to the dispatcher.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CastOutcome {
    /// The event had no spellable target; nothing was touched.
    Ignored,
    /// Another cast still holds player control.
    Busy { entity: String, kind: SpellKind },
    /// Requirements (or the missing-config policy) refused the cast.
    Denied {
        entity: String,
        kind: SpellKind,
        verdict: Verdict,
    },
    /// The behavior is waiting on an animation or delay; control is locked.
    Casting {
        cast: CastId,
        entity: String,
        kind: SpellKind,
    },
    /// The behavior finished synchronously and control is already restored.
    Completed {
        cast: CastId,
        entity: String,
        kind: SpellKind,
    },
}

impl CastOutcome {
    /// Returns true if the requirements passed and the behavior ran.
    pub fn is_cast(&self) -> bool {
        matches!(self, Self::Casting { .. } | Self::Completed { .. })
    }
}

/// Cast suspended on an external signal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingCast {
    pub cast: CastId,
    pub entity: String,
    pub kind: SpellKind,
    pub signal: Signal,
    pub finish: Finish,
}

impl PendingCast {
    /// Converts the pending cast into the value delivered once its signal fired.
    pub fn into_resumption(self) -> Resumption {
        Resumption {
            cast: self.cast,
            entity: self.entity,
            kind: self.kind,
            finish: self.finish,
        }
    }
}

/// Continuation delivered back to the dispatcher.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resumption {
    pub cast: CastId,
    pub entity: String,
    pub kind: SpellKind,
    pub finish: Finish,
}

/// Snapshot of the player-control lock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlState {
    /// Casts that locked control and have not restored it yet.
    pub held: usize,
}

impl ControlState {
    pub fn is_locked(&self) -> bool {
        self.held > 0
    }
}

/// Output of [`SpellDispatcher::run_spell`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dispatch {
    pub outcome: CastOutcome,
    pub pending: Option<PendingCast>,
}

impl Dispatch {
    fn done(outcome: CastOutcome) -> Self {
        Self {
            outcome,
            pending: None,
        }
    }
}

/// Decides and starts spell casts.
#[derive(Debug)]
pub struct SpellDispatcher {
    config: SpellConfig,
    evaluator: RequirementEvaluator,
    next_cast: u64,
    held: usize,
}

impl SpellDispatcher {
    pub fn new(config: SpellConfig) -> Self {
        Self {
            evaluator: RequirementEvaluator::new(config.missing_config),
            config,
            next_cast: 0,
            held: 0,
        }
    }

    pub fn config(&self) -> &SpellConfig {
        &self.config
    }

    pub fn control(&self) -> ControlState {
        ControlState { held: self.held }
    }

    /// Runs one cast event.
    ///
    /// # Execution Flow
    /// 1. Non-spellable or absent target: [`CastOutcome::Ignored`], no world access
    /// 2. Control already held under [`OverlapPolicy::Reject`]: [`CastOutcome::Busy`]
    /// 3. Resolve the world-state section once for this event
    /// 4. Evaluate requirements for `group ?? key`; refusal returns
    ///    [`CastOutcome::Denied`] without mutating control state
    /// 5. Disable movement, mark the configured tool in use, begin the behavior
    pub fn run_spell(
        &mut self,
        event: &SpellEvent,
        world: &mut dyn World,
        world_state: &mut WorldState,
    ) -> Dispatch {
        let Some((target, kind)) = event.spell_target() else {
            return Dispatch::done(CastOutcome::Ignored);
        };
        let entity = target.entity_key();

        if self.held > 0 && self.config.overlap == OverlapPolicy::Reject {
            debug!(
                target: "spell::dispatch",
                entity,
                spell = %kind,
                held = self.held,
                "cast rejected while control is locked"
            );
            return Dispatch::done(CastOutcome::Busy {
                entity: entity.to_string(),
                kind,
            });
        }

        let section = resolve_state_section_name(&*world);
        let verdict = self
            .evaluator
            .evaluate(entity, kind, event, world, world_state, &section);

        if !verdict.allows_cast(self.evaluator.policy()) {
            debug!(
                target: "spell::dispatch",
                entity,
                spell = %kind,
                section = %section,
                verdict = ?verdict,
                "cast denied"
            );
            return Dispatch::done(CastOutcome::Denied {
                entity: entity.to_string(),
                kind,
                verdict,
            });
        }

        world.disable_player_movement();
        world.use_tool(&self.config.tool_name);
        self.held += 1;

        let cast = CastId(self.next_cast);
        self.next_cast += 1;

        info!(
            target: "spell::dispatch",
            %cast,
            entity,
            spell = %kind,
            section = %section,
            "cast started"
        );

        match effects::begin(kind, target, world, &self.config) {
            Step::Restore => {
                effects::restore_control(world);
                self.release(cast);
                Dispatch::done(CastOutcome::Completed {
                    cast,
                    entity: entity.to_string(),
                    kind,
                })
            }
            Step::Suspend(suspension) => Dispatch {
                outcome: CastOutcome::Casting {
                    cast,
                    entity: entity.to_string(),
                    kind,
                },
                pending: Some(PendingCast {
                    cast,
                    entity: entity.to_string(),
                    kind,
                    signal: suspension.signal,
                    finish: suspension.finish,
                }),
            },
        }
    }

    /// Applies a continuation whose signal fired and releases its control lock.
    pub fn resume(&mut self, resumption: Resumption, world: &mut dyn World) {
        effects::finish(resumption.finish, world);
        self.release(resumption.cast);
    }

    fn release(&mut self, cast: CastId) {
        self.held = self.held.saturating_sub(1);
        info!(
            target: "spell::dispatch",
            %cast,
            held = self.held,
            "control restored"
        );
    }
}
