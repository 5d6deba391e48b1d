//! Spell worker that owns the authoritative world and world state.
//!
//! Receives commands from [`SpellHandle`](crate::SpellHandle), runs casts
//! through [`SpellDispatcher`], and keeps suspended casts in a [`JoinSet`].
//! Each continuation task only waits for its signal (tween or delay); the
//! pending cast stays in the worker, keyed by task id, so it is finished even
//! if the task panics. The world itself is only touched from the worker loop,
//! so casts and continuations never interleave.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::task::{self, JoinError, JoinSet};
use tracing::{debug, error, warn};

use spell_core::{SpellEvent, World, WorldState};

use crate::api::Animator;
use crate::dispatch::{CastOutcome, ControlState, PendingCast, SpellDispatcher};
use crate::effects::Signal;
use crate::events::{CastEvent, EventBus};

/// Commands that can be sent to the spell worker
pub enum Command {
    /// Run a cast event through the dispatcher.
    Cast {
        event: SpellEvent,
        reply: oneshot::Sender<CastOutcome>,
    },
    /// Query the player-control lock.
    QueryControl {
        reply: oneshot::Sender<ControlState>,
    },
}

/// Background task that processes casts and their continuations.
pub struct SpellWorker<W> {
    world: W,
    world_state: WorldState,
    dispatcher: SpellDispatcher,
    animator: Arc<dyn Animator>,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    continuations: JoinSet<()>,
    pending: HashMap<task::Id, PendingCast>,
}

impl<W: World + Send + 'static> SpellWorker<W> {
    pub fn new(
        world: W,
        world_state: WorldState,
        dispatcher: SpellDispatcher,
        animator: Arc<dyn Animator>,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        tracing::info!(
            "SpellWorker initialized with {} world-state sections, tool '{}'",
            world_state.sections.len(),
            dispatcher.config().tool_name
        );

        Self {
            world,
            world_state,
            dispatcher,
            animator,
            command_rx,
            event_bus,
            continuations: JoinSet::new(),
            pending: HashMap::new(),
        }
    }

    /// Main worker loop.
    ///
    /// Runs until every handle is dropped and every pending continuation has
    /// restored control, then hands the world back.
    pub async fn run(mut self) -> (W, WorldState) {
        let mut accepting = true;

        loop {
            tokio::select! {
                cmd = self.command_rx.recv(), if accepting => match cmd {
                    Some(cmd) => self.handle_command(cmd),
                    None => {
                        debug!(
                            target: "spell::worker",
                            pending = self.continuations.len(),
                            "command channel closed, draining continuations"
                        );
                        accepting = false;
                    }
                },
                Some(joined) = self.continuations.join_next_with_id() => {
                    self.handle_continuation(joined);
                }
                else => break,
            }
        }

        (self.world, self.world_state)
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Cast { event, reply } => {
                let outcome = self.handle_cast(&event);
                if reply.send(outcome).is_err() {
                    debug!("Cast reply channel closed (caller dropped)");
                }
            }
            Command::QueryControl { reply } => {
                if reply.send(self.dispatcher.control()).is_err() {
                    debug!("QueryControl reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn handle_cast(&mut self, event: &SpellEvent) -> CastOutcome {
        let dispatch = self
            .dispatcher
            .run_spell(event, &mut self.world, &mut self.world_state);

        match &dispatch.outcome {
            CastOutcome::Ignored => {}
            CastOutcome::Busy { entity, kind } => self.event_bus.publish(CastEvent::Rejected {
                entity: entity.clone(),
                kind: *kind,
            }),
            CastOutcome::Denied {
                entity,
                kind,
                verdict,
            } => self.event_bus.publish(CastEvent::Denied {
                entity: entity.clone(),
                kind: *kind,
                verdict: verdict.clone(),
            }),
            CastOutcome::Casting { cast, entity, kind } => {
                self.event_bus.publish(CastEvent::Started {
                    cast: *cast,
                    entity: entity.clone(),
                    kind: *kind,
                });
            }
            CastOutcome::Completed { cast, entity, kind } => {
                self.event_bus.publish(CastEvent::Started {
                    cast: *cast,
                    entity: entity.clone(),
                    kind: *kind,
                });
                self.event_bus.publish(CastEvent::ControlRestored {
                    cast: *cast,
                    entity: entity.clone(),
                    kind: *kind,
                });
            }
        }

        if let Some(pending) = dispatch.pending {
            self.suspend(pending);
        }

        dispatch.outcome
    }

    /// Spawns the task that waits for a pending cast's signal.
    fn suspend(&mut self, pending: PendingCast) {
        let animator = Arc::clone(&self.animator);
        let cast = pending.cast;

        let task = match pending.signal.clone() {
            Signal::Animation { key } => self.continuations.spawn(async move {
                if let Err(error) = animator.disappear(&key).await {
                    warn!(
                        target: "spell::worker",
                        %cast,
                        key = %key,
                        error = %error,
                        "disappear animation failed, finishing cast anyway"
                    );
                }
            }),
            Signal::Delay(delay) => self.continuations.spawn(async move {
                animator.wait(delay).await;
            }),
        };

        self.pending.insert(task.id(), pending);
    }

    fn handle_continuation(&mut self, joined: Result<(task::Id, ()), JoinError>) {
        let id = match joined {
            Ok((id, ())) => id,
            Err(join_error) => {
                error!(
                    target: "spell::worker",
                    error = %join_error,
                    "continuation task failed, finishing cast anyway"
                );
                join_error.id()
            }
        };

        // Every spawned task is registered before the loop can join it
        let Some(pending) = self.pending.remove(&id) else {
            error!(
                target: "spell::worker",
                task = %id,
                "continuation finished without a pending cast"
            );
            return;
        };

        let resumption = pending.into_resumption();
        let event = CastEvent::ControlRestored {
            cast: resumption.cast,
            entity: resumption.entity.clone(),
            kind: resumption.kind,
        };
        self.dispatcher.resume(resumption, &mut self.world);
        self.event_bus.publish(event);
    }
}
