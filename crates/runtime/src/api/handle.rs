//! Cloneable façade for issuing commands to the runtime.
//!
//! [`SpellHandle`] hides channel plumbing and offers async helpers for
//! casting spells, querying the control lock, and streaming cast events.
use tokio::sync::{broadcast, mpsc, oneshot};

use spell_core::SpellEvent;

use super::errors::{Result, RuntimeError};
use crate::dispatch::{CastOutcome, ControlState};
use crate::events::{CastEvent, EventBus};
use crate::workers::Command;

/// Client-facing handle to interact with the spell runtime
#[derive(Clone)]
pub struct SpellHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl SpellHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    /// Submit a cast event and wait for the dispatch decision.
    ///
    /// Returns as soon as the behavior has started; deferred behaviors report
    /// completion through [`CastEvent::ControlRestored`].
    pub async fn cast(&self, event: SpellEvent) -> Result<CastOutcome> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Cast {
                event,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Query the player-control lock
    pub async fn control(&self) -> Result<ControlState> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::QueryControl { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Subscribe to cast lifecycle events
    pub fn subscribe(&self) -> broadcast::Receiver<CastEvent> {
        self.event_bus.subscribe()
    }
}
