//! Cast lifecycle events broadcast to subscribers.
//!
//! The worker publishes one event per state change so clients (HUD, audio,
//! tests) can follow a cast without polling the runtime.
use spell_core::{SpellKind, Verdict};
use tokio::sync::broadcast;

use crate::dispatch::CastId;

/// Lifecycle of a single cast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CastEvent {
    /// Requirements passed; control is locked and the behavior started.
    Started {
        cast: CastId,
        entity: String,
        kind: SpellKind,
    },
    /// Requirements (or the missing-config policy) refused the cast.
    Denied {
        entity: String,
        kind: SpellKind,
        verdict: Verdict,
    },
    /// The cast arrived while another cast held control.
    Rejected { entity: String, kind: SpellKind },
    /// The behavior finished and player control is back.
    ControlRestored {
        cast: CastId,
        entity: String,
        kind: SpellKind,
    },
}

/// Broadcast channel for [`CastEvent`]s.
///
/// Publishing never blocks; events sent while nobody listens are dropped.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<CastEvent>,
}

impl EventBus {
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn publish(&self, event: CastEvent) {
        // No subscribers is fine: events are best-effort
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CastEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::with_capacity(100)
    }
}
