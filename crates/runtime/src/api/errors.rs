//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination and collaborator wiring so
//! clients can bubble them up with consistent context. Unmet requirements and
//! missing world-state configuration are not errors; they are reported
//! through [`crate::CastOutcome`].
use thiserror::Error;
use tokio::sync::oneshot;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("spell worker command channel closed")]
    CommandChannelClosed,

    #[error("spell worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("spell worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires a world to be configured before building")]
    MissingWorld,
}

/// Failure reported by an [`crate::Animator`].
///
/// The disappear continuation logs it and carries on, so a broken tween never
/// leaves the player locked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnimationError {
    #[error("no sprite found for '{0}'")]
    SpriteNotFound(String),

    #[error("animation for '{key}' was interrupted: {reason}")]
    Interrupted { key: String, reason: String },
}
