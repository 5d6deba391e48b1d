//! Asynchronous abstraction over tween playback.
//!
//! The renderer plugs in an [`Animator`] so the disappear behavior can wait
//! for the vanish tween before the object is destroyed, and so timed
//! behaviors follow the game clock instead of wall time.
use std::time::Duration;

use async_trait::async_trait;

use super::errors::AnimationError;

/// Plays spell animations and resolves when they complete.
#[async_trait]
pub trait Animator: Send + Sync {
    /// Plays the disappear tween on every sprite keyed by `key`.
    ///
    /// Resolves once the tween has finished.
    async fn disappear(&self, key: &str) -> Result<(), AnimationError>;

    /// Resolves after `delay` of game time.
    ///
    /// Defaults to a Tokio timer; engines with their own clock (pause, time
    /// scaling, fixed ticks) override it.
    async fn wait(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

/// Animator that completes immediately.
/// Useful for headless runs or as a fallback.
pub struct InstantAnimator;

#[async_trait]
impl Animator for InstantAnimator {
    async fn disappear(&self, _key: &str) -> Result<(), AnimationError> {
        Ok(())
    }
}
