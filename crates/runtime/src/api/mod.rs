//! Public API surface for runtime consumers.
//!
//! Re-exports the handle, animator abstraction, and error types so clients
//! only need to depend on this module when embedding the spell runtime.
mod animator;
mod errors;
mod handle;

pub use animator::{Animator, InstantAnimator};
pub use errors::{AnimationError, Result, RuntimeError};
pub use handle::SpellHandle;
