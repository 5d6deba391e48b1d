//! Runtime orchestration for spell casting.
//!
//! This crate wires the requirement evaluator from `spell-core` to the effect
//! behaviors and their asynchronous continuations. Consumers embed
//! [`SpellRuntime`] and cast through a [`SpellHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`dispatch`] decides casts and locks player control
//! - [`effects`] implements the disappear, move and unlock behaviors
//! - [`events`] broadcasts cast lifecycle events
//! - [`workers`] keeps the background task internal to the crate
pub mod api;
pub mod dispatch;
pub mod effects;
pub mod events;
pub mod runtime;

mod workers;

pub use api::{AnimationError, Animator, InstantAnimator, Result, RuntimeError, SpellHandle};
pub use dispatch::{
    CastId, CastOutcome, ControlState, Dispatch, PendingCast, Resumption, SpellDispatcher,
};
pub use effects::{Finish, Signal, Step, Suspension};
pub use events::{CastEvent, EventBus};
pub use runtime::{RuntimeConfig, SpellRuntime, SpellRuntimeBuilder};
