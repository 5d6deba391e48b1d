//! High-level runtime orchestrator.
//!
//! The runtime owns the spell worker, wires up the command/event channels,
//! and exposes a builder-based API for clients to cast spells.

use std::sync::Arc;

use tokio::task::JoinHandle;

use spell_core::{SpellConfig, World, WorldState};

use crate::api::{Animator, InstantAnimator, Result, RuntimeError, SpellHandle};
use crate::dispatch::SpellDispatcher;
use crate::events::{CastEvent, EventBus};
use crate::workers::SpellWorker;

/// Runtime configuration shared across the orchestrator and worker.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub spell: SpellConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            spell: SpellConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

/// Main runtime that orchestrates spell casting.
///
/// Design: Runtime owns the worker task and hands out [`SpellHandle`]s.
/// The world and world state move into the worker and come back on
/// [`SpellRuntime::shutdown`].
pub struct SpellRuntime<W> {
    handle: SpellHandle,
    worker_handle: JoinHandle<(W, WorldState)>,
}

impl<W: World + Send + 'static> SpellRuntime<W> {
    /// Create a new runtime builder
    pub fn builder() -> SpellRuntimeBuilder<W> {
        SpellRuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> SpellHandle {
        self.handle.clone()
    }

    /// Subscribe to cast events
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<CastEvent> {
        self.handle.subscribe()
    }

    /// Shutdown the runtime gracefully.
    ///
    /// Waits for every outstanding handle to be dropped and for every pending
    /// continuation to restore control, then returns the world and world state.
    pub async fn shutdown(self) -> Result<(W, WorldState)> {
        drop(self.handle);

        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`SpellRuntime`] with flexible configuration.
pub struct SpellRuntimeBuilder<W> {
    config: RuntimeConfig,
    world: Option<W>,
    world_state: Option<WorldState>,
    animator: Option<Arc<dyn Animator>>,
}

impl<W: World + Send + 'static> SpellRuntimeBuilder<W> {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            world: None,
            world_state: None,
            animator: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Override only the spell configuration
    pub fn spell_config(mut self, spell: SpellConfig) -> Self {
        self.config.spell = spell;
        self
    }

    /// Set the required world handle
    pub fn world(mut self, world: W) -> Self {
        self.world = Some(world);
        self
    }

    /// Provide the author's world state (defaults to empty)
    pub fn world_state(mut self, world_state: WorldState) -> Self {
        self.world_state = Some(world_state);
        self
    }

    /// Set the animator used by the disappear behavior.
    ///
    /// If not provided, [`InstantAnimator`] is used.
    pub fn animator(mut self, animator: impl Animator + 'static) -> Self {
        self.animator = Some(Arc::new(animator));
        self
    }

    /// Spawns the worker and returns the running runtime.
    ///
    /// Must be called from within a Tokio runtime.
    pub async fn build(self) -> Result<SpellRuntime<W>> {
        let world = self.world.ok_or(RuntimeError::MissingWorld)?;
        let world_state = self.world_state.unwrap_or_default();
        let animator = self
            .animator
            .unwrap_or_else(|| Arc::new(InstantAnimator) as Arc<dyn Animator>);

        let (command_tx, command_rx) =
            tokio::sync::mpsc::channel(self.config.command_buffer_size.max(1));
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let worker = SpellWorker::new(
            world,
            world_state,
            SpellDispatcher::new(self.config.spell),
            animator,
            command_rx,
            event_bus.clone(),
        );
        let worker_handle = tokio::spawn(worker.run());

        Ok(SpellRuntime {
            handle: SpellHandle::new(command_tx, event_bus),
            worker_handle,
        })
    }
}
