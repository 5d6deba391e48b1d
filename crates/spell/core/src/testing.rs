//! In-memory [`World`] that records every call, for tests.

use std::collections::HashSet;

use crate::world::{Location, ObjectError, World};

/// One call made into a [`RecordingWorld`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorldCall {
    DisableMovement,
    EnableMovement,
    UseTool(String),
    StopUsingTool,
    Destroy(String),
    UnlockObject(String),
    UnlockTransition(String),
    OpenDoor(String),
}

/// World double tracking control state and call order.
///
/// Object primitives succeed unless the key was registered with
/// [`RecordingWorld::with_missing_object`].
#[derive(Clone, Debug)]
pub struct RecordingWorld {
    level: String,
    map: String,
    movement_enabled: bool,
    tool: Option<String>,
    missing: HashSet<String>,
    calls: Vec<WorldCall>,
}

impl RecordingWorld {
    pub fn new(level: impl Into<String>, map: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            map: map.into(),
            movement_enabled: true,
            tool: None,
            missing: HashSet::new(),
            calls: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_missing_object(mut self, key: impl Into<String>) -> Self {
        self.missing.insert(key.into());
        self
    }

    pub fn set_location(&mut self, level: impl Into<String>, map: impl Into<String>) {
        self.level = level.into();
        self.map = map.into();
    }

    pub fn calls(&self) -> &[WorldCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn movement_enabled(&self) -> bool {
        self.movement_enabled
    }

    pub fn tool(&self) -> Option<&str> {
        self.tool.as_deref()
    }

    /// Position of the first matching call, if any.
    pub fn position(&self, call: &WorldCall) -> Option<usize> {
        self.calls.iter().position(|c| c == call)
    }

    fn object_call(&mut self, key: &str, call: WorldCall) -> Result<(), ObjectError> {
        self.calls.push(call);
        if self.missing.contains(key) {
            Err(ObjectError::NotFound(key.to_string()))
        } else {
            Ok(())
        }
    }
}

impl Location for RecordingWorld {
    fn current_level_name(&self) -> &str {
        &self.level
    }

    fn current_map_name(&self) -> &str {
        &self.map
    }
}

impl World for RecordingWorld {
    fn disable_player_movement(&mut self) {
        self.movement_enabled = false;
        self.calls.push(WorldCall::DisableMovement);
    }

    fn enable_player_movement(&mut self) {
        self.movement_enabled = true;
        self.calls.push(WorldCall::EnableMovement);
    }

    fn use_tool(&mut self, name: &str) {
        self.tool = Some(name.to_string());
        self.calls.push(WorldCall::UseTool(name.to_string()));
    }

    fn stop_using_tool(&mut self) {
        self.tool = None;
        self.calls.push(WorldCall::StopUsingTool);
    }

    fn destroy_object(&mut self, key: &str) -> Result<(), ObjectError> {
        self.object_call(key, WorldCall::Destroy(key.to_string()))
    }

    fn unlock_object(&mut self, key: &str) -> Result<(), ObjectError> {
        self.object_call(key, WorldCall::UnlockObject(key.to_string()))
    }

    fn unlock_transition(&mut self, key: &str) -> Result<(), ObjectError> {
        self.calls.push(WorldCall::UnlockTransition(key.to_string()));
        if self.missing.contains(key) {
            Err(ObjectError::TransitionNotFound(key.to_string()))
        } else {
            Ok(())
        }
    }

    fn open_door(&mut self, key: &str) -> Result<(), ObjectError> {
        self.object_call(key, WorldCall::OpenDoor(key.to_string()))
    }
}
