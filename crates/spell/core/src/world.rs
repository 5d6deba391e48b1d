//! Collaborator interfaces consumed by the spell pipeline.
//!
//! The world is not owned by this crate. Implementations wrap whatever
//! movement/tool state machine and object store the game uses; the runtime
//! worker holds the only mutable reference while a cast is processed.

use crate::error::{ErrorSeverity, SpellError};

/// Current location of the player.
pub trait Location {
    fn current_level_name(&self) -> &str;

    /// Map inside the current level, `"default"` when the level has a single map.
    fn current_map_name(&self) -> &str;
}

/// Live world handle mutated by spell casts.
///
/// Control methods are infallible: they toggle flags in the world's own
/// state machine. Object primitives may fail when the named object is not
/// present, which effect behaviors log without skipping control restoration.
pub trait World: Location {
    fn disable_player_movement(&mut self);

    fn enable_player_movement(&mut self);

    fn use_tool(&mut self, name: &str);

    fn stop_using_tool(&mut self);

    fn destroy_object(&mut self, key: &str) -> Result<(), ObjectError>;

    fn unlock_object(&mut self, key: &str) -> Result<(), ObjectError>;

    fn unlock_transition(&mut self, key: &str) -> Result<(), ObjectError>;

    fn open_door(&mut self, key: &str) -> Result<(), ObjectError>;
}

/// Failures reported by world object primitives.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ObjectError {
    #[error("object '{0}' not found")]
    NotFound(String),

    #[error("transition '{0}' not found")]
    TransitionNotFound(String),

    #[error("object '{key}' cannot be {operation}")]
    Unsupported {
        key: String,
        operation: &'static str,
    },
}

impl SpellError for ObjectError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotFound(_) | Self::TransitionNotFound(_) => ErrorSeverity::Internal,
            Self::Unsupported { .. } => ErrorSeverity::Configuration,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "OBJECT_NOT_FOUND",
            Self::TransitionNotFound(_) => "TRANSITION_NOT_FOUND",
            Self::Unsupported { .. } => "OBJECT_UNSUPPORTED",
        }
    }
}
