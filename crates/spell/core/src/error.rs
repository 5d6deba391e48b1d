//! Common error infrastructure for spell-core.
//!
//! Domain-specific errors (`TargetError`, `ObjectError`, `MissingConfig`) are
//! defined next to the types they describe. This module only provides the
//! shared classification used when logging them.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each concern has its own error type with specific variants
//! - **Severity Classification**: Errors are categorized for recovery strategies
//! - **No control flow**: Requirement evaluation never returns an error; unmet
//!   requirements and missing configuration are verdicts, not failures

/// Severity level of an error, used for categorization and logging priority.
///
/// - **Configuration**: Authored data is incomplete; gameplay continues
/// - **Validation**: Invalid input rejected at construction time
/// - **Internal**: Unexpected collaborator state that requires investigation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// Missing or misspelled world-state configuration.
    ///
    /// Examples: no state section for the current map, entity not listed
    Configuration,

    /// Invalid input that should be rejected without retry.
    ///
    /// Examples: unknown spell type, spellable target without a spell type
    Validation,

    /// Collaborator reported an inconsistent state.
    ///
    /// Examples: destroying an object that no longer exists
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }
}

/// Common trait for all spell-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity by who has to act: level author, caller or engine
pub trait SpellError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Used as a structured logging field and in tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
