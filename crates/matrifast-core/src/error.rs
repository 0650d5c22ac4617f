//! Unified error handling for MatriFast Core.
//!
//! Wraps domain and application errors with a category (used by the CLI to
//! pick an exit code) and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::ValidationError;

/// Root error type for MatriFast Core operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatriFastError {
    /// A field failed validation.
    #[error("Validation error: {0}")]
    Domain(#[from] ValidationError),

    /// Orchestration failed (duplicates, missing users, store access).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// The configuration could not be loaded or holds an unknown value.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl MatriFastError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {message}"),
                "Run `matrifast config path` to locate the config file".into(),
            ],
            Self::Internal { .. } => vec!["This appears to be a bug in MatriFast".into()],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(_) => ErrorCategory::Validation,
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// The offending field, for validation failures.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Domain(e) => Some(e.field()),
            _ => None,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type MatriFastResult<T> = Result<T, MatriFastError>;
