//! Application layer errors.
//!
//! These errors represent failures in orchestration, not validation.
//! Validation failures are `ValidationError` from `crate::domain`.

use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while orchestrating registration use cases.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// Another user already registered this email.
    #[error("Email already registered: {email}")]
    DuplicateEmail { email: String },

    #[error("User not found: {id}")]
    UserNotFound { id: String },

    /// Student links only exist on legal representatives.
    #[error("User {id} is not a legal representative")]
    NotALegalRepresentative { id: String },

    /// Store access failed (lock poisoned).
    #[error("User store error")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::DuplicateEmail { email } => vec![
                format!("An account for {email} already exists"),
                "Use a different email address".into(),
            ],
            Self::UserNotFound { .. } => vec!["Check the user id and try again".into()],
            Self::NotALegalRepresentative { .. } => {
                vec!["Only legal representatives can be linked to students".into()]
            }
            Self::StoreLockError => vec![
                "The user store is locked".into(),
                "Try again in a moment".into(),
            ],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DuplicateEmail { .. } => ErrorCategory::Conflict,
            Self::UserNotFound { .. } => ErrorCategory::NotFound,
            Self::NotALegalRepresentative { .. } => ErrorCategory::Validation,
            Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}
