// ============================================================================
// domain/error.rs - THE SINGLE DOMAIN ERROR
// ============================================================================

use thiserror::Error;

/// Raised whenever a domain invariant is violated.
///
/// `field` names the offending form field (or the entity, for cross-field
/// failures such as a document whose number no longer fits its type).
/// Errors are always returned at the exact call that broke the invariant.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    field: &'static str,
    message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    /// Shorthand for the common "required field missing" case.
    pub fn required(field: &'static str) -> Self {
        Self::new(field, "is required")
    }

    pub const fn field(&self) -> &'static str {
        self.field
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self.field {
            "numeroDocumento" | "tipoDocumento" | "Documento" => vec![
                "DNI numbers have exactly 8 digits".into(),
                "CE numbers have 9 to 12 letters or digits".into(),
                "PTP numbers have 9 to 15 letters or digits".into(),
                "Student codes have 5 to 20 letters or digits".into(),
            ],
            "celular" => vec!["Mobile numbers have 9 digits and start with 9 (e.g. 987654321)".into()],
            "email" => vec!["Use an address like name@example.com".into()],
            "fechaNacimiento" => vec![
                "Use the format YYYY-MM-DD".into(),
                "The birth date cannot be in the future".into(),
            ],
            field => vec![format!("Check the value of '{field}'")],
        }
    }
}
