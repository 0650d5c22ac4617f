//! Document validator registry.
//!
//! Each document type is validated by exactly one [`DocumentValidator`],
//! registered once in [`DOCUMENT_VALIDATORS`]. Lookup is a table scan with an
//! explicit fallback to [`GenericValidator`] for unregistered tags.
//!
//! # Adding a Document Type
//!
//! 1. Add a variant to `DocumentType` in `value_objects.rs`
//! 2. Implement `DocumentValidator` for a new unit struct here
//! 3. Add one entry to [`DOCUMENT_VALIDATORS`]

use crate::domain::value_objects::DocumentType;

/// Format rule for one document type.
///
/// `number` is already trimmed. Implementations are pure and never panic.
pub trait DocumentValidator: Send + Sync {
    fn validate(&self, number: &str) -> bool;

    /// Human-readable rule, used in error messages.
    fn describe(&self) -> &'static str;
}

fn alphanumeric_between(number: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&number.len()) && number.chars().all(|c| c.is_ascii_alphanumeric())
}

/// DNI: exactly 8 ASCII digits.
#[derive(Debug, Clone, Copy, Default)]
pub struct NationalIdValidator;

impl DocumentValidator for NationalIdValidator {
    fn validate(&self, number: &str) -> bool {
        number.len() == 8 && number.chars().all(|c| c.is_ascii_digit())
    }

    fn describe(&self) -> &'static str {
        "exactly 8 digits"
    }
}

/// Foreign-resident card: 9–12 alphanumerics.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForeignResidentCardValidator;

impl DocumentValidator for ForeignResidentCardValidator {
    fn validate(&self, number: &str) -> bool {
        alphanumeric_between(number, 9, 12)
    }

    fn describe(&self) -> &'static str {
        "9 to 12 letters or digits"
    }
}

/// Temporary-permit card: 9–15 alphanumerics.
#[derive(Debug, Clone, Copy, Default)]
pub struct TempPermitCardValidator;

impl DocumentValidator for TempPermitCardValidator {
    fn validate(&self, number: &str) -> bool {
        alphanumeric_between(number, 9, 15)
    }

    fn describe(&self) -> &'static str {
        "9 to 15 letters or digits"
    }
}

/// Student code: 5–20 alphanumerics.
#[derive(Debug, Clone, Copy, Default)]
pub struct StudentCodeValidator;

impl DocumentValidator for StudentCodeValidator {
    fn validate(&self, number: &str) -> bool {
        alphanumeric_between(number, 5, 20)
    }

    fn describe(&self) -> &'static str {
        "5 to 20 letters or digits"
    }
}

/// Fallback for unregistered types: any non-empty number.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericValidator;

impl DocumentValidator for GenericValidator {
    fn validate(&self, number: &str) -> bool {
        !number.is_empty()
    }

    fn describe(&self) -> &'static str {
        "at least 1 character"
    }
}

/// Single source of truth mapping document tags to validators.
pub static DOCUMENT_VALIDATORS: &[(&str, &dyn DocumentValidator)] = &[
    ("DNI", &NationalIdValidator),
    ("CE", &ForeignResidentCardValidator),
    ("PTP", &TempPermitCardValidator),
    ("CODIGO_ESTUDIANTE", &StudentCodeValidator),
];

static FALLBACK: GenericValidator = GenericValidator;

/// Find the validator for a document type, falling back to the generic rule.
pub fn validator_for(doc_type: &DocumentType) -> &'static dyn DocumentValidator {
    DOCUMENT_VALIDATORS
        .iter()
        .find(|(tag, _)| *tag == doc_type.as_str())
        .map(|(_, validator)| *validator)
        .unwrap_or(&FALLBACK)
}
