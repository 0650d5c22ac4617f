//! Identity document value object.
//!
//! A `Document` pairs a [`DocumentType`] with a number that satisfies that
//! type's registered rule. The pair is validated atomically on construction;
//! changing either half goes through `with_type` / `with_number`, which
//! re-validate and return a new value, so a half-updated document is never
//! observable.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::{error::ValidationError, validators, value_objects::DocumentType};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Document {
    doc_type: DocumentType,
    number: String,
}

impl Document {
    /// Validate and build a document from raw form values.
    ///
    /// # Errors
    ///
    /// - `tipoDocumento` if the type is blank
    /// - `numeroDocumento` if the number is blank
    /// - `Documento` if the number does not match the type's rule
    pub fn new(doc_type: &str, number: &str) -> Result<Self, ValidationError> {
        let doc_type = DocumentType::parse(doc_type)?;
        Self::from_parts(doc_type, number)
    }

    fn from_parts(doc_type: DocumentType, number: &str) -> Result<Self, ValidationError> {
        let number = number.trim();
        if number.is_empty() {
            return Err(ValidationError::required("numeroDocumento"));
        }
        let document = Self {
            doc_type,
            number: number.to_owned(),
        };
        document.validate()?;
        Ok(document)
    }

    pub fn doc_type(&self) -> &DocumentType {
        &self.doc_type
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    /// Re-check the type/number invariant.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let validator = validators::validator_for(&self.doc_type);
        if validator.validate(&self.number) {
            Ok(())
        } else {
            Err(ValidationError::new(
                "Documento",
                format!(
                    "invalid number '{}' for document type {} (expected {})",
                    self.number,
                    self.doc_type,
                    validator.describe()
                ),
            ))
        }
    }

    /// Same number under a different type. Fails if the number does not fit
    /// the new type's rule.
    pub fn with_type(&self, doc_type: &str) -> Result<Self, ValidationError> {
        Self::from_parts(DocumentType::parse(doc_type)?, &self.number)
    }

    /// Same type with a different number.
    pub fn with_number(&self, number: &str) -> Result<Self, ValidationError> {
        Self::from_parts(self.doc_type.clone(), number)
    }

    pub fn serialize(&self) -> DocumentRecord {
        DocumentRecord {
            doc_type: self.doc_type.as_str().to_owned(),
            number: self.number.clone(),
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.doc_type, self.number)
    }
}

/// Plain-data form of a [`Document`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    #[serde(rename = "type")]
    pub doc_type: String,
    pub number: String,
}

impl TryFrom<&DocumentRecord> for Document {
    type Error = ValidationError;

    fn try_from(record: &DocumentRecord) -> Result<Self, Self::Error> {
        Self::new(&record.doc_type, &record.number)
    }
}
