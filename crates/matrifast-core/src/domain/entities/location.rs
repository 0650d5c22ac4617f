use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::error::ValidationError;

/// A free-text address.
///
/// Invariant: never empty after trimming. Enforced at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    address: String,
}

impl Location {
    pub fn new(address: &str) -> Result<Self, ValidationError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(ValidationError::new("direccion", "address cannot be empty"));
        }
        Ok(Self {
            address: address.to_owned(),
        })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn serialize(&self) -> LocationRecord {
        LocationRecord {
            address: self.address.clone(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address)
    }
}

/// Plain-data form of a [`Location`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub address: String,
}

impl TryFrom<&LocationRecord> for Location {
    type Error = ValidationError;

    fn try_from(record: &LocationRecord) -> Result<Self, Self::Error> {
        Self::new(&record.address)
    }
}
