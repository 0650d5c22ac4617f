//! Domain value objects: document types, catalogs, contact data.
//!
//! # Design
//!
//! Pure value types with equality-by-value and no identity. Every parser
//! trims and upper-cases (or lower-cases, for email) before matching, so the
//! stored value is always the normalized form.
//!
//! Catalog fields (`Sex`, `RelationshipType`) are *advisory*: unknown values
//! are kept in an `Other` variant and reported with a `warn!` event instead of
//! being rejected. Callers that need strictness check `is_recognized()`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::domain::error::ValidationError;

fn normalize_tag(raw: &str) -> String {
    raw.trim().to_uppercase()
}

// ── DocumentType ─────────────────────────────────────────────────────────────

/// Identity-document type tag.
///
/// To add a new type: add a variant here with its tag and aliases, then
/// register a validator in `validators.rs`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DocumentType {
    /// Peruvian national ID (DNI).
    Dni,
    /// Foreign-resident card (carné de extranjería).
    ForeignResidentCard,
    /// Temporary-permit card (PTP).
    TempPermitCard,
    /// School-issued student code.
    StudentCode,
    /// Any other document; validated by the generic rule.
    Other(String),
}

impl DocumentType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Dni => "DNI",
            Self::ForeignResidentCard => "CE",
            Self::TempPermitCard => "PTP",
            Self::StudentCode => "CODIGO_ESTUDIANTE",
            Self::Other(tag) => tag,
        }
    }

    /// Parse a raw form value. Blank input is the only failure.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let tag = normalize_tag(raw);
        if tag.is_empty() {
            return Err(ValidationError::required("tipoDocumento"));
        }
        Ok(match tag.as_str() {
            "DNI" | "NATIONAL_ID" => Self::Dni,
            "CE" | "CARNET_EXTRANJERIA" | "FOREIGN_RESIDENT_CARD" => Self::ForeignResidentCard,
            "PTP" | "TEMP_PERMIT_CARD" => Self::TempPermitCard,
            "CODIGO_ESTUDIANTE" | "STUDENT_CODE" => Self::StudentCode,
            _ => Self::Other(tag),
        })
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ── Sex ──────────────────────────────────────────────────────────────────────

/// Sex as captured by the enrollment form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Sex {
    Male,
    Female,
    Other(String),
}

impl Sex {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
            Self::Other(value) => value,
        }
    }

    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let value = normalize_tag(raw);
        match value.as_str() {
            "" => Err(ValidationError::required("sexo")),
            "M" | "MASCULINO" | "MALE" => Ok(Self::Male),
            "F" | "FEMENINO" | "FEMALE" => Ok(Self::Female),
            _ => {
                warn!(sexo = %value, "unrecognized sex value accepted");
                Ok(Self::Other(value))
            }
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── RelationshipType ─────────────────────────────────────────────────────────

/// How a legal representative relates to the student.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RelationshipType {
    ParentFather,
    ParentMother,
    Guardian,
    Grandparent,
    Sibling,
    Other(String),
}

impl RelationshipType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::ParentFather => "PARENT_FATHER",
            Self::ParentMother => "PARENT_MOTHER",
            Self::Guardian => "GUARDIAN",
            Self::Grandparent => "GRANDPARENT",
            Self::Sibling => "SIBLING",
            Self::Other(value) => value,
        }
    }

    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let value = normalize_tag(raw);
        match value.as_str() {
            "" => Err(ValidationError::required("tipoRelacion")),
            "PARENT_FATHER" | "PADRE" => Ok(Self::ParentFather),
            "PARENT_MOTHER" | "MADRE" => Ok(Self::ParentMother),
            "GUARDIAN" | "TUTOR" | "APODERADO" => Ok(Self::Guardian),
            "GRANDPARENT" | "ABUELO" | "ABUELA" => Ok(Self::Grandparent),
            "SIBLING" | "HERMANO" | "HERMANA" => Ok(Self::Sibling),
            _ => {
                warn!(tipo_relacion = %value, "unrecognized relationship type accepted");
                Ok(Self::Other(value))
            }
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Role ─────────────────────────────────────────────────────────────────────

/// System role. Fixed by the concrete user variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Docente,
    RepresentanteLegal,
}

impl Role {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Docente => "DOCENTE",
            Self::RepresentanteLegal => "REPRESENTANTE_LEGAL",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_tag(s).as_str() {
            "DOCENTE" | "TEACHER" => Ok(Self::Docente),
            "REPRESENTANTE_LEGAL" | "REPRESENTANTE" | "LEGAL_REPRESENTATIVE" => {
                Ok(Self::RepresentanteLegal)
            }
            "" => Err(ValidationError::required("rol")),
            other => Err(ValidationError::new("rol", format!("unknown role: {other}"))),
        }
    }
}

// ── Email ────────────────────────────────────────────────────────────────────

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Login email, stored lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    pub const MAX_LEN: usize = 254;

    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let email = raw.trim().to_lowercase();
        if email.is_empty() {
            return Err(ValidationError::required("email"));
        }
        if email.len() > Self::MAX_LEN || !EMAIL_PATTERN.is_match(&email) {
            return Err(ValidationError::new(
                "email",
                format!("invalid format: '{email}'"),
            ));
        }
        Ok(Self(email))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

// ── MobileNumber ─────────────────────────────────────────────────────────────

// `\d` is Unicode-aware in `regex`; only ASCII digits are valid here.
static MOBILE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^9[0-9]{8}$").expect("mobile pattern is a valid regex"));

/// Local mobile number: 9 digits, leading `9`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MobileNumber(String);

impl MobileNumber {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let number = raw.trim();
        if number.is_empty() {
            return Err(ValidationError::required("celular"));
        }
        if !MOBILE_PATTERN.is_match(number) {
            return Err(ValidationError::new(
                "celular",
                format!("'{number}' must be 9 digits starting with 9"),
            ));
        }
        Ok(Self(number.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MobileNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── StudentRef ───────────────────────────────────────────────────────────────

/// Non-owning reference to a student linked to a legal representative.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRef {
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    full_name: Option<String>,
}

impl StudentRef {
    pub fn new(id: impl AsRef<str>) -> Result<Self, ValidationError> {
        let id = id.as_ref().trim();
        if id.is_empty() {
            return Err(ValidationError::new("estudiante", "student id is required"));
        }
        Ok(Self {
            id: id.to_owned(),
            full_name: None,
        })
    }

    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        let full_name = full_name.into().trim().to_owned();
        self.full_name = (!full_name.is_empty()).then_some(full_name);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn full_name(&self) -> Option<&str> {
        self.full_name.as_deref()
    }
}
