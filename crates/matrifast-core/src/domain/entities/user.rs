//! User identity and the closed set of user variants.
//!
//! A user is a [`Person`] with a login email and a role. There is no bare
//! "user" value: the only way to hold one is through a concrete variant
//! ([`Docente`], [`RepresentanteLegal`]) or the sealed [`Usuario`] union of
//! both. The [`User`] trait gives uniform read access across variants.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::domain::{
    entities::{
        docente::Docente,
        document::Document,
        location::LocationRecord,
        person::{Person, PersonRecord},
        representante::RepresentanteLegal,
    },
    error::ValidationError,
    value_objects::{Email, Role},
};

// ── Identity ─────────────────────────────────────────────────────────────────

/// The part every user variant shares: person data, email and role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    person: Person,
    email: Email,
    role: Role,
}

impl UserIdentity {
    pub(crate) fn new(person: Person, email: &str, role: Role) -> Result<Self, ValidationError> {
        Ok(Self {
            person,
            email: Email::parse(email)?,
            role,
        })
    }

    pub fn person(&self) -> &Person {
        &self.person
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub(crate) fn with_person(&self, person: Person) -> Self {
        Self {
            person,
            ..self.clone()
        }
    }

    pub(crate) fn with_email(&self, email: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            email: Email::parse(email)?,
            ..self.clone()
        })
    }

    pub(crate) fn record(&self, user_type: UserType) -> UserRecord {
        UserRecord {
            person: self.person.serialize(),
            email: self.email.as_str().to_owned(),
            role: self.role,
            user_type,
            representative: None,
        }
    }
}

// ── User trait ───────────────────────────────────────────────────────────────

/// Read access shared by every user variant.
pub trait User {
    fn identity(&self) -> &UserIdentity;

    fn user_type(&self) -> UserType;

    /// Flat plain-data form consumed by persistence collaborators.
    fn serialize(&self) -> UserRecord;

    fn person(&self) -> &Person {
        self.identity().person()
    }

    fn id(&self) -> Option<Uuid> {
        self.person().id()
    }

    fn email(&self) -> &Email {
        self.identity().email()
    }

    fn role(&self) -> Role {
        self.identity().role()
    }

    fn full_name(&self) -> String {
        self.person().full_name()
    }
}

// ── Records ──────────────────────────────────────────────────────────────────

/// Discriminator written to the serialized record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserType {
    Teacher,
    LegalRepresentative,
}

impl UserType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Teacher => "TEACHER",
            Self::LegalRepresentative => "LEGAL_REPRESENTATIVE",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Plain-data form of any user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(flatten)]
    pub person: PersonRecord,
    pub email: String,
    pub role: Role,
    pub user_type: UserType,
    #[serde(flatten)]
    pub representative: Option<RepresentativeRecord>,
}

/// Extra fields carried by a legal representative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepresentativeRecord {
    pub relationship_type: String,
    pub address: LocationRecord,
    pub mobile_number: String,
    pub lives_with_student: bool,
    /// Student ids only.
    pub students: Vec<String>,
}

// ── Usuario ──────────────────────────────────────────────────────────────────

/// Any user of the system. Closed: there are exactly two kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Usuario {
    Docente(Docente),
    RepresentanteLegal(RepresentanteLegal),
}

impl Usuario {
    /// Return the user's id, assigning a fresh one if it has none yet.
    /// An existing id is never replaced.
    pub fn ensure_id(self) -> (Uuid, Self) {
        if let Some(id) = self.id() {
            return (id, self);
        }
        let id = Uuid::new_v4();
        let user = match self {
            Self::Docente(d) => Self::Docente(d.assign_id(id)),
            Self::RepresentanteLegal(r) => Self::RepresentanteLegal(r.assign_id(id)),
        };
        (id, user)
    }

    pub fn as_representante(&self) -> Option<&RepresentanteLegal> {
        match self {
            Self::RepresentanteLegal(r) => Some(r),
            Self::Docente(_) => None,
        }
    }

    pub fn as_representante_mut(&mut self) -> Option<&mut RepresentanteLegal> {
        match self {
            Self::RepresentanteLegal(r) => Some(r),
            Self::Docente(_) => None,
        }
    }

    /// Replace the identity document (or clear it with `None`).
    pub fn with_document(&self, document: Option<Document>) -> Self {
        let person = self.person().with_document(document);
        match self {
            Self::Docente(d) => Self::Docente(d.with_person(person)),
            Self::RepresentanteLegal(r) => Self::RepresentanteLegal(r.with_person(person)),
        }
    }
}

impl User for Usuario {
    fn identity(&self) -> &UserIdentity {
        match self {
            Self::Docente(d) => d.identity(),
            Self::RepresentanteLegal(r) => r.identity(),
        }
    }

    fn user_type(&self) -> UserType {
        match self {
            Self::Docente(d) => d.user_type(),
            Self::RepresentanteLegal(r) => r.user_type(),
        }
    }

    fn serialize(&self) -> UserRecord {
        match self {
            Self::Docente(d) => d.serialize(),
            Self::RepresentanteLegal(r) => r.serialize(),
        }
    }
}

impl From<Docente> for Usuario {
    fn from(docente: Docente) -> Self {
        Self::Docente(docente)
    }
}

impl From<RepresentanteLegal> for Usuario {
    fn from(representante: RepresentanteLegal) -> Self {
        Self::RepresentanteLegal(representante)
    }
}

impl fmt::Display for Usuario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}> ({})", self.full_name(), self.email(), self.role())
    }
}
