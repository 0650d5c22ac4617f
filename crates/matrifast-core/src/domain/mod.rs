//! Core domain layer for MatriFast.
//!
//! Validation rules and the user model. Nothing here performs I/O; the only
//! side effect is a `tracing` warning when an unrecognized catalog value is
//! accepted.
//!
//! - **Eager validation**: every constructor and `with_*` update checks its
//!   input, so a value that exists is valid
//! - **Copy-on-write updates**: a failed update leaves the original untouched
//! - **Closed user set**: [`Usuario`] is either a [`Docente`] or a
//!   [`RepresentanteLegal`]
pub mod builders;
pub mod entities;
pub mod error;
pub mod validators;
pub mod value_objects;

pub use builders::{DocenteBuilder, FormData, PersonDraft, RepresentanteLegalBuilder};

pub use entities::{
    Docente, Document, DocumentRecord, Location, LocationRecord, Person, PersonRecord,
    RepresentanteLegal, RepresentativeRecord, User, UserIdentity, UserRecord, UserType, Usuario,
};

pub use error::ValidationError;

pub use validators::{DOCUMENT_VALIDATORS, DocumentValidator, validator_for};

pub use value_objects::{DocumentType, Email, MobileNumber, RelationshipType, Role, Sex, StudentRef};
