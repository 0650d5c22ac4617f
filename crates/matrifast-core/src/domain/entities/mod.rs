pub mod docente;
pub mod document;
pub mod location;
pub mod person;
pub mod representante;
pub mod user;

pub use docente::Docente;
pub use document::{Document, DocumentRecord};
pub use location::{Location, LocationRecord};
pub use person::{Person, PersonRecord};
pub use representante::RepresentanteLegal;
pub use user::{RepresentativeRecord, User, UserIdentity, UserRecord, UserType, Usuario};
