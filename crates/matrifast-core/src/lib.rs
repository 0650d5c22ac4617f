//! MatriFast Core - enrollment domain model and validation
//!
//! This crate provides the domain and application layers for MatriFast, a
//! school enrollment system. It validates everything a registration form can
//! carry (identity documents, names, dates, contact data) and turns raw form
//! input into fully-validated user objects.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          matrifast-cli (CLI)            │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │         (RegistrationService)           │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │            (UserRepository)             │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   matrifast-adapters (Infrastructure)   │
//! │  (InMemoryUserRepository, FormLoader)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │  (Document, Person, Usuario, builders)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use matrifast_core::prelude::*;
//!
//! let docente = Docente::builder()
//!     .nombres("Ana")
//!     .a_paterno("Ruiz")
//!     .fecha_nacimiento("1990-01-01")
//!     .sexo("F")
//!     .documento("DNI", "12345678")
//!     .email("ana@x.com")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(docente.full_name(), "Ana Ruiz");
//! assert_eq!(docente.role(), Role::Docente);
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{RegistrationService, ports::UserRepository};
    pub use crate::domain::{
        Docente, DocenteBuilder, Document, DocumentType, FormData, Location, Person,
        RepresentanteLegal, RepresentanteLegalBuilder, Role, StudentRef, User, UserRecord,
        UserType, Usuario, ValidationError,
    };
    pub use crate::error::{MatriFastError, MatriFastResult};
}
