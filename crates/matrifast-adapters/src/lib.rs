//! Infrastructure adapters for MatriFast.
//!
//! This crate implements the ports defined in `matrifast_core::application::ports`
//! and holds every I/O concern (reading submitted forms from disk).

pub mod form_loader;
pub mod repository;

// Re-export commonly used adapters
pub use form_loader::{FormLoader, FormSubmission, LoadError, LoadReport, SubmissionKind};
pub use repository::InMemoryUserRepository;
