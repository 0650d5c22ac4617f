//! Application ports (traits) for external dependencies.
//!
//! Persistence is an external collaborator: the application only states what
//! it needs, and `matrifast-adapters` provides implementations.
//!
//! - **Driven (Output) Ports**: called by the application
//!   - `UserRepository`: user storage and lookup

pub mod output;

pub use output::UserRepository;

#[cfg(test)]
pub use output::MockUserRepository;
