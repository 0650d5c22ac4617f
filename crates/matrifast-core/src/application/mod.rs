//! Application layer for MatriFast.
//!
//! This layer contains:
//! - **Services**: registration use cases (`RegistrationService`)
//! - **Ports**: the `UserRepository` trait persistence adapters implement
//! - **Errors**: orchestration failures (`ApplicationError`)
//!
//! The application layer sequences domain operations but holds no validation
//! rules of its own. All rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::RegistrationService;

pub use ports::UserRepository;

pub use error::ApplicationError;
