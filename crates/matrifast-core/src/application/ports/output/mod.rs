//! Driven (output) ports - implemented by infrastructure.

use uuid::Uuid;

use crate::domain::{Email, Usuario};
use crate::error::MatriFastResult;

/// Port for user storage.
///
/// Implemented by:
/// - `matrifast_adapters::repository::InMemoryUserRepository`
///
/// Stores receive already-validated users and never re-validate them.
#[cfg_attr(test, mockall::automock)]
pub trait UserRepository: Send + Sync {
    /// Store a new user, assigning an id if it has none. Returns the id.
    fn save(&self, user: Usuario) -> MatriFastResult<Uuid>;

    fn find_by_id(&self, id: Uuid) -> MatriFastResult<Option<Usuario>>;

    /// Emails are stored normalized, so lookup is exact.
    fn find_by_email(&self, email: &Email) -> MatriFastResult<Option<Usuario>>;

    /// Replace a stored user. Fails with `UserNotFound` if the id is unknown.
    fn update(&self, user: Usuario) -> MatriFastResult<()>;

    fn list(&self) -> MatriFastResult<Vec<Usuario>>;
}
