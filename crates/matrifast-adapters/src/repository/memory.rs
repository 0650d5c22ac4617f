//! In-memory user store.

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use tracing::debug;
use uuid::Uuid;

use matrifast_core::{
    application::{ApplicationError, ports::UserRepository},
    domain::{Email, User, Usuario},
    error::MatriFastResult,
};

#[derive(Debug, Default)]
struct Inner {
    users: HashMap<Uuid, Usuario>,
    // Insertion order, for stable listing.
    order: Vec<Uuid>,
}

/// Thread-safe in-memory user store.
///
/// Clones share the same underlying data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryUserRepository {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users (0 if the store is poisoned).
    pub fn len(&self) -> usize {
        self.inner.read().map_or(0, |inner| inner.order.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every user.
    pub fn clear(&self) -> MatriFastResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        inner.users.clear();
        inner.order.clear();
        Ok(())
    }
}

impl UserRepository for InMemoryUserRepository {
    /// Saving an id that is already stored replaces that user in place.
    fn save(&self, user: Usuario) -> MatriFastResult<Uuid> {
        let (id, user) = user.ensure_id();
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        if inner.users.insert(id, user).is_none() {
            inner.order.push(id);
        }
        debug!(%id, "user saved");
        Ok(id)
    }

    fn find_by_id(&self, id: Uuid) -> MatriFastResult<Option<Usuario>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        Ok(inner.users.get(&id).cloned())
    }

    fn find_by_email(&self, email: &Email) -> MatriFastResult<Option<Usuario>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        Ok(inner
            .users
            .values()
            .find(|user| user.email() == email)
            .cloned())
    }

    fn update(&self, user: Usuario) -> MatriFastResult<()> {
        let Some(id) = user.id() else {
            return Err(ApplicationError::UserNotFound {
                id: "<unassigned>".into(),
            }
            .into());
        };

        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        match inner.users.get_mut(&id) {
            Some(slot) => {
                *slot = user;
                Ok(())
            }
            None => Err(ApplicationError::UserNotFound { id: id.to_string() }.into()),
        }
    }

    fn list(&self) -> MatriFastResult<Vec<Usuario>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        Ok(inner
            .order
            .iter()
            .filter_map(|id| inner.users.get(id))
            .cloned()
            .collect())
    }
}
