use uuid::Uuid;

use crate::domain::{
    builders::DocenteBuilder,
    entities::{
        person::Person,
        user::{User, UserIdentity, UserRecord, UserType},
    },
    error::ValidationError,
    value_objects::Role,
};

/// A teacher account. Role is always [`Role::Docente`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Docente {
    identity: UserIdentity,
}

impl Docente {
    pub fn builder() -> DocenteBuilder {
        DocenteBuilder::new()
    }

    pub(crate) fn new(person: Person, email: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            identity: UserIdentity::new(person, email, Role::Docente)?,
        })
    }

    pub(crate) fn assign_id(&self, id: Uuid) -> Self {
        self.with_person(self.person().clone().with_id(id))
    }

    pub fn with_person(&self, person: Person) -> Self {
        Self {
            identity: self.identity.with_person(person),
        }
    }

    pub fn with_email(&self, email: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            identity: self.identity.with_email(email)?,
        })
    }
}

impl User for Docente {
    fn identity(&self) -> &UserIdentity {
        &self.identity
    }

    fn user_type(&self) -> UserType {
        UserType::Teacher
    }

    fn serialize(&self) -> UserRecord {
        self.identity.record(UserType::Teacher)
    }
}
