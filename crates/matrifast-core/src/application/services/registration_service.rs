//! Registration Service - user registration and maintenance.
//!
//! Each use case is a short sequence: build (which validates), check the
//! store, write. There are no transactions; a failure at any step leaves the
//! store exactly as it was before the failing write.

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::{ApplicationError, ports::UserRepository},
    domain::{
        DocenteBuilder, Document, Email, FormData, RepresentanteLegalBuilder, StudentRef, User,
        Usuario,
    },
    error::{MatriFastError, MatriFastResult},
};

/// Service for registering users and updating registered ones.
pub struct RegistrationService {
    repository: Box<dyn UserRepository>,
}

impl RegistrationService {
    pub fn new(repository: Box<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Register a teacher from a submitted form.
    #[instrument(skip_all, fields(email = %email))]
    pub fn register_docente(&self, form: &FormData, email: &str) -> MatriFastResult<Usuario> {
        let docente = DocenteBuilder::from_form_data(form, email).build()?;
        self.register(docente.into())
    }

    /// Register a legal representative from a submitted form.
    #[instrument(skip_all, fields(email = %email))]
    pub fn register_representante(
        &self,
        form: &FormData,
        email: &str,
    ) -> MatriFastResult<Usuario> {
        let representante = RepresentanteLegalBuilder::from_form_data(form, email).build()?;
        self.register(representante.into())
    }

    fn register(&self, user: Usuario) -> MatriFastResult<Usuario> {
        if self.repository.find_by_email(user.email())?.is_some() {
            warn!(email = %user.email(), "Registration rejected: email already in use");
            return Err(ApplicationError::DuplicateEmail {
                email: user.email().to_string(),
            }
            .into());
        }

        let (id, user) = user.ensure_id();
        let stored = self.repository.save(user.clone())?;
        if stored != id {
            return Err(MatriFastError::Internal {
                message: format!("store assigned id {stored}, expected {id}"),
            });
        }

        info!(%id, user_type = %user.user_type(), "User registered");
        Ok(user)
    }

    /// Link a student to a legal representative.
    ///
    /// Returns `false` if the student was already linked (nothing is written).
    #[instrument(skip(self, student), fields(student = %student.id()))]
    pub fn link_student(&self, user_id: Uuid, student: StudentRef) -> MatriFastResult<bool> {
        let mut user = self.load(user_id)?;
        let representante = user.as_representante_mut().ok_or_else(|| {
            ApplicationError::NotALegalRepresentative {
                id: user_id.to_string(),
            }
        })?;

        if !representante.add_student(student) {
            debug!("Student already linked");
            return Ok(false);
        }

        self.repository.update(user)?;
        info!("Student linked");
        Ok(true)
    }

    /// Replace a user's identity document.
    ///
    /// The new document is validated before anything is written; on failure
    /// the stored user is unchanged.
    #[instrument(skip(self))]
    pub fn change_document(
        &self,
        user_id: Uuid,
        doc_type: &str,
        number: &str,
    ) -> MatriFastResult<Usuario> {
        let document = Document::new(doc_type, number)?;
        let user = self.load(user_id)?.with_document(Some(document));
        self.repository.update(user.clone())?;
        info!("Document updated");
        Ok(user)
    }

    /// Look up a user by email. Input is normalized before lookup.
    pub fn find_by_email(&self, email: &str) -> MatriFastResult<Option<Usuario>> {
        let email = Email::parse(email)?;
        self.repository.find_by_email(&email)
    }

    pub fn find_by_id(&self, id: Uuid) -> MatriFastResult<Option<Usuario>> {
        self.repository.find_by_id(id)
    }

    pub fn list(&self) -> MatriFastResult<Vec<Usuario>> {
        self.repository.list()
    }

    fn load(&self, id: Uuid) -> MatriFastResult<Usuario> {
        self.repository.find_by_id(id)?.ok_or_else(|| {
            ApplicationError::UserNotFound { id: id.to_string() }.into()
        })
    }
}
