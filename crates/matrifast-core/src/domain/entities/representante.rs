//! Legal representative: a parent or guardian linked to one or more students.

use uuid::Uuid;

use crate::domain::{
    builders::RepresentanteLegalBuilder,
    entities::{
        location::Location,
        person::Person,
        user::{RepresentativeRecord, User, UserIdentity, UserRecord, UserType},
    },
    error::ValidationError,
    value_objects::{MobileNumber, RelationshipType, Role, StudentRef},
};

/// Raw representative-only fields, as collected by a builder.
#[derive(Debug, Clone, Default)]
pub(crate) struct RepresentativeFields<'a> {
    pub relationship_type: &'a str,
    pub address: &'a str,
    pub mobile_number: &'a str,
    pub lives_with_student: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepresentanteLegal {
    identity: UserIdentity,
    relationship_type: RelationshipType,
    address: Location,
    mobile_number: MobileNumber,
    lives_with_student: bool,
    // Back-references; order of linking is preserved, ids are unique.
    students: Vec<StudentRef>,
}

impl RepresentanteLegal {
    pub fn builder() -> RepresentanteLegalBuilder {
        RepresentanteLegalBuilder::new()
    }

    pub(crate) fn new(
        person: Person,
        email: &str,
        fields: RepresentativeFields<'_>,
    ) -> Result<Self, ValidationError> {
        let identity = UserIdentity::new(person, email, Role::RepresentanteLegal)?;
        Ok(Self {
            identity,
            relationship_type: RelationshipType::parse(fields.relationship_type)?,
            address: Location::new(fields.address)?,
            mobile_number: MobileNumber::parse(fields.mobile_number)?,
            lives_with_student: fields.lives_with_student,
            students: Vec::new(),
        })
    }

    pub fn relationship_type(&self) -> &RelationshipType {
        &self.relationship_type
    }

    pub fn address(&self) -> &Location {
        &self.address
    }

    pub fn mobile_number(&self) -> &MobileNumber {
        &self.mobile_number
    }

    pub fn lives_with_student(&self) -> bool {
        self.lives_with_student
    }

    /// Linked students. Returns a copy; use [`Self::add_student`] to link.
    pub fn students(&self) -> Vec<StudentRef> {
        self.students.clone()
    }

    pub fn has_student(&self, id: &str) -> bool {
        self.students.iter().any(|s| s.id() == id)
    }

    /// Link a student. Returns `false` (and changes nothing) if a student
    /// with the same id is already linked.
    pub fn add_student(&mut self, student: StudentRef) -> bool {
        if self.has_student(student.id()) {
            return false;
        }
        self.students.push(student);
        true
    }

    /// Unlink a student by id. Returns whether anything was removed.
    pub fn remove_student(&mut self, id: &str) -> bool {
        let before = self.students.len();
        self.students.retain(|s| s.id() != id);
        self.students.len() != before
    }

    pub(crate) fn assign_id(&self, id: Uuid) -> Self {
        self.with_person(self.person().clone().with_id(id))
    }

    pub fn with_person(&self, person: Person) -> Self {
        Self {
            identity: self.identity.with_person(person),
            ..self.clone()
        }
    }

    pub fn with_email(&self, email: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            identity: self.identity.with_email(email)?,
            ..self.clone()
        })
    }

    pub fn with_relationship_type(&self, relationship: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            relationship_type: RelationshipType::parse(relationship)?,
            ..self.clone()
        })
    }

    pub fn with_address(&self, address: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            address: Location::new(address)?,
            ..self.clone()
        })
    }

    pub fn with_mobile_number(&self, mobile: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            mobile_number: MobileNumber::parse(mobile)?,
            ..self.clone()
        })
    }

    pub fn with_lives_with_student(&self, lives_with_student: bool) -> Self {
        Self {
            lives_with_student,
            ..self.clone()
        }
    }
}

impl User for RepresentanteLegal {
    fn identity(&self) -> &UserIdentity {
        &self.identity
    }

    fn user_type(&self) -> UserType {
        UserType::LegalRepresentative
    }

    fn serialize(&self) -> UserRecord {
        UserRecord {
            representative: Some(RepresentativeRecord {
                relationship_type: self.relationship_type.as_str().to_owned(),
                address: self.address.serialize(),
                mobile_number: self.mobile_number.as_str().to_owned(),
                lives_with_student: self.lives_with_student,
                students: self.students.iter().map(|s| s.id().to_owned()).collect(),
            }),
            ..self.identity.record(UserType::LegalRepresentative)
        }
    }
}
