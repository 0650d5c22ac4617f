//! Fluent builders that assemble users from raw form input.
//!
//! A builder is a plain accumulator: setters store the raw value and never
//! fail, in any order. [`DocenteBuilder::build`] /
//! [`RepresentanteLegalBuilder::build`] are the only fallible calls, and they
//! fail exactly when the entity constructors would. `build` borrows, so one
//! builder can produce several entities; `reset` returns it to defaults.
//!
//! Fields are checked in form order: `nombres`, `aPaterno`,
//! `fechaNacimiento`, `sexo`, the document, `email`, then the
//! representative-only fields. The first violation is returned.

use serde::{Deserialize, Deserializer, Serialize, de};
use uuid::Uuid;

use crate::domain::{
    entities::{
        docente::Docente,
        document::Document,
        person::{Person, PersonFields},
        representante::{RepresentanteLegal, RepresentativeFields},
        user::UserRecord,
    },
    error::ValidationError,
    value_objects::StudentRef,
};

// ── Form data ────────────────────────────────────────────────────────────────

/// Flat record submitted by the enrollment / registration form.
///
/// Keys follow the form's field names. Every key is optional at this stage;
/// required-ness is decided by `build`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormData {
    pub id: Option<String>,
    pub nombres: Option<String>,
    pub a_paterno: Option<String>,
    pub a_materno: Option<String>,
    pub fecha_nacimiento: Option<String>,
    pub sexo: Option<String>,
    pub tipo_documento: Option<String>,
    pub numero_documento: Option<String>,
    pub tipo_relacion: Option<String>,
    pub direccion: Option<String>,
    pub celular: Option<String>,
    /// Accepts a boolean, `0`/`1`, or a yes/no word such as `"sí"` or `"on"`.
    #[serde(deserialize_with = "lenient_flag")]
    pub vive_con_estudiante: Option<bool>,
}

/// Form checkboxes arrive as booleans, numbers or words depending on the
/// client. A blank string counts as unanswered.
fn lenient_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Number(i64),
        Text(String),
    }

    let invalid = |shown: String| -> D::Error {
        de::Error::custom(format!("viveConEstudiante: expected yes or no, got {shown}"))
    };

    match Option::<Flag>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Flag::Bool(value)) => Ok(Some(value)),
        Some(Flag::Number(1)) => Ok(Some(true)),
        Some(Flag::Number(0)) => Ok(Some(false)),
        Some(Flag::Number(n)) => Err(invalid(n.to_string())),
        Some(Flag::Text(raw)) => match raw.trim().to_lowercase().as_str() {
            "" => Ok(None),
            "true" | "1" | "yes" | "y" | "si" | "sí" | "s" | "on" => Ok(Some(true)),
            "false" | "0" | "no" | "n" | "off" => Ok(Some(false)),
            _ => Err(invalid(format!("'{raw}'"))),
        },
    }
}

// ── Person draft ─────────────────────────────────────────────────────────────

/// Not-yet-validated person fields shared by both builders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonDraft {
    pub id: Option<String>,
    pub nombres: String,
    pub a_paterno: String,
    pub a_materno: Option<String>,
    pub fecha_nacimiento: String,
    pub sexo: String,
    pub tipo_documento: Option<String>,
    pub numero_documento: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

impl PersonDraft {
    fn from_form(form: &FormData) -> Self {
        Self {
            id: form.id.clone(),
            nombres: form.nombres.clone().unwrap_or_default(),
            a_paterno: form.a_paterno.clone().unwrap_or_default(),
            a_materno: form.a_materno.clone(),
            fecha_nacimiento: form.fecha_nacimiento.clone().unwrap_or_default(),
            sexo: form.sexo.clone().unwrap_or_default(),
            tipo_documento: form.tipo_documento.clone(),
            numero_documento: form.numero_documento.clone(),
        }
    }

    fn from_record(record: &UserRecord) -> Self {
        let person = &record.person;
        Self {
            id: person.id.map(|id| id.to_string()),
            nombres: person.given_names.clone(),
            a_paterno: person.paternal_surname.clone(),
            a_materno: person.maternal_surname.clone(),
            fecha_nacimiento: person.birth_date.to_string(),
            sexo: person.sex.clone(),
            tipo_documento: person.document.as_ref().map(|d| d.doc_type.clone()),
            numero_documento: person.document.as_ref().map(|d| d.number.clone()),
        }
    }

    fn parse_id(&self) -> Result<Option<Uuid>, ValidationError> {
        non_blank(&self.id)
            .map(|raw| {
                Uuid::parse_str(raw.trim())
                    .map_err(|_| ValidationError::new("id", format!("not a valid id: '{raw}'")))
            })
            .transpose()
    }

    /// No document when both parts are blank; otherwise the pair must be valid.
    fn document(&self) -> Result<Option<Document>, ValidationError> {
        let doc_type = non_blank(&self.tipo_documento);
        let number = non_blank(&self.numero_documento);
        if doc_type.is_none() && number.is_none() {
            return Ok(None);
        }
        Document::new(doc_type.unwrap_or_default(), number.unwrap_or_default()).map(Some)
    }

    fn build(&self) -> Result<Person, ValidationError> {
        let person = Person::new(PersonFields {
            id: self.parse_id()?,
            given_names: &self.nombres,
            paternal_surname: &self.a_paterno,
            maternal_surname: self.a_materno.as_deref(),
            birth_date: &self.fecha_nacimiento,
            sex: &self.sexo,
            document: None,
        })?;
        Ok(person.with_document(self.document()?))
    }
}

/// Generates the person-field setters on a builder holding a `person: PersonDraft`.
macro_rules! person_setters {
    () => {
        pub fn id(mut self, id: impl Into<String>) -> Self {
            self.person.id = Some(id.into());
            self
        }

        pub fn nombres(mut self, nombres: impl Into<String>) -> Self {
            self.person.nombres = nombres.into();
            self
        }

        pub fn a_paterno(mut self, a_paterno: impl Into<String>) -> Self {
            self.person.a_paterno = a_paterno.into();
            self
        }

        pub fn a_materno(mut self, a_materno: Option<String>) -> Self {
            self.person.a_materno = a_materno;
            self
        }

        pub fn fecha_nacimiento(mut self, fecha: impl Into<String>) -> Self {
            self.person.fecha_nacimiento = fecha.into();
            self
        }

        pub fn sexo(mut self, sexo: impl Into<String>) -> Self {
            self.person.sexo = sexo.into();
            self
        }

        pub fn documento(mut self, tipo: impl Into<String>, numero: impl Into<String>) -> Self {
            self.person.tipo_documento = Some(tipo.into());
            self.person.numero_documento = Some(numero.into());
            self
        }

        pub fn email(mut self, email: impl Into<String>) -> Self {
            self.email = email.into();
            self
        }

        /// Pending person fields, for inspection before `build`.
        pub fn person(&self) -> &PersonDraft {
            &self.person
        }

        pub fn pending_email(&self) -> &str {
            &self.email
        }

        /// Discard all accumulated values.
        pub fn reset(self) -> Self {
            Self::default()
        }
    };
}

// ── DocenteBuilder ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocenteBuilder {
    person: PersonDraft,
    email: String,
}

impl DocenteBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    person_setters!();

    /// Map a submitted form plus the account email onto a builder.
    pub fn from_form_data(form: &FormData, email: impl Into<String>) -> Self {
        Self {
            person: PersonDraft::from_form(form),
            email: email.into(),
        }
    }

    /// Rebuild from a serialized user (the representative extras are ignored).
    pub fn from_record(record: &UserRecord) -> Self {
        Self {
            person: PersonDraft::from_record(record),
            email: record.email.clone(),
        }
    }

    pub fn build(&self) -> Result<Docente, ValidationError> {
        Docente::new(self.person.build()?, &self.email)
    }
}

// ── RepresentanteLegalBuilder ────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepresentanteLegalBuilder {
    person: PersonDraft,
    email: String,
    tipo_relacion: String,
    direccion: String,
    celular: String,
    vive_con_estudiante: bool,
    estudiantes: Vec<StudentRef>,
}

impl RepresentanteLegalBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    person_setters!();

    pub fn tipo_relacion(mut self, tipo: impl Into<String>) -> Self {
        self.tipo_relacion = tipo.into();
        self
    }

    pub fn direccion(mut self, direccion: impl Into<String>) -> Self {
        self.direccion = direccion.into();
        self
    }

    pub fn celular(mut self, celular: impl Into<String>) -> Self {
        self.celular = celular.into();
        self
    }

    pub fn vive_con_estudiante(mut self, vive: bool) -> Self {
        self.vive_con_estudiante = vive;
        self
    }

    /// Link a student on build. Duplicates collapse like `add_student`.
    pub fn estudiante(mut self, student: StudentRef) -> Self {
        self.estudiantes.push(student);
        self
    }

    pub fn pending_students(&self) -> &[StudentRef] {
        &self.estudiantes
    }

    pub fn from_form_data(form: &FormData, email: impl Into<String>) -> Self {
        Self {
            person: PersonDraft::from_form(form),
            email: email.into(),
            tipo_relacion: form.tipo_relacion.clone().unwrap_or_default(),
            direccion: form.direccion.clone().unwrap_or_default(),
            celular: form.celular.clone().unwrap_or_default(),
            vive_con_estudiante: form.vive_con_estudiante.unwrap_or(false),
            estudiantes: Vec::new(),
        }
    }

    /// Rebuild from a serialized user.
    ///
    /// # Errors
    ///
    /// Fails if the record carries no representative fields or a blank
    /// student id.
    pub fn from_record(record: &UserRecord) -> Result<Self, ValidationError> {
        let extra = record.representative.as_ref().ok_or_else(|| {
            ValidationError::new("RepresentanteLegal", "record has no representative fields")
        })?;
        Ok(Self {
            person: PersonDraft::from_record(record),
            email: record.email.clone(),
            tipo_relacion: extra.relationship_type.clone(),
            direccion: extra.address.address.clone(),
            celular: extra.mobile_number.clone(),
            vive_con_estudiante: extra.lives_with_student,
            estudiantes: extra
                .students
                .iter()
                .map(StudentRef::new)
                .collect::<Result<_, _>>()?,
        })
    }

    pub fn build(&self) -> Result<RepresentanteLegal, ValidationError> {
        let person = self.person.build()?;
        let mut representante = RepresentanteLegal::new(
            person,
            &self.email,
            RepresentativeFields {
                relationship_type: &self.tipo_relacion,
                address: &self.direccion,
                mobile_number: &self.celular,
                lives_with_student: self.vive_con_estudiante,
            },
        )?;
        for student in &self.estudiantes {
            representante.add_student(student.clone());
        }
        Ok(representante)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        entities::user::{User, UserType},
        value_objects::{DocumentType, Role},
    };

    fn ana_form() -> FormData {
        FormData {
            nombres: Some("Ana".into()),
            a_paterno: Some("Ruiz".into()),
            fecha_nacimiento: Some("1990-01-01".into()),
            sexo: Some("F".into()),
            tipo_documento: Some("DNI".into()),
            numero_documento: Some("12345678".into()),
            ..FormData::default()
        }
    }

    fn luis_form() -> FormData {
        FormData {
            nombres: Some("Luis".into()),
            a_paterno: Some("Soto".into()),
            a_materno: Some("Paredes".into()),
            fecha_nacimiento: Some("1985-05-20".into()),
            sexo: Some("M".into()),
            tipo_relacion: Some("PADRE".into()),
            direccion: Some("Jr. Unión 12".into()),
            celular: Some("987654321".into()),
            vive_con_estudiante: Some(true),
            ..FormData::default()
        }
    }

    #[test]
    fn docente_from_form_data_end_to_end() {
        let docente = DocenteBuilder::from_form_data(&ana_form(), "ana@x.com")
            .build()
            .unwrap();
        assert_eq!(docente.role(), Role::Docente);
        assert_eq!(docente.role().as_str(), "DOCENTE");
        assert_eq!(docente.full_name(), "Ana Ruiz");
        assert_eq!(docente.serialize().user_type, UserType::Teacher);
        assert_eq!(docente.serialize().user_type.as_str(), "TEACHER");
        let doc = docente.person().document().unwrap();
        assert_eq!(doc.doc_type(), &DocumentType::Dni);
    }

    #[test]
    fn absent_maternal_surname_maps_to_none() {
        let builder = DocenteBuilder::from_form_data(&ana_form(), "ana@x.com");
        assert_eq!(builder.person().a_materno, None);
        assert_eq!(builder.build().unwrap().person().maternal_surname(), None);
    }

    #[test]
    fn form_data_deserializes_form_keys() {
        let json = r#"{
            "nombres": "Ana", "aPaterno": "Ruiz", "fechaNacimiento": "1990-01-01",
            "sexo": "F", "tipoDocumento": "DNI", "numeroDocumento": "12345678"
        }"#;
        let form: FormData = serde_json::from_str(json).unwrap();
        assert_eq!(form, ana_form());
    }

    #[test]
    fn setter_order_is_irrelevant() {
        let a = DocenteBuilder::new()
            .email("ana@x.com")
            .sexo("F")
            .nombres("Ana")
            .fecha_nacimiento("1990-01-01")
            .a_paterno("Ruiz")
            .build()
            .unwrap();
        let b = DocenteBuilder::new()
            .nombres("Ana")
            .a_paterno("Ruiz")
            .fecha_nacimiento("1990-01-01")
            .sexo("F")
            .email("ana@x.com")
            .build()
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn build_reports_first_invalid_field_in_form_order() {
        let err = DocenteBuilder::new().email("bad").build().unwrap_err();
        assert_eq!(err.field(), "nombres");

        let err = DocenteBuilder::from_form_data(&ana_form(), "bad").build().unwrap_err();
        assert_eq!(err.field(), "email");

        let form = FormData {
            numero_documento: Some("1234567".into()),
            ..ana_form()
        };
        let err = DocenteBuilder::from_form_data(&form, "bad").build().unwrap_err();
        assert_eq!(err.field(), "Documento");
    }

    #[test]
    fn document_half_is_an_error() {
        let form = FormData {
            tipo_documento: None,
            ..ana_form()
        };
        let err = DocenteBuilder::from_form_data(&form, "ana@x.com")
            .build()
            .unwrap_err();
        assert_eq!(err.field(), "tipoDocumento");
    }

    #[test]
    fn no_document_is_allowed() {
        let form = FormData {
            tipo_documento: Some("  ".into()),
            numero_documento: None,
            ..ana_form()
        };
        let d = DocenteBuilder::from_form_data(&form, "ana@x.com").build().unwrap();
        assert!(d.person().document().is_none());
    }

    #[test]
    fn invalid_id_is_rejected_at_build() {
        let form = FormData {
            id: Some("not-a-uuid".into()),
            ..ana_form()
        };
        let builder = DocenteBuilder::from_form_data(&form, "ana@x.com");
        assert_eq!(builder.build().unwrap_err().field(), "id");

        let id = Uuid::new_v4();
        let d = builder.id(id.to_string()).build().unwrap();
        assert_eq!(d.id(), Some(id));
    }

    #[test]
    fn reset_restores_defaults() {
        let builder = RepresentanteLegalBuilder::new()
            .nombres("Luis")
            .celular("987654321")
            .vive_con_estudiante(true)
            .estudiante(StudentRef::new("st-1").unwrap());
        assert_eq!(builder.person().nombres, "Luis");

        let builder = builder.reset();
        assert_eq!(builder.person().nombres, "");
        assert_eq!(builder.person().a_materno, None);
        assert_eq!(builder.pending_email(), "");
        assert!(builder.pending_students().is_empty());
        assert_eq!(builder, RepresentanteLegalBuilder::default());
    }

    #[test]
    fn builder_is_reusable() {
        let builder = DocenteBuilder::from_form_data(&ana_form(), "ana@x.com");
        let first = builder.build().unwrap();
        let second = builder.clone().nombres("Lucía").build().unwrap();
        assert_eq!(first.full_name(), "Ana Ruiz");
        assert_eq!(second.full_name(), "Lucía Ruiz");
    }

    #[test]
    fn representante_from_form_data() {
        let r = RepresentanteLegalBuilder::from_form_data(&luis_form(), "luis@x.com")
            .build()
            .unwrap();
        assert_eq!(r.full_name(), "Luis Soto Paredes");
        assert!(r.lives_with_student());
        assert_eq!(r.serialize().user_type.as_str(), "LEGAL_REPRESENTATIVE");
    }

    #[test]
    fn representante_requires_extras() {
        let form = FormData {
            direccion: None,
            ..luis_form()
        };
        let err = RepresentanteLegalBuilder::from_form_data(&form, "luis@x.com")
            .build()
            .unwrap_err();
        assert_eq!(err.field(), "direccion");

        let form = FormData {
            celular: Some("98765432".into()),
            ..luis_form()
        };
        let err = RepresentanteLegalBuilder::from_form_data(&form, "luis@x.com")
            .build()
            .unwrap_err();
        assert_eq!(err.field(), "celular");
    }

    #[test]
    fn vive_con_estudiante_defaults_to_false() {
        let form = FormData {
            vive_con_estudiante: None,
            ..luis_form()
        };
        let r = RepresentanteLegalBuilder::from_form_data(&form, "luis@x.com")
            .build()
            .unwrap();
        assert!(!r.lives_with_student());
    }

    #[test]
    fn duplicate_pending_students_collapse() {
        let r = RepresentanteLegalBuilder::from_form_data(&luis_form(), "luis@x.com")
            .estudiante(StudentRef::new("st-1").unwrap())
            .estudiante(StudentRef::new("st-1").unwrap())
            .build()
            .unwrap();
        assert_eq!(r.students().len(), 1);
    }

    #[test]
    fn docente_record_rebuilds_identically() {
        let original = DocenteBuilder::from_form_data(&ana_form(), "ana@x.com")
            .id(Uuid::new_v4().to_string())
            .build()
            .unwrap();
        let rebuilt = DocenteBuilder::from_record(&original.serialize())
            .build()
            .unwrap();
        assert_eq!(rebuilt, original);
        assert_eq!(rebuilt.serialize(), original.serialize());
    }

    #[test]
    fn representante_record_rebuilds_identically() {
        let mut original = RepresentanteLegalBuilder::from_form_data(&luis_form(), "luis@x.com")
            .build()
            .unwrap();
        original.add_student(StudentRef::new("st-1").unwrap());
        let rebuilt = RepresentanteLegalBuilder::from_record(&original.serialize())
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(rebuilt.serialize(), original.serialize());
    }

    #[test]
    fn docente_record_is_not_a_representante() {
        let record = DocenteBuilder::from_form_data(&ana_form(), "ana@x.com")
            .build()
            .unwrap()
            .serialize();
        assert!(RepresentanteLegalBuilder::from_record(&record).is_err());
    }

    #[test]
    fn lives_with_student_accepts_form_spellings() {
        let parse = |json: &str| serde_json::from_str::<FormData>(json).unwrap();

        assert_eq!(parse(r#"{"viveConEstudiante": true}"#).vive_con_estudiante, Some(true));
        assert_eq!(parse(r#"{"viveConEstudiante": "on"}"#).vive_con_estudiante, Some(true));
        assert_eq!(parse(r#"{"viveConEstudiante": "Sí"}"#).vive_con_estudiante, Some(true));
        assert_eq!(parse(r#"{"viveConEstudiante": "false"}"#).vive_con_estudiante, Some(false));
        assert_eq!(parse(r#"{"viveConEstudiante": 0}"#).vive_con_estudiante, Some(false));
        assert_eq!(parse(r#"{"viveConEstudiante": " "}"#).vive_con_estudiante, None);
        assert_eq!(parse(r#"{"viveConEstudiante": null}"#).vive_con_estudiante, None);
        assert_eq!(parse(r#"{"nombres": "Luis"}"#).vive_con_estudiante, None);
    }

    #[test]
    fn lives_with_student_rejects_other_values() {
        for json in [r#"{"viveConEstudiante": "maybe"}"#, r#"{"viveConEstudiante": 2}"#] {
            let err = serde_json::from_str::<FormData>(json).unwrap_err();
            assert!(err.to_string().contains("viveConEstudiante"), "{err}");
        }
    }
}
