//! The `Person` component shared by every user variant.
//!
//! `Person` has no public constructor: it only exists inside a concrete user
//! (`Docente`, `RepresentanteLegal`), which makes the base type impossible to
//! instantiate on its own. Every field is validated eagerly; updates go
//! through `with_*` methods returning a new, fully validated value.

use chrono::{DateTime, Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::document::{Document, DocumentRecord},
    error::ValidationError,
    value_objects::Sex,
};

/// Raw person fields, as collected by a builder.
#[derive(Debug, Clone, Default)]
pub(crate) struct PersonFields<'a> {
    pub id: Option<Uuid>,
    pub given_names: &'a str,
    pub paternal_surname: &'a str,
    pub maternal_surname: Option<&'a str>,
    pub birth_date: &'a str,
    pub sex: &'a str,
    pub document: Option<Document>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    id: Option<Uuid>,
    given_names: String,
    paternal_surname: String,
    maternal_surname: Option<String>,
    birth_date: NaiveDate,
    sex: Sex,
    document: Option<Document>,
}

fn required_name(field: &'static str, raw: &str) -> Result<String, ValidationError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(value.to_owned())
}

fn optional_name(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

/// Parse a birth date from `YYYY-MM-DD`, `DD/MM/YYYY` or an RFC 3339 timestamp.
pub fn parse_birth_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::required("fechaNacimiento"));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d/%m/%Y"))
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
        .map_err(|_| ValidationError::new("fechaNacimiento", format!("invalid date: '{raw}'")))
}

fn check_not_future(date: NaiveDate) -> Result<NaiveDate, ValidationError> {
    let today = Local::now().date_naive();
    if date > today {
        return Err(ValidationError::new(
            "fechaNacimiento",
            format!("{date} is in the future"),
        ));
    }
    Ok(date)
}

/// Whole years between `birth` and `on`, decremented when the anniversary
/// has not yet been reached in `on`'s year.
pub fn years_between(birth: NaiveDate, on: NaiveDate) -> u32 {
    let mut years = on.year() - birth.year();
    if (on.month(), on.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    u32::try_from(years).unwrap_or(0)
}

impl Person {
    pub(crate) fn new(fields: PersonFields<'_>) -> Result<Self, ValidationError> {
        let given_names = required_name("nombres", fields.given_names)?;
        let paternal_surname = required_name("aPaterno", fields.paternal_surname)?;
        let birth_date = check_not_future(parse_birth_date(fields.birth_date)?)?;
        let sex = Sex::parse(fields.sex)?;

        Ok(Self {
            id: fields.id,
            given_names,
            paternal_surname,
            maternal_surname: optional_name(fields.maternal_surname),
            birth_date,
            sex,
            document: fields.document,
        })
    }

    pub fn id(&self) -> Option<Uuid> {
        self.id
    }

    pub fn given_names(&self) -> &str {
        &self.given_names
    }

    pub fn paternal_surname(&self) -> &str {
        &self.paternal_surname
    }

    pub fn maternal_surname(&self) -> Option<&str> {
        self.maternal_surname.as_deref()
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    pub fn sex(&self) -> &Sex {
        &self.sex
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn full_name(&self) -> String {
        [
            Some(self.given_names.as_str()),
            Some(self.paternal_surname.as_str()),
            self.maternal_surname.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ")
    }

    /// Age today, in the local timezone.
    pub fn age_in_years(&self) -> u32 {
        self.age_on(Local::now().date_naive())
    }

    pub fn age_on(&self, date: NaiveDate) -> u32 {
        years_between(self.birth_date, date)
    }

    // Ids are assigned once, by the persistence layer.
    pub(crate) fn with_id(mut self, id: Uuid) -> Self {
        if self.id.is_none() {
            self.id = Some(id);
        }
        self
    }

    pub fn with_given_names(&self, given_names: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            given_names: required_name("nombres", given_names)?,
            ..self.clone()
        })
    }

    pub fn with_paternal_surname(&self, surname: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            paternal_surname: required_name("aPaterno", surname)?,
            ..self.clone()
        })
    }

    pub fn with_maternal_surname(&self, surname: Option<&str>) -> Self {
        Self {
            maternal_surname: optional_name(surname),
            ..self.clone()
        }
    }

    pub fn with_birth_date(&self, birth_date: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            birth_date: check_not_future(parse_birth_date(birth_date)?)?,
            ..self.clone()
        })
    }

    pub fn with_sex(&self, sex: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            sex: Sex::parse(sex)?,
            ..self.clone()
        })
    }

    pub fn with_document(&self, document: Option<Document>) -> Self {
        Self {
            document,
            ..self.clone()
        }
    }

    pub fn serialize(&self) -> PersonRecord {
        PersonRecord {
            id: self.id,
            given_names: self.given_names.clone(),
            paternal_surname: self.paternal_surname.clone(),
            maternal_surname: self.maternal_surname.clone(),
            birth_date: self.birth_date,
            sex: self.sex.as_str().to_owned(),
            document: self.document.as_ref().map(Document::serialize),
        }
    }
}

/// Flat plain-data form of a [`Person`]. `birthDate` serializes as ISO-8601.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub given_names: String,
    pub paternal_surname: String,
    pub maternal_surname: Option<String>,
    pub birth_date: NaiveDate,
    pub sex: String,
    pub document: Option<DocumentRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fields<'a>() -> PersonFields<'a> {
        PersonFields {
            given_names: "Ana María",
            paternal_surname: "Ruiz",
            maternal_surname: Some("Quispe"),
            birth_date: "1990-01-01",
            sex: "F",
            ..PersonFields::default()
        }
    }

    #[test]
    fn builds_from_valid_fields() {
        let p = Person::new(fields()).unwrap();
        assert_eq!(p.full_name(), "Ana María Ruiz Quispe");
        assert_eq!(p.birth_date(), date(1990, 1, 1));
        assert_eq!(p.sex(), &Sex::Female);
        assert_eq!(p.id(), None);
    }

    #[test]
    fn full_name_omits_missing_maternal_surname() {
        let p = Person::new(PersonFields {
            maternal_surname: Some("   "),
            ..fields()
        })
        .unwrap();
        assert_eq!(p.maternal_surname(), None);
        assert_eq!(p.full_name(), "Ana María Ruiz");
    }

    #[test]
    fn required_fields_are_named() {
        let err = Person::new(PersonFields {
            given_names: " ",
            ..fields()
        })
        .unwrap_err();
        assert_eq!(err.field(), "nombres");

        let err = Person::new(PersonFields {
            paternal_surname: "",
            ..fields()
        })
        .unwrap_err();
        assert_eq!(err.field(), "aPaterno");
    }

    #[test]
    fn future_birth_date_is_rejected() {
        let tomorrow = (Local::now().date_naive() + chrono::Days::new(1)).to_string();
        let err = Person::new(PersonFields {
            birth_date: &tomorrow,
            ..fields()
        })
        .unwrap_err();
        assert_eq!(err.field(), "fechaNacimiento");
    }

    #[test]
    fn birth_date_formats() {
        assert_eq!(parse_birth_date("2010-03-15").unwrap(), date(2010, 3, 15));
        assert_eq!(parse_birth_date("15/03/2010").unwrap(), date(2010, 3, 15));
        assert_eq!(
            parse_birth_date("2010-03-15T10:00:00-05:00").unwrap(),
            date(2010, 3, 15)
        );
        assert!(parse_birth_date("2010-13-01").is_err());
        assert!(parse_birth_date("yesterday").is_err());
    }

    #[test]
    fn age_decrements_before_anniversary() {
        let birth = date(2000, 6, 15);
        assert_eq!(years_between(birth, date(2020, 6, 15)), 20);
        assert_eq!(years_between(birth, date(2020, 6, 14)), 19);
        assert_eq!(years_between(birth, date(2020, 7, 1)), 20);
        assert_eq!(years_between(birth, birth), 0);
    }

    #[test]
    fn age_in_years_one_day_short_of_anniversary() {
        let today = Local::now().date_naive();
        // Exactly 10 years before tomorrow: the 10th birthday is tomorrow.
        let tomorrow = today + chrono::Days::new(1);
        let Some(birth) = tomorrow.with_year(tomorrow.year() - 10) else {
            // 29 February tomorrow with no leap day ten years back.
            return;
        };
        let p = Person::new(PersonFields {
            birth_date: &birth.to_string(),
            ..fields()
        })
        .unwrap();
        assert_eq!(p.age_in_years(), 9);
    }

    #[test]
    fn with_methods_leave_original_untouched() {
        let p = Person::new(fields()).unwrap();
        assert!(p.with_given_names("  ").is_err());
        let renamed = p.with_given_names("Lucía").unwrap();
        assert_eq!(renamed.given_names(), "Lucía");
        assert_eq!(p.given_names(), "Ana María");
    }

    #[test]
    fn id_is_assigned_once() {
        let first = Uuid::new_v4();
        let p = Person::new(fields()).unwrap().with_id(first);
        assert_eq!(p.with_id(Uuid::new_v4()).id(), Some(first));
    }

    #[test]
    fn serialize_uses_iso_date() {
        let p = Person::new(PersonFields {
            document: Some(Document::new("DNI", "12345678").unwrap()),
            ..fields()
        })
        .unwrap();
        let json = serde_json::to_value(p.serialize()).unwrap();
        assert_eq!(json["birthDate"], "1990-01-01");
        assert_eq!(json["givenNames"], "Ana María");
        assert_eq!(json["document"]["type"], "DNI");
        assert!(json.get("id").is_none());
    }

    #[test]
    fn future_birth_date_update_is_rejected() {
        let p = Person::new(fields()).unwrap();
        let tomorrow = Local::now().date_naive() + chrono::Days::new(1);

        let err = p
            .with_birth_date(&tomorrow.format("%Y-%m-%d").to_string())
            .unwrap_err();
        assert_eq!(err.field(), "fechaNacimiento");
        assert_eq!(p.birth_date(), date(1990, 1, 1));

        let err = p.with_birth_date("not a date").unwrap_err();
        assert_eq!(err.field(), "fechaNacimiento");

        let moved = p.with_birth_date("15/03/1992").unwrap();
        assert_eq!(moved.birth_date(), date(1992, 3, 15));
        assert_eq!(p.birth_date(), date(1990, 1, 1));
    }
}
