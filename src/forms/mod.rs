//! Form definitions backing the planning management pages.

use std::collections::BTreeMap;

use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::domain::types::TypeConstraintError;

pub mod import;
pub mod intervenant;
pub mod module;
pub mod notification;
pub mod periode;
pub mod programme;
pub mod salle;
pub mod user;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid field `{field}`: {source}")]
    InvalidField {
        field: &'static str,
        source: TypeConstraintError,
    },

    #[error("invalid date in `{0}`")]
    InvalidDate(&'static str),

    #[error("invalid status `{0}`")]
    InvalidStatus(String),

    #[error("import rejected with {} issue(s)", .0.len())]
    Import(Vec<import::ImportIssue>),
}

impl FormError {
    /// Field-level messages for inline display next to the inputs.
    pub fn field_errors(&self) -> FieldErrors {
        match self {
            FormError::Validation(errors) => FieldErrors::from(errors),
            FormError::InvalidField { field, source } => {
                FieldErrors::single(*field, source.to_string())
            }
            FormError::InvalidDate(field) => FieldErrors::single(*field, "Date invalide"),
            FormError::InvalidStatus(_) => FieldErrors::single("status", "Statut inconnu"),
            FormError::Import(issues) => {
                let mut errors = FieldErrors::default();
                for issue in issues {
                    errors.push(issue.field_key(), issue.message.clone());
                }
                errors
            }
        }
    }
}

/// Messages per form field, gathered from local validation and from the API.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let messages = self.0.entry(field.into()).or_default();
        let message = message.into();
        if !messages.contains(&message) {
            messages.push(message);
        }
    }

    /// Adds every message of `other`, keeping existing ones first.
    pub fn merge(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            for message in messages {
                self.push(field.clone(), message);
            }
        }
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }
}

impl From<&ValidationErrors> for FieldErrors {
    fn from(errors: &ValidationErrors) -> Self {
        let mut fields = FieldErrors::default();
        for (field, kind) in errors.errors() {
            if let ValidationErrorsKind::Field(list) = kind {
                for error in list {
                    let message = error
                        .message
                        .as_ref()
                        .map(|message| message.to_string())
                        .unwrap_or_else(|| format!("Valeur invalide ({})", error.code));
                    fields.push(field.to_string(), message);
                }
            }
        }
        fields
    }
}

impl From<BTreeMap<String, Vec<String>>> for FieldErrors {
    fn from(errors: BTreeMap<String, Vec<String>>) -> Self {
        let mut fields = FieldErrors::default();
        for (field, messages) in errors {
            for message in messages {
                fields.push(field.clone(), message);
            }
        }
        fields
    }
}

/// Maps a value-object failure onto the field it came from.
pub(crate) fn field<T>(
    field: &'static str,
    result: Result<T, TypeConstraintError>,
) -> Result<T, FormError> {
    result.map_err(|source| FormError::InvalidField { field, source })
}

/// Parses an `<input type="date">` value.
pub(crate) fn parse_date(
    field: &'static str,
    value: &str,
) -> Result<chrono::NaiveDate, FormError> {
    chrono::NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| FormError::InvalidDate(field))
}

/// Parses a start/end pair; the end may not precede the start.
pub(crate) fn parse_date_range(
    date_debut: &str,
    date_fin: &str,
) -> Result<(chrono::NaiveDate, chrono::NaiveDate), FormError> {
    let start = parse_date("date_debut", date_debut)?;
    let end = parse_date("date_fin", date_fin)?;
    if end < start {
        let mut errors = ValidationErrors::new();
        errors.add(
            "date_fin",
            validator::ValidationError::new("date_order")
                .with_message("La date de fin doit suivre la date de début".into()),
        );
        return Err(FormError::Validation(errors));
    }
    Ok((start, end))
}

/// Empty inputs mean "not provided".
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_merge_after_local_ones() {
        let mut local = FieldErrors::single("email", "Adresse e-mail invalide");
        let server = FieldErrors::from(BTreeMap::from([
            (
                "email".to_string(),
                vec![
                    "Adresse e-mail invalide".to_string(),
                    "Adresse déjà utilisée".to_string(),
                ],
            ),
            ("code".to_string(), vec!["Code déjà pris".to_string()]),
        ]));

        local.merge(server);

        assert_eq!(
            local.get("email"),
            ["Adresse e-mail invalide", "Adresse déjà utilisée"]
        );
        assert_eq!(local.get("code"), ["Code déjà pris"]);
        assert!(local.get("name").is_empty());
    }

    #[test]
    fn invalid_field_points_at_its_input() {
        let error = field::<()>("email", Err(TypeConstraintError::InvalidEmail)).unwrap_err();
        let errors = error.field_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("email"), ["invalid email address"]);
    }

    #[test]
    fn parse_date_accepts_html_date_inputs() {
        assert!(parse_date("date_debut", "2025-09-01").is_ok());
        assert!(matches!(
            parse_date("date_debut", "01/09/2025"),
            Err(FormError::InvalidDate("date_debut"))
        ));
    }
}
