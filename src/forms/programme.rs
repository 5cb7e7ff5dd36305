use serde::Deserialize;
use validator::Validate;

use crate::domain::programme::{NewProgramme, ProgrammeStatus};
use crate::domain::types::{ProgrammeCode, ProgrammeName};
use crate::forms::{FormError, field, optional_text, parse_date_range};

#[derive(Debug, Deserialize, Validate)]
/// Form data for creating or editing a programme.
pub struct ProgrammeForm {
    /// Short code, e.g. `M2-INFO`.
    #[validate(length(min = 1, max = 32))]
    pub code: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Wire value of [`ProgrammeStatus`].
    pub status: String,
    pub date_debut: String,
    pub date_fin: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl TryFrom<ProgrammeForm> for NewProgramme {
    type Error = FormError;

    fn try_from(form: ProgrammeForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let status = ProgrammeStatus::try_from(form.status.as_str())
            .map_err(|_| FormError::InvalidStatus(form.status.clone()))?;
        let (date_debut, date_fin) = parse_date_range(&form.date_debut, &form.date_fin)?;

        Ok(NewProgramme {
            code: field("code", ProgrammeCode::new(form.code))?,
            name: field("name", ProgrammeName::new(form.name))?,
            status,
            date_debut,
            date_fin,
            description: optional_text(form.description),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ProgrammeForm {
        ProgrammeForm {
            code: " M2-INFO ".into(),
            name: "Master informatique".into(),
            status: "en_cours".into(),
            date_debut: "2025-09-01".into(),
            date_fin: "2026-06-30".into(),
            description: Some("   ".into()),
        }
    }

    #[test]
    fn converts_to_payload() {
        let payload = NewProgramme::try_from(form()).unwrap();
        assert_eq!(payload.code.as_str(), "M2-INFO");
        assert_eq!(payload.status, ProgrammeStatus::EnCours);
        assert_eq!(payload.description, None);
    }

    #[test]
    fn rejects_end_before_start() {
        let mut form = form();
        form.date_fin = "2025-08-01".into();
        let err = NewProgramme::try_from(form).unwrap_err();
        assert_eq!(err.field_errors().get("date_fin").len(), 1);
    }

    #[test]
    fn rejects_unknown_status() {
        let mut form = form();
        form.status = "ARCHIVE".into();
        assert!(matches!(
            NewProgramme::try_from(form),
            Err(FormError::InvalidStatus(_))
        ));
    }

    #[test]
    fn rejects_missing_name() {
        let mut form = form();
        form.name = String::new();
        let err = NewProgramme::try_from(form).unwrap_err();
        assert!(!err.field_errors().get("name").is_empty());
    }
}
