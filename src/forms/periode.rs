use serde::Deserialize;
use validator::Validate;

use crate::domain::periode::NewPeriode;
use crate::domain::types::PeriodeName;
use crate::forms::{FormError, field, parse_date_range};

#[derive(Debug, Deserialize, Validate)]
/// Form data for creating or editing an academic period.
pub struct PeriodeForm {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub date_debut: String,
    pub date_fin: String,
}

impl TryFrom<PeriodeForm> for NewPeriode {
    type Error = FormError;

    fn try_from(form: PeriodeForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let (date_debut, date_fin) = parse_date_range(&form.date_debut, &form.date_fin)?;
        Ok(NewPeriode {
            name: field("name", PeriodeName::new(form.name))?,
            date_debut,
            date_fin,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_day_period_is_allowed() {
        let form = PeriodeForm {
            name: "Rentrée".into(),
            date_debut: "2025-09-01".into(),
            date_fin: "2025-09-01".into(),
        };
        assert!(NewPeriode::try_from(form).is_ok());
    }

    #[test]
    fn end_before_start_is_rejected() {
        let form = PeriodeForm {
            name: "S1".into(),
            date_debut: "2025-09-01".into(),
            date_fin: "2025-01-31".into(),
        };
        let err = NewPeriode::try_from(form).unwrap_err();
        assert_eq!(
            err.field_errors().get("date_fin"),
            ["La date de fin doit suivre la date de début"]
        );
    }
}
