use serde::Deserialize;
use validator::Validate;

use crate::domain::intervenant::NewIntervenant;
use crate::domain::types::{Email, PersonName, PhoneNumber};
use crate::forms::{FormError, field, optional_text};

#[derive(Debug, Deserialize, Validate)]
/// Form data for creating or editing an intervenant.
pub struct IntervenantForm {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub speciality: Option<String>,
}

impl TryFrom<IntervenantForm> for NewIntervenant {
    type Error = FormError;

    fn try_from(form: IntervenantForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let phone = optional_text(form.phone)
            .map(|phone| field("phone", PhoneNumber::new(phone)))
            .transpose()?;

        Ok(NewIntervenant {
            first_name: field("first_name", PersonName::new(form.first_name))?,
            last_name: field("last_name", PersonName::new(form.last_name))?,
            email: field("email", Email::new(form.email))?,
            phone,
            speciality: optional_text(form.speciality),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> IntervenantForm {
        IntervenantForm {
            first_name: "Claire".into(),
            last_name: "Martin".into(),
            email: "Claire.Martin@Univ.fr".into(),
            phone: Some("06 12 34 56 78".into()),
            speciality: None,
        }
    }

    #[test]
    fn normalizes_contact_details() {
        let payload = NewIntervenant::try_from(form()).unwrap();
        assert_eq!(payload.email.as_str(), "claire.martin@univ.fr");
        assert_eq!(
            payload.phone.as_ref().map(PhoneNumber::as_str),
            Some("+33612345678")
        );
    }

    #[test]
    fn blank_phone_is_omitted() {
        let mut form = form();
        form.phone = Some("  ".into());
        assert_eq!(NewIntervenant::try_from(form).unwrap().phone, None);
    }

    #[test]
    fn invalid_phone_is_reported_on_its_field() {
        let mut form = form();
        form.phone = Some("12".into());
        let err = NewIntervenant::try_from(form).unwrap_err();
        assert_eq!(err.field_errors().get("phone").len(), 1);
    }

    #[test]
    fn invalid_email_fails_validation() {
        let mut form = form();
        form.email = "not-an-email".into();
        assert!(matches!(
            NewIntervenant::try_from(form),
            Err(FormError::Validation(_))
        ));
    }
}
