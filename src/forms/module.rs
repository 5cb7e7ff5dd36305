use serde::Deserialize;
use validator::Validate;

use crate::domain::module::NewModule;
use crate::domain::types::{IntervenantId, ModuleCode, ModuleName, ProgrammeId};
use crate::forms::{FormError, field};

#[derive(Debug, Deserialize, Validate)]
/// Form data for creating or editing a module of a programme.
pub struct ModuleForm {
    pub programme_id: i32,
    #[validate(length(min = 1, max = 32))]
    pub code: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(range(min = 1, max = 500))]
    pub hours_planned: u32,
    /// Assigned intervenant; `0` or absent leaves the module unassigned.
    #[serde(default)]
    pub intervenant_id: Option<i32>,
}

impl TryFrom<ModuleForm> for NewModule {
    type Error = FormError;

    fn try_from(form: ModuleForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let intervenant_id = match form.intervenant_id {
            Some(id) if id > 0 => Some(field("intervenant_id", IntervenantId::new(id))?),
            _ => None,
        };

        Ok(NewModule {
            programme_id: field("programme_id", ProgrammeId::new(form.programme_id))?,
            code: field("code", ModuleCode::new(form.code))?,
            name: field("name", ModuleName::new(form.name))?,
            hours_planned: form.hours_planned,
            intervenant_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ModuleForm {
        ModuleForm {
            programme_id: 3,
            code: "ALG1".into(),
            name: "Algorithmique".into(),
            hours_planned: 42,
            intervenant_id: Some(0),
        }
    }

    #[test]
    fn zero_intervenant_means_unassigned() {
        let payload = NewModule::try_from(form()).unwrap();
        assert_eq!(payload.intervenant_id, None);
        assert_eq!(payload.programme_id.get(), 3);
    }

    #[test]
    fn hours_are_bounded() {
        let mut form = form();
        form.hours_planned = 0;
        let err = NewModule::try_from(form).unwrap_err();
        assert!(!err.field_errors().get("hours_planned").is_empty());
    }

    #[test]
    fn programme_is_required() {
        let mut form = form();
        form.programme_id = 0;
        assert!(matches!(
            NewModule::try_from(form),
            Err(FormError::InvalidField {
                field: "programme_id",
                ..
            })
        ));
    }
}
