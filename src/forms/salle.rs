use serde::Deserialize;
use validator::Validate;

use crate::domain::salle::NewSalle;
use crate::domain::types::SalleName;
use crate::forms::{FormError, field, optional_text};

#[derive(Debug, Deserialize, Validate)]
/// Form data for creating or editing a room.
pub struct SalleForm {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    pub building: Option<String>,
    #[validate(range(min = 1, max = 1000))]
    pub capacity: u32,
    /// Room kind such as `amphi` or `TP`.
    #[serde(default)]
    pub kind: Option<String>,
}

impl TryFrom<SalleForm> for NewSalle {
    type Error = FormError;

    fn try_from(form: SalleForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(NewSalle {
            name: field("name", SalleName::new(form.name))?,
            building: optional_text(form.building),
            capacity: form.capacity,
            kind: optional_text(form.kind),
        })
    }
}
