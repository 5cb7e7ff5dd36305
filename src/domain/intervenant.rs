use serde::{Deserialize, Serialize};

use crate::domain::types::{Email, IntervenantId, PersonName, PhoneNumber};
use crate::list::ListItem;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Intervenant {
    pub id: IntervenantId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub speciality: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Intervenant {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl ListItem for Intervenant {
    type Id = IntervenantId;

    fn id(&self) -> IntervenantId {
        self.id
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewIntervenant {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: Email,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<PhoneNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speciality: Option<String>,
}
