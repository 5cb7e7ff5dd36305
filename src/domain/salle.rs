use serde::{Deserialize, Serialize};

use crate::domain::types::{SalleId, SalleName};
use crate::list::ListItem;

/// Room as listed on the rooms page.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Salle {
    pub id: SalleId,
    pub name: String,
    #[serde(default)]
    pub building: Option<String>,
    pub capacity: u32,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

impl ListItem for Salle {
    type Id = SalleId;

    fn id(&self) -> SalleId {
        self.id
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewSalle {
    pub name: SalleName,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub building: Option<String>,
    pub capacity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}
