use serde::{Deserialize, Serialize};

use crate::domain::types::{Email, PersonName, UserId};
use crate::list::ListItem;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub active: bool,
}

impl ListItem for User {
    type Id = UserId;

    fn id(&self) -> UserId {
        self.id
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewUser {
    pub name: PersonName,
    pub email: Email,
    pub role: String,
}
