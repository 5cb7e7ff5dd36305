use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{NotificationId, NotificationMessage, NotificationTitle};
use crate::list::ListItem;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    pub id: NotificationId,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub read: bool,
    pub created_at: NaiveDateTime,
}

impl ListItem for Notification {
    type Id = NotificationId;

    fn id(&self) -> NotificationId {
        self.id
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewNotification {
    pub title: NotificationTitle,
    pub message: NotificationMessage,
    /// Role whose members receive the notification; `None` broadcasts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_role: Option<String>,
}

/// Partial update toggling the read flag.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct NotificationReadState {
    pub read: bool,
}
