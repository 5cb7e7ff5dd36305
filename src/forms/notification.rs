use serde::Deserialize;
use validator::Validate;

use crate::domain::notification::NewNotification;
use crate::domain::types::{NotificationMessage, NotificationTitle};
use crate::forms::{FormError, field, optional_text};

#[derive(Debug, Deserialize, Validate)]
/// Form data for broadcasting a notification.
pub struct NotificationForm {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 5000))]
    pub message: String,
    /// Recipient role; empty or `all` broadcasts to everyone.
    #[serde(default)]
    pub recipient_role: Option<String>,
}

impl TryFrom<NotificationForm> for NewNotification {
    type Error = FormError;

    fn try_from(form: NotificationForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let recipient_role = optional_text(form.recipient_role)
            .filter(|role| !crate::list::filter::is_unset(role));

        Ok(NewNotification {
            title: field("title", NotificationTitle::new(form.title))?,
            message: field("message", NotificationMessage::new(form.message))?,
            recipient_role,
        })
    }
}
