use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::LogId;
use crate::list::ListItem;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warning,
    Error,
}

/// Audit trail line displayed on the logs page.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LogEntry {
    pub id: LogId,
    pub action: String,
    pub entity: String,
    #[serde(default)]
    pub user_email: Option<String>,
    pub level: LogLevel,
    pub created_at: NaiveDateTime,
}

impl ListItem for LogEntry {
    type Id = LogId;

    fn id(&self) -> LogId {
        self.id
    }
}
