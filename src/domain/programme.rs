use std::fmt::Display;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ProgrammeCode, ProgrammeId, ProgrammeName};
use crate::list::ListItem;

/// Lifecycle state of a programme as reported by the planning API.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProgrammeStatus {
    Planifie,
    EnCours,
    Termine,
    Suspendu,
}

impl ProgrammeStatus {
    pub const ALL: [ProgrammeStatus; 4] = [
        ProgrammeStatus::Planifie,
        ProgrammeStatus::EnCours,
        ProgrammeStatus::Termine,
        ProgrammeStatus::Suspendu,
    ];

    /// Wire value used in query strings and payloads.
    pub const fn as_str(self) -> &'static str {
        match self {
            ProgrammeStatus::Planifie => "PLANIFIE",
            ProgrammeStatus::EnCours => "EN_COURS",
            ProgrammeStatus::Termine => "TERMINE",
            ProgrammeStatus::Suspendu => "SUSPENDU",
        }
    }

    /// Status counted by the "active programmes" tile.
    pub const fn is_active(self) -> bool {
        matches!(self, ProgrammeStatus::EnCours)
    }
}

impl Display for ProgrammeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProgrammeStatus {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        ProgrammeStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| format!("unknown programme status `{value}`"))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Programme {
    pub id: ProgrammeId,
    pub code: String,
    pub name: String,
    pub status: ProgrammeStatus,
    pub date_debut: Option<NaiveDate>,
    pub date_fin: Option<NaiveDate>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ListItem for Programme {
    type Id = ProgrammeId;

    fn id(&self) -> ProgrammeId {
        self.id
    }
}

/// Payload for creating or fully replacing a programme.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewProgramme {
    pub code: ProgrammeCode,
    pub name: ProgrammeName,
    pub status: ProgrammeStatus,
    pub date_debut: NaiveDate,
    pub date_fin: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
