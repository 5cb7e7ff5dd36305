use serde::{Deserialize, Serialize};

use crate::domain::types::{IntervenantId, ModuleCode, ModuleId, ModuleName, ProgrammeId};
use crate::list::ListItem;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModuleStatus {
    AVenir,
    EnCours,
    Termine,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Module {
    pub id: ModuleId,
    pub programme_id: ProgrammeId,
    pub code: String,
    pub name: String,
    pub hours_planned: u32,
    #[serde(default)]
    pub hours_done: u32,
    #[serde(default)]
    pub intervenant_id: Option<IntervenantId>,
    pub status: ModuleStatus,
}

impl Module {
    /// Completed share of the planned hours, capped at 1.0.
    pub fn progress(&self) -> f64 {
        if self.hours_planned == 0 {
            return 0.0;
        }
        (f64::from(self.hours_done) / f64::from(self.hours_planned)).min(1.0)
    }
}

impl ListItem for Module {
    type Id = ModuleId;

    fn id(&self) -> ModuleId {
        self.id
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewModule {
    pub programme_id: ProgrammeId,
    pub code: ModuleCode,
    pub name: ModuleName,
    pub hours_planned: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intervenant_id: Option<IntervenantId>,
}
