use serde::{Deserialize, Serialize};

use crate::domain::types::{EvaluationId, ModuleId};
use crate::list::ListItem;

/// Student feedback on a module, rated 1 to 5.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Evaluation {
    pub id: EvaluationId,
    pub module_id: ModuleId,
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
}

impl ListItem for Evaluation {
    type Id = EvaluationId;

    fn id(&self) -> EvaluationId {
        self.id
    }
}
