use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::types::{PeriodeId, PeriodeName};
use crate::list::ListItem;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Periode {
    pub id: PeriodeId,
    pub name: String,
    pub date_debut: NaiveDate,
    pub date_fin: NaiveDate,
    #[serde(default)]
    pub active: bool,
}

impl Periode {
    /// Whether `day` falls inside the period, bounds included.
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.date_debut <= day && day <= self.date_fin
    }
}

impl ListItem for Periode {
    type Id = PeriodeId;

    fn id(&self) -> PeriodeId {
        self.id
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct NewPeriode {
    pub name: PeriodeName,
    pub date_debut: NaiveDate,
    pub date_fin: NaiveDate,
}
