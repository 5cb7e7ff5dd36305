//! Page data shared by every management list.

use std::collections::BTreeMap;

use crate::list::filter::FilterState;
use crate::pagination::ListPage;

/// Everything a list page is first rendered with; also seeds its controller.
#[derive(Clone, Debug, PartialEq)]
pub struct ListPageData<T> {
    pub list: ListPage<T>,
    /// Filters the page was opened with, echoed back into the inputs.
    pub filters: FilterState,
    pub page: usize,
    pub limit: usize,
    /// Page numbers for the pager, `None` marking a gap.
    pub links: Vec<Option<usize>>,
}

impl<T> ListPageData<T> {
    pub fn new(list: ListPage<T>, filters: FilterState, limit: usize) -> Self {
        let page = list.pagination.page;
        let links = list.pagination.links();
        Self {
            list,
            filters,
            page,
            limit,
            links,
        }
    }
}

/// Dependent records blocking a delete, per kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeleteConflict {
    pub message: String,
    pub counts: BTreeMap<String, u64>,
}

impl DeleteConflict {
    /// Confirmation prompt listing what a forced delete also removes.
    pub fn prompt(&self) -> String {
        if self.counts.is_empty() {
            return format!("{} Supprimer quand même ?", self.message);
        }
        let details = self
            .counts
            .iter()
            .map(|(kind, count)| format!("{count} {kind}"))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{} ({details}). Supprimer quand même ?", self.message)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// Nothing was deleted; retry with `force` once the user confirms.
    Conflict(DeleteConflict),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::PaginationEnvelope;

    #[test]
    fn page_data_takes_page_from_envelope() {
        let list = ListPage::new(vec![1, 2], PaginationEnvelope::new(3, 2, 12));
        let data = ListPageData::new(list, FilterState::new(), 2);
        assert_eq!(data.page, 3);
        assert_eq!(data.links.len(), 6);
    }

    #[test]
    fn conflict_prompt_lists_dependents() {
        let conflict = DeleteConflict {
            message: "Ce programme a des dépendances.".into(),
            counts: BTreeMap::from([("modules".to_string(), 4), ("séances".to_string(), 12)]),
        };
        assert_eq!(
            conflict.prompt(),
            "Ce programme a des dépendances. (4 modules, 12 séances). Supprimer quand même ?"
        );
    }
}
