use crate::domain::programme::Programme;
use crate::dto::listing::ListPageData;

/// Programmes table plus the "active programmes" tile.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgrammesPageData {
    pub list: ListPageData<Programme>,
    /// Programmes with status `EN_COURS` across all pages.
    pub active_count: usize,
}
