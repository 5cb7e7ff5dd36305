//! Page-level list state: filters, page number, current rows and the
//! bookkeeping that keeps responses in request order.

use crate::api::errors::ApiError;
use crate::list::filter::FilterState;
use crate::list::mutation::AggregateCounter;
use crate::list::query::{ListQuery, compose};
use crate::pagination::{ListPage, PaginationEnvelope};

/// Handle of an issued list request.
///
/// Only the ticket carrying the latest sequence number may change the list;
/// every older ticket is stale by the time a newer request has been issued.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    query: ListQuery,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Rows and pagination replaced by the response.
    Applied,
    /// A newer request was issued; the response was dropped.
    Stale,
    /// The latest request failed; previous rows kept.
    Failed,
    /// The latest request was aborted during teardown.
    Cancelled,
}

pub struct ListState<T> {
    filters: FilterState,
    page: usize,
    limit: usize,
    pub(crate) items: Vec<T>,
    pub(crate) pagination: PaginationEnvelope,
    pub(crate) counters: Vec<AggregateCounter<T>>,
    loading: bool,
    error: Option<String>,
    latest: u64,
}

impl<T> ListState<T> {
    pub fn new(limit: usize) -> Self {
        Self::with_filters(FilterState::new(), 1, limit)
    }

    pub fn with_filters(filters: FilterState, page: usize, limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            filters,
            page: page.max(1),
            limit,
            items: Vec::new(),
            pagination: PaginationEnvelope::new(1, limit, 0),
            counters: Vec::new(),
            loading: false,
            error: None,
            latest: 0,
        }
    }

    /// Installs rows rendered with the page, without issuing a request.
    pub fn seed(&mut self, page: ListPage<T>) {
        self.items = page.items;
        self.pagination = page.pagination;
        if self.pagination.page > 0 {
            self.page = self.pagination.page;
        }
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn pagination(&self) -> &PaginationEnvelope {
        &self.pagination
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// User-facing message of the last failed fetch, cleared on success.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Query the next fetch would send.
    pub fn query(&self) -> ListQuery {
        compose(&self.filters, self.page, self.limit)
    }

    /// Updates one filter; an effective change moves back to page 1 before
    /// the caller fetches. Returns whether a fetch is needed.
    pub fn set_filter(&mut self, name: impl Into<String>, value: impl Into<String>) -> bool {
        let changed = self.filters.set(name, value);
        if changed {
            self.page = 1;
        }
        changed
    }

    pub fn clear_filter(&mut self, name: &str) -> bool {
        let changed = self.filters.clear(name);
        if changed {
            self.page = 1;
        }
        changed
    }

    pub fn reset_filters(&mut self) -> bool {
        let changed = self.filters.reset();
        if changed {
            self.page = 1;
        }
        changed
    }

    /// Moves to another page, leaving the filters alone.
    pub fn set_page(&mut self, page: usize) -> bool {
        let page = page.max(1);
        let changed = page != self.page;
        self.page = page;
        changed
    }

    /// Moves back to the last remaining page once the current one is empty
    /// and past the end. Returns whether a fetch is needed.
    pub fn retreat_past_last_page(&mut self) -> bool {
        let last = self.pagination.pages.max(1);
        if !self.items.is_empty() || self.page <= last {
            return false;
        }
        self.page = last;
        true
    }

    pub fn set_limit(&mut self, limit: usize) -> bool {
        let limit = limit.max(1);
        let changed = limit != self.limit;
        if changed {
            self.limit = limit;
            self.page = 1;
        }
        changed
    }

    /// Issues a new request ticket and raises the loading flag.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.latest += 1;
        self.loading = true;
        FetchTicket {
            seq: self.latest,
            query: self.query(),
        }
    }

    pub fn is_latest(&self, ticket: &FetchTicket) -> bool {
        ticket.seq == self.latest
    }

    /// Reconciles a finished request with the list.
    ///
    /// Rows and pagination are swapped together so they always describe the
    /// same response. The loading flag drops whenever the latest request
    /// finishes, whatever its outcome.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<ListPage<T>, ApiError>,
    ) -> FetchOutcome {
        if !self.is_latest(&ticket) {
            log::debug!(
                "Discarding stale list response #{} ({}), latest is #{}",
                ticket.seq,
                ticket.query.to_query_string(),
                self.latest
            );
            return FetchOutcome::Stale;
        }

        self.loading = false;

        match result {
            Ok(page) => {
                self.seed(page);
                self.error = None;
                FetchOutcome::Applied
            }
            Err(ApiError::Cancelled) => FetchOutcome::Cancelled,
            Err(err) => {
                log::error!(
                    "Failed to fetch list ({}): {err}",
                    ticket.query.to_query_string()
                );
                self.error = Some(err.user_message());
                FetchOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::ListItem;

    #[derive(Clone, Debug, PartialEq)]
    struct Row {
        id: u32,
    }

    impl ListItem for Row {
        type Id = u32;

        fn id(&self) -> u32 {
            self.id
        }
    }

    fn page_of(ids: &[u32], page: usize, total: usize) -> ListPage<Row> {
        ListPage::new(
            ids.iter().map(|&id| Row { id }).collect(),
            PaginationEnvelope::new(page, 10, total),
        )
    }

    #[test]
    fn filter_change_resets_page_before_fetch() {
        let mut state: ListState<Row> = ListState::new(10);
        state.set_page(4);

        assert!(state.set_filter("status", "EN_COURS"));
        let ticket = state.begin_fetch();

        assert_eq!(ticket.query().page, 1);
        assert_eq!(ticket.query().get("status"), Some("EN_COURS"));
    }

    #[test]
    fn page_change_keeps_filters() {
        let mut state: ListState<Row> = ListState::new(10);
        state.set_filter("search", "algo");

        assert!(state.set_page(3));
        let ticket = state.begin_fetch();

        assert_eq!(ticket.query().page, 3);
        assert_eq!(ticket.query().get("search"), Some("algo"));
    }

    #[test]
    fn unchanged_filter_does_not_reset_page() {
        let mut state: ListState<Row> = ListState::new(10);
        state.set_filter("status", "all");
        state.set_page(2);

        assert!(!state.set_filter("status", ""));
        assert_eq!(state.page(), 2);
    }

    #[test]
    fn success_replaces_rows_and_pagination_together() {
        let mut state: ListState<Row> = ListState::new(10);
        let ticket = state.begin_fetch();
        assert!(state.is_loading());

        let outcome = state.complete_fetch(ticket, Ok(page_of(&[1, 2, 3], 1, 3)));

        assert_eq!(outcome, FetchOutcome::Applied);
        assert!(!state.is_loading());
        assert_eq!(state.items().len(), 3);
        assert_eq!(state.pagination().total, 3);
    }

    #[test]
    fn latest_request_wins_over_late_response() {
        let mut state: ListState<Row> = ListState::new(10);
        state.set_filter("status", "PLANIFIE");
        let first = state.begin_fetch();
        state.set_filter("status", "TERMINE");
        let second = state.begin_fetch();

        assert_eq!(
            state.complete_fetch(second, Ok(page_of(&[7], 1, 1))),
            FetchOutcome::Applied
        );
        assert_eq!(
            state.complete_fetch(first, Ok(page_of(&[1, 2], 1, 2))),
            FetchOutcome::Stale
        );

        assert_eq!(state.items(), &[Row { id: 7 }]);
        assert_eq!(state.pagination().total, 1);
        assert!(!state.is_loading());
    }

    #[test]
    fn stale_response_does_not_clear_loading_of_newer_request() {
        let mut state: ListState<Row> = ListState::new(10);
        let first = state.begin_fetch();
        let _second = state.begin_fetch();

        state.complete_fetch(first, Ok(page_of(&[1], 1, 1)));

        assert!(state.is_loading());
        assert!(state.items().is_empty());
    }

    #[test]
    fn failure_keeps_previous_rows() {
        let mut state: ListState<Row> = ListState::new(10);
        state.seed(page_of(&[1, 2], 1, 2));
        state.set_page(2);
        let ticket = state.begin_fetch();

        let outcome = state.complete_fetch(ticket, Err(ApiError::Transport("refused".into())));

        assert_eq!(outcome, FetchOutcome::Failed);
        assert!(!state.is_loading());
        assert_eq!(state.items(), &[Row { id: 1 }, Row { id: 2 }]);
        assert_eq!(state.pagination().total, 2);
        assert!(state.error().is_some());
    }

    #[test]
    fn success_clears_previous_error() {
        let mut state: ListState<Row> = ListState::new(10);
        let ticket = state.begin_fetch();
        state.complete_fetch(ticket, Err(ApiError::Timeout));
        assert!(state.error().is_some());

        let ticket = state.begin_fetch();
        state.complete_fetch(ticket, Ok(page_of(&[1], 1, 1)));

        assert_eq!(state.error(), None);
    }

    #[test]
    fn applied_response_synchronises_page_number() {
        let mut state: ListState<Row> = ListState::new(10);
        state.set_page(5);
        let ticket = state.begin_fetch();

        state.complete_fetch(ticket, Ok(page_of(&[21], 3, 21)));

        assert_eq!(state.page(), 3);
    }

    #[test]
    fn emptied_last_page_moves_back_one_page() {
        let mut state: ListState<Row> = ListState::new(10);
        state.seed(page_of(&[11], 2, 11));

        assert!(!state.retreat_past_last_page());
        state.apply_deleted(11);

        assert!(state.retreat_past_last_page());
        assert_eq!(state.page(), 1);
        assert_eq!(state.query().page, 1);
        assert!(!state.retreat_past_last_page());
    }

    #[test]
    fn emptied_only_page_stays_on_first_page() {
        let mut state: ListState<Row> = ListState::new(10);
        state.seed(page_of(&[1], 1, 1));
        state.apply_deleted(1);

        assert!(!state.retreat_past_last_page());
        assert_eq!(state.page(), 1);
        assert_eq!(state.pagination().pages, 0);
    }
}
