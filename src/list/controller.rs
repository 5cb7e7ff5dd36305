//! Async driver of a list page.
//!
//! The controller is owned by the page task and processes one event at a time:
//! a settled search term or a finished fetch. Fetches run as spawned tasks
//! and report back over a channel with the ticket they were issued under, so
//! a slow response can never overwrite the rows of a newer request.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::api::errors::{ApiError, ApiResult};
use crate::dto::listing::{DeleteConflict, DeleteOutcome, ListPageData};
use crate::gateway::{ItemId, ListGateway, MutableResource, MutationGateway, Resource};
use crate::list::SEARCH_FILTER;
use crate::list::debounce::Debouncer;
use crate::list::filter::FilterState;
use crate::list::mutation::{AggregateCounter, UpdateStrategy};
use crate::list::state::{FetchOutcome, FetchTicket, ListState};
use crate::pagination::{ListPage, PaginationEnvelope};

type Completion<T> = (FetchTicket, ApiResult<ListPage<T>>);

/// What [`ListController::next_event`] just processed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControllerEvent {
    /// The search box settled; `fetching` tells whether it changed the query.
    SearchSettled { fetching: bool },
    /// A fetch finished.
    Fetched(FetchOutcome),
}

pub struct ListController<R: Resource, G> {
    gateway: Arc<G>,
    state: ListState<R::Item>,
    search: Debouncer<String>,
    raw_search: String,
    update_strategy: UpdateStrategy,
    completions_tx: mpsc::UnboundedSender<Completion<R::Item>>,
    completions_rx: mpsc::UnboundedReceiver<Completion<R::Item>>,
    teardown: CancellationToken,
    current: Option<CancellationToken>,
    in_flight: usize,
}

impl<R, G> ListController<R, G>
where
    R: Resource,
    G: ListGateway<R> + 'static,
{
    pub fn new(gateway: Arc<G>, limit: usize, debounce: Duration) -> Self {
        Self::with_state(gateway, ListState::new(limit), debounce)
    }

    /// Controller resuming from the data a page was rendered with.
    pub fn from_page_data(
        gateway: Arc<G>,
        data: ListPageData<R::Item>,
        debounce: Duration,
    ) -> Self {
        let mut state = ListState::with_filters(data.filters, data.page, data.limit);
        state.seed(data.list);
        let mut controller = Self::with_state(gateway, state, debounce);
        controller.raw_search = controller.state.filters().raw(SEARCH_FILTER).to_string();
        controller
    }

    fn with_state(gateway: Arc<G>, state: ListState<R::Item>, debounce: Duration) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            gateway,
            state,
            search: Debouncer::new(debounce),
            raw_search: String::new(),
            update_strategy: UpdateStrategy::default(),
            completions_tx,
            completions_rx,
            teardown: CancellationToken::new(),
            current: None,
            in_flight: 0,
        }
    }

    pub fn with_update_strategy(mut self, strategy: UpdateStrategy) -> Self {
        self.update_strategy = strategy;
        self
    }

    pub fn with_counter(mut self, counter: AggregateCounter<R::Item>) -> Self {
        self.state.register_counter(counter);
        self
    }

    pub fn gateway(&self) -> &Arc<G> {
        &self.gateway
    }

    pub fn state(&self) -> &ListState<R::Item> {
        &self.state
    }

    pub fn items(&self) -> &[R::Item] {
        self.state.items()
    }

    pub fn pagination(&self) -> &PaginationEnvelope {
        self.state.pagination()
    }

    pub fn filters(&self) -> &FilterState {
        self.state.filters()
    }

    pub fn page(&self) -> usize {
        self.state.page()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error()
    }

    pub fn counter(&self, name: &str) -> Option<usize> {
        self.state.counter(name)
    }

    pub fn set_counter(&mut self, name: &str, value: usize) {
        self.state.set_counter(name, value);
    }

    /// Text currently in the search box, ahead of the debounced filter.
    pub fn raw_search(&self) -> &str {
        &self.raw_search
    }

    /// Whether there is a pending search or a request in flight.
    pub fn is_busy(&self) -> bool {
        self.search.is_pending() || self.in_flight > 0
    }

    /// Records a keystroke; the query only changes once typing pauses.
    pub fn input_search(&mut self, raw: impl Into<String>) {
        if self.teardown.is_cancelled() {
            return;
        }
        self.raw_search = raw.into();
        self.search.push(self.raw_search.clone());
    }

    /// Changes a dropdown or date filter; moves back to page 1 and fetches.
    pub fn set_filter(&mut self, name: impl Into<String>, value: impl Into<String>) -> bool {
        let changed = self.state.set_filter(name, value);
        if changed {
            self.dispatch();
        }
        changed
    }

    pub fn clear_filters(&mut self) -> bool {
        self.search.cancel();
        self.raw_search.clear();
        let changed = self.state.reset_filters();
        if changed {
            self.dispatch();
        }
        changed
    }

    pub fn set_page(&mut self, page: usize) -> bool {
        let changed = self.state.set_page(page);
        if changed {
            self.dispatch();
        }
        changed
    }

    pub fn set_limit(&mut self, limit: usize) -> bool {
        let changed = self.state.set_limit(limit);
        if changed {
            self.dispatch();
        }
        changed
    }

    /// Fetches the current page again with unchanged parameters.
    pub fn refresh(&mut self) {
        self.dispatch();
    }

    fn dispatch(&mut self) {
        if self.teardown.is_cancelled() {
            return;
        }

        let ticket = self.state.begin_fetch();
        if let Some(previous) = self.current.take() {
            previous.cancel();
        }
        let token = self.teardown.child_token();
        self.current = Some(token.clone());
        self.in_flight += 1;

        log::debug!(
            "Fetching {} #{} ({})",
            R::PATH,
            ticket.seq(),
            ticket.query().to_query_string()
        );

        let gateway = Arc::clone(&self.gateway);
        let completions = self.completions_tx.clone();
        tokio::spawn(async move {
            let result = tokio::select! {
                _ = token.cancelled() => Err(ApiError::Cancelled),
                result = gateway.list(ticket.query()) => result,
            };
            // The page may be gone already; nothing left to update then.
            let _ = completions.send((ticket, result));
        });
    }

    /// Processes the next settled search or finished fetch.
    ///
    /// Returns `None` once nothing is pending.
    pub async fn next_event(&mut self) -> Option<ControllerEvent> {
        enum Wake<T> {
            Search(String),
            Fetch(Completion<T>),
        }

        if !self.is_busy() {
            return None;
        }

        let wake = tokio::select! {
            term = self.search.next() => Wake::Search(term),
            Some(completion) = self.completions_rx.recv() => Wake::Fetch(completion),
            else => return None,
        };

        let event = match wake {
            Wake::Search(term) => {
                let fetching = self.state.set_filter(SEARCH_FILTER, term);
                if fetching {
                    self.dispatch();
                }
                ControllerEvent::SearchSettled { fetching }
            }
            Wake::Fetch((ticket, result)) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                if self.state.is_latest(&ticket) {
                    self.current = None;
                }
                ControllerEvent::Fetched(self.state.complete_fetch(ticket, result))
            }
        };
        Some(event)
    }

    /// Runs events until no search is pending and no request is in flight.
    pub async fn settle(&mut self) {
        while self.next_event().await.is_some() {}
    }

    /// Cancels the pending search and every request in flight.
    pub fn shutdown(&mut self) {
        self.search.cancel();
        self.teardown.cancel();
    }
}

impl<R, G> ListController<R, G>
where
    R: MutableResource,
    G: MutationGateway<R> + 'static,
{
    /// Creates an item and puts it on top of the list once confirmed.
    pub async fn create(&mut self, payload: &R::Create) -> ApiResult<R::Item> {
        let item = self.gateway.create(payload).await.map_err(|err| {
            log::error!("Failed to create {} item: {err}", R::PATH);
            err
        })?;
        self.state.apply_created(item.clone());
        Ok(item)
    }

    /// Saves an item, then refetches or patches the row depending on the
    /// configured [`UpdateStrategy`].
    pub async fn update(&mut self, id: ItemId<R>, payload: &R::Update) -> ApiResult<R::Item> {
        let item = self.gateway.update(id, payload).await.map_err(|err| {
            log::error!("Failed to update {} item {id}: {err}", R::PATH);
            err
        })?;
        match self.update_strategy {
            UpdateStrategy::Refetch => self.dispatch(),
            UpdateStrategy::ReplaceInPlace => {
                if !self.state.apply_updated(item.clone()) {
                    self.dispatch();
                }
            }
        }
        Ok(item)
    }

    /// Deletes an item and drops its row once confirmed.
    ///
    /// Without `force`, a dependent-record conflict is reported as
    /// [`DeleteOutcome::Conflict`] so the user can confirm a forced retry.
    pub async fn delete(&mut self, id: ItemId<R>, force: bool) -> ApiResult<DeleteOutcome> {
        match self.gateway.delete(id, force).await {
            Ok(()) => {
                self.state.apply_deleted(id);
                if self.state.retreat_past_last_page() {
                    self.dispatch();
                }
                Ok(DeleteOutcome::Deleted)
            }
            Err(ApiError::Conflict { message, counts }) if !force => {
                log::warn!("Delete of {} item {id} blocked: {message}", R::PATH);
                Ok(DeleteOutcome::Conflict(DeleteConflict { message, counts }))
            }
            Err(err) => {
                log::error!("Failed to delete {} item {id}: {err}", R::PATH);
                Err(err)
            }
        }
    }
}

impl<R, G> ListController<R, G>
where
    R: Resource,
    G: ListGateway<R> + 'static,
{
    /// Runs a bulk or cross-cutting change and refetches on success.
    pub async fn run_bulk<F, Fut>(&mut self, operation: F) -> ApiResult<()>
    where
        F: FnOnce(Arc<G>) -> Fut,
        Fut: Future<Output = ApiResult<()>>,
    {
        operation(Arc::clone(&self.gateway)).await.map_err(|err| {
            log::error!("Bulk operation on {} failed: {err}", R::PATH);
            err
        })?;
        self.dispatch();
        Ok(())
    }
}

impl<R: Resource, G> Drop for ListController<R, G> {
    fn drop(&mut self) {
        self.teardown.cancel();
    }
}
