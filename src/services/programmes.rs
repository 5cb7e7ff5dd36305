//! Services handling the programmes page and spreadsheet imports.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::programme::{Programme, ProgrammeStatus};
use crate::dto::programmes::ProgrammesPageData;
use crate::forms::import::{ProgrammeImportPayload, Workbook};
use crate::gateway::{ListGateway, MutationGateway, ProgrammeImport, Programmes};
use crate::list::controller::ListController;
use crate::list::filter::{FilterState, InitialQuery};
use crate::list::mutation::AggregateCounter;
use crate::list::query;
use crate::services::listing::load_list_page;
use crate::services::{ServiceResult, ensure_access, ensure_admin};

/// Name of the counter behind the "programmes en cours" tile.
pub const ACTIVE_COUNTER: &str = "active";

/// Loads the programmes table together with the active-programme count.
pub async fn load_programmes_page<G>(
    gateway: &G,
    user: &AuthenticatedUser,
    initial: InitialQuery,
    limit: usize,
) -> ServiceResult<ProgrammesPageData>
where
    G: ListGateway<Programmes> + ?Sized,
{
    ensure_access(user)?;

    // Only the total of this query is used.
    let active_filter = FilterState::new().with("status", ProgrammeStatus::EnCours.as_str());
    let active_query = query::compose(&active_filter, 1, 1);

    let (list, active) = tokio::join!(
        load_list_page::<Programmes, G>(gateway, initial, limit),
        ListGateway::<Programmes>::list(gateway, &active_query),
    );
    let list = list?;
    let active_count = active
        .map_err(|err| {
            log::error!("Failed to count active programmes: {err}");
            err
        })?
        .pagination
        .total;

    Ok(ProgrammesPageData { list, active_count })
}

/// Controller for the programmes page, keeping the active count in step with
/// confirmed creates, updates and deletes.
pub fn programmes_controller<G>(
    gateway: Arc<G>,
    data: ProgrammesPageData,
    debounce: Duration,
) -> ListController<Programmes, G>
where
    G: ListGateway<Programmes> + 'static,
{
    ListController::from_page_data(gateway, data.list, debounce).with_counter(
        AggregateCounter::new(ACTIVE_COUNTER, data.active_count, |programme: &Programme| {
            programme.status.is_active()
        }),
    )
}

/// Creates a programme and its modules from an uploaded workbook.
pub async fn import_programme<G>(
    controller: &mut ListController<Programmes, G>,
    user: &AuthenticatedUser,
    workbook: &Workbook,
) -> ServiceResult<Programme>
where
    G: MutationGateway<Programmes> + ProgrammeImport + 'static,
{
    ensure_admin(user)?;
    let payload = ProgrammeImportPayload::try_from(workbook).map_err(|err| {
        log::error!("Failed to parse programme workbook: {err}");
        err
    })?;

    let programme = controller
        .gateway()
        .import_programme(&payload)
        .await
        .map_err(|err| {
            log::error!("Failed to import programme {}: {err}", payload.programme.code);
            err
        })?;
    log::info!(
        "Imported programme {} with {} module(s)",
        programme.code,
        payload.modules.len()
    );

    // The import also creates modules; a plain refetch keeps counters honest.
    controller.refresh();
    Ok(programme)
}
