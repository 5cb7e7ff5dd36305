//! Initial fetch shared by every list page.

use crate::dto::listing::ListPageData;
use crate::gateway::{ListGateway, Resource};
use crate::list::filter::InitialQuery;
use crate::list::query;
use crate::services::ServiceResult;

/// Fetches the first rendering of a list page from the URL it was opened with.
///
/// Role checks stay with the caller; pages differ in who may read them.
pub async fn load_list_page<R, G>(
    gateway: &G,
    initial: InitialQuery,
    limit: usize,
) -> ServiceResult<ListPageData<R::Item>>
where
    R: Resource,
    G: ListGateway<R> + ?Sized,
{
    let query = query::compose(&initial.filters, initial.page, limit);
    let list = ListGateway::<R>::list(gateway, &query).await.map_err(|err| {
        log::error!("Failed to load {}: {err}", R::PATH);
        err
    })?;
    Ok(ListPageData::new(list, initial.filters, query.limit))
}
