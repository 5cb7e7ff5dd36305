//! Services behind the activity log page, restricted to administrators.

use crate::domain::auth::AuthenticatedUser;
use crate::domain::log_entry::LogEntry;
use crate::dto::listing::ListPageData;
use crate::gateway::{ListGateway, Logs};
use crate::list::filter::InitialQuery;
use crate::services::listing::load_list_page;
use crate::services::{ServiceResult, ensure_admin};

/// Activity log, newest first as returned by the API. Admins only.
pub async fn load_logs_page<G>(
    gateway: &G,
    user: &AuthenticatedUser,
    initial: InitialQuery,
    limit: usize,
) -> ServiceResult<ListPageData<LogEntry>>
where
    G: ListGateway<Logs> + ?Sized,
{
    ensure_admin(user)?;
    load_list_page::<Logs, G>(gateway, initial, limit).await
}
