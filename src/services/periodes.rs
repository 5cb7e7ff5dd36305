//! Services behind the academic periods page.

use crate::domain::auth::AuthenticatedUser;
use crate::domain::periode::Periode;
use crate::dto::listing::ListPageData;
use crate::gateway::{ListGateway, Periodes};
use crate::list::filter::InitialQuery;
use crate::services::listing::load_list_page;
use crate::services::{ServiceResult, ensure_access};

pub async fn load_periodes_page<G>(
    gateway: &G,
    user: &AuthenticatedUser,
    initial: InitialQuery,
    limit: usize,
) -> ServiceResult<ListPageData<Periode>>
where
    G: ListGateway<Periodes> + ?Sized,
{
    ensure_access(user)?;
    load_list_page::<Periodes, G>(gateway, initial, limit).await
}
