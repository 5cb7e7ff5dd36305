//! Services behind the intervenants page.

use crate::domain::auth::AuthenticatedUser;
use crate::domain::intervenant::Intervenant;
use crate::dto::listing::ListPageData;
use crate::gateway::{ListGateway, Intervenants};
use crate::list::filter::InitialQuery;
use crate::services::listing::load_list_page;
use crate::services::{ServiceResult, ensure_access};

/// Loads the first page of intervenants.
pub async fn load_intervenants_page<G>(
    gateway: &G,
    user: &AuthenticatedUser,
    initial: InitialQuery,
    limit: usize,
) -> ServiceResult<ListPageData<Intervenant>>
where
    G: ListGateway<Intervenants> + ?Sized,
{
    ensure_access(user)?;
    load_list_page::<Intervenants, G>(gateway, initial, limit).await
}
