//! Services behind the rooms page.

use crate::domain::auth::AuthenticatedUser;
use crate::domain::salle::Salle;
use crate::dto::listing::ListPageData;
use crate::gateway::{ListGateway, Salles};
use crate::list::filter::InitialQuery;
use crate::services::listing::load_list_page;
use crate::services::{ServiceResult, ensure_access};

/// Loads the first page of rooms.
pub async fn load_salles_page<G>(
    gateway: &G,
    user: &AuthenticatedUser,
    initial: InitialQuery,
    limit: usize,
) -> ServiceResult<ListPageData<Salle>>
where
    G: ListGateway<Salles> + ?Sized,
{
    ensure_access(user)?;
    load_list_page::<Salles, G>(gateway, initial, limit).await
}
