//! Services handling dashboard user administration.

use crate::domain::auth::AuthenticatedUser;
use crate::domain::user::User;
use crate::dto::listing::ListPageData;
use crate::gateway::{ListGateway, Users};
use crate::list::filter::InitialQuery;
use crate::services::listing::load_list_page;
use crate::services::{ServiceResult, ensure_admin};

/// Loads the first page of dashboard users.
pub async fn load_users_page<G>(
    gateway: &G,
    user: &AuthenticatedUser,
    initial: InitialQuery,
    limit: usize,
) -> ServiceResult<ListPageData<User>>
where
    G: ListGateway<Users> + ?Sized,
{
    ensure_admin(user)?;
    load_list_page::<Users, G>(gateway, initial, limit).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::errors::ApiResult;
    use crate::list::query::ListQuery;
    use crate::pagination::ListPage;
    use crate::services::ServiceError;
    use crate::services::test_support::viewer_user;

    struct Unreachable;

    #[async_trait::async_trait]
    impl ListGateway<Users> for Unreachable {
        async fn list(&self, _query: &ListQuery) -> ApiResult<ListPage<User>> {
            panic!("viewers must not reach the users endpoint");
        }
    }

    #[tokio::test]
    async fn users_page_is_admin_only() {
        let result = load_users_page(&Unreachable, &viewer_user(), InitialQuery::default(), 10).await;
        assert!(matches!(result, Err(ServiceError::Forbidden)));
    }
}
