//! Services behind the modules page.

use crate::domain::auth::AuthenticatedUser;
use crate::domain::module::Module;
use crate::dto::listing::ListPageData;
use crate::gateway::{ListGateway, Modules};
use crate::list::filter::InitialQuery;
use crate::services::listing::load_list_page;
use crate::services::{ServiceResult, ensure_access};

/// Loads the first page of modules.
pub async fn load_modules_page<G>(
    gateway: &G,
    user: &AuthenticatedUser,
    initial: InitialQuery,
    limit: usize,
) -> ServiceResult<ListPageData<Module>>
where
    G: ListGateway<Modules> + ?Sized,
{
    ensure_access(user)?;
    load_list_page::<Modules, G>(gateway, initial, limit).await
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::module::ModuleStatus;
    use crate::domain::types::{ModuleId, ProgrammeId};
    use crate::gateway::mock::MockModuleGateway;
    use crate::pagination::{ListPage, PaginationEnvelope};
    use crate::services::test_support::viewer_user;

    fn module(id: i32) -> Module {
        Module {
            id: ModuleId::new(id).unwrap(),
            programme_id: ProgrammeId::new(4).unwrap(),
            code: format!("M{id}"),
            name: format!("Module {id}"),
            hours_planned: 20,
            hours_done: 5,
            intervenant_id: None,
            status: ModuleStatus::EnCours,
        }
    }

    #[tokio::test]
    async fn filters_from_url_reach_the_query() {
        let mut gateway = MockModuleGateway::new();
        gateway
            .expect_list()
            .withf(|query| {
                query.get("programme_id") == Some("4")
                    && query.get("status").is_none()
                    && query.page == 1
                    && query.limit == 25
            })
            .times(1)
            .returning(|query| {
                Ok(ListPage::new(
                    vec![module(1), module(2)],
                    PaginationEnvelope::new(query.page, query.limit, 2),
                ))
            });

        let initial = InitialQuery::parse("programme_id=4&status=&page=0").unwrap();
        let data = load_modules_page(&gateway, &viewer_user(), initial, 25)
            .await
            .unwrap();

        assert_eq!(data.list.items.len(), 2);
        assert_eq!(data.links, vec![Some(1)]);
    }
}
