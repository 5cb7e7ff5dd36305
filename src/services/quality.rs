//! Services behind the quality page: evaluations and their summary.

use crate::domain::auth::AuthenticatedUser;
use crate::dto::listing::ListPageData;
use crate::dto::quality::QualityPageData;
use crate::gateway::{Evaluations, ListGateway, Modules};
use crate::list::filter::{FilterState, InitialQuery};
use crate::list::query;
use crate::reporting::QualitySummary;
use crate::services::listing::load_list_page;
use crate::services::{ServiceResult, ensure_access};

/// Upper bound of rows fetched to compute the summary.
pub const SUMMARY_SCOPE: usize = 500;

/// Loads the evaluations table and the quality summary over the same filters.
pub async fn load_quality_page<E, M>(
    evaluations: &E,
    modules: &M,
    user: &AuthenticatedUser,
    initial: InitialQuery,
    limit: usize,
) -> ServiceResult<QualityPageData>
where
    E: ListGateway<Evaluations> + ?Sized,
    M: ListGateway<Modules> + ?Sized,
{
    ensure_access(user)?;

    let mut module_filters = FilterState::new();
    if let Some(programme) = initial.filters.get("programme_id") {
        module_filters.set("programme_id", programme);
    }
    let scope_query = query::compose(&initial.filters, 1, SUMMARY_SCOPE);
    let modules_query = query::compose(&module_filters, 1, SUMMARY_SCOPE);

    let (list, scope, module_page) = tokio::join!(
        load_list_page::<Evaluations, E>(evaluations, initial, limit),
        ListGateway::<Evaluations>::list(evaluations, &scope_query),
        ListGateway::<Modules>::list(modules, &modules_query),
    );
    let list: ListPageData<_> = list?;
    let scope = scope?;
    let module_page = module_page.map_err(|err| {
        log::error!("Failed to load modules for quality summary: {err}");
        err
    })?;

    if scope.pagination.total > scope.items.len() {
        log::warn!(
            "Quality summary truncated to {} of {} evaluations",
            scope.items.len(),
            scope.pagination.total
        );
    }

    let summary = QualitySummary::compute(&scope.items, &module_page.items);
    Ok(QualityPageData { list, summary })
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::evaluation::Evaluation;
    use crate::domain::module::{Module, ModuleStatus};
    use crate::domain::types::{EvaluationId, ModuleId, ProgrammeId};
    use crate::gateway::mock::{MockEvaluationGateway, MockModuleGateway};
    use crate::pagination::{ListPage, PaginationEnvelope};
    use crate::services::test_support::viewer_user;

    fn evaluation(id: i32, module_id: i32, rating: u8) -> Evaluation {
        Evaluation {
            id: EvaluationId::new(id).unwrap(),
            module_id: ModuleId::new(module_id).unwrap(),
            rating,
            comment: None,
        }
    }

    fn module(id: i32) -> Module {
        Module {
            id: ModuleId::new(id).unwrap(),
            programme_id: ProgrammeId::new(2).unwrap(),
            code: format!("M{id}"),
            name: format!("Module {id}"),
            hours_planned: 10,
            hours_done: 0,
            intervenant_id: None,
            status: ModuleStatus::AVenir,
        }
    }

    #[tokio::test]
    async fn summary_covers_all_filtered_evaluations() {
        let mut evaluations = MockEvaluationGateway::new();
        evaluations.expect_list().times(2).returning(|query| {
            let all = vec![evaluation(1, 1, 5), evaluation(2, 1, 3), evaluation(3, 2, 4)];
            let items = if query.limit == SUMMARY_SCOPE {
                all
            } else {
                all.into_iter().take(query.limit).collect()
            };
            Ok(ListPage::new(items, PaginationEnvelope::new(query.page, query.limit, 3)))
        });
        let mut modules = MockModuleGateway::new();
        modules
            .expect_list()
            .withf(|query| query.get("programme_id") == Some("2") && query.get("rating").is_none())
            .times(1)
            .returning(|query| {
                Ok(ListPage::new(
                    vec![module(1), module(2), module(3), module(4)],
                    PaginationEnvelope::new(query.page, query.limit, 4),
                ))
            });

        let initial = InitialQuery::parse("programme_id=2&rating=all").unwrap();
        let data = load_quality_page(&evaluations, &modules, &viewer_user(), initial, 2)
            .await
            .unwrap();

        assert_eq!(data.list.list.items.len(), 2);
        assert_eq!(data.summary.evaluations, 3);
        assert_eq!(data.summary.average_rating, 4.0);
        assert_eq!(data.summary.coverage, 50.0);
    }
}
