//! Mock gateways for isolating page services in tests.
//!
//! One mock per resource: a single mock cannot carry two instantiations of
//! [`ListGateway`] because their expectations would share a name.

use async_trait::async_trait;
use mockall::mock;

use crate::api::errors::ApiResult;
use crate::domain::evaluation::Evaluation;
use crate::domain::module::{Module, NewModule};
use crate::domain::notification::{NewNotification, Notification};
use crate::domain::programme::{NewProgramme, Programme};
use crate::domain::types::{ModuleId, NotificationId, ProgrammeId};
use crate::forms::import::ProgrammeImportPayload;
use crate::gateway::{
    Evaluations, ListGateway, Modules, MutationGateway, NotificationActions, Notifications,
    ProgrammeImport, Programmes,
};
use crate::list::query::ListQuery;
use crate::pagination::ListPage;

mock! {
    pub ProgrammeGateway {}

    #[async_trait]
    impl ListGateway<Programmes> for ProgrammeGateway {
        async fn list(&self, query: &ListQuery) -> ApiResult<ListPage<Programme>>;
    }

    #[async_trait]
    impl MutationGateway<Programmes> for ProgrammeGateway {
        async fn create(&self, payload: &NewProgramme) -> ApiResult<Programme>;
        async fn update(&self, id: ProgrammeId, payload: &NewProgramme) -> ApiResult<Programme>;
        async fn delete(&self, id: ProgrammeId, force: bool) -> ApiResult<()>;
    }

    #[async_trait]
    impl ProgrammeImport for ProgrammeGateway {
        async fn import_programme(&self, payload: &ProgrammeImportPayload) -> ApiResult<Programme>;
    }
}

mock! {
    pub ModuleGateway {}

    #[async_trait]
    impl ListGateway<Modules> for ModuleGateway {
        async fn list(&self, query: &ListQuery) -> ApiResult<ListPage<Module>>;
    }

    #[async_trait]
    impl MutationGateway<Modules> for ModuleGateway {
        async fn create(&self, payload: &NewModule) -> ApiResult<Module>;
        async fn update(&self, id: ModuleId, payload: &NewModule) -> ApiResult<Module>;
        async fn delete(&self, id: ModuleId, force: bool) -> ApiResult<()>;
    }
}

mock! {
    pub EvaluationGateway {}

    #[async_trait]
    impl ListGateway<Evaluations> for EvaluationGateway {
        async fn list(&self, query: &ListQuery) -> ApiResult<ListPage<Evaluation>>;
    }
}

mock! {
    pub NotificationGateway {}

    #[async_trait]
    impl ListGateway<Notifications> for NotificationGateway {
        async fn list(&self, query: &ListQuery) -> ApiResult<ListPage<Notification>>;
    }

    #[async_trait]
    impl MutationGateway<Notifications> for NotificationGateway {
        async fn create(&self, payload: &NewNotification) -> ApiResult<Notification>;
        async fn update(
            &self,
            id: NotificationId,
            payload: &NewNotification,
        ) -> ApiResult<Notification>;
        async fn delete(&self, id: NotificationId, force: bool) -> ApiResult<()>;
    }

    #[async_trait]
    impl NotificationActions for NotificationGateway {
        async fn mark_read(&self, id: NotificationId, read: bool) -> ApiResult<Notification>;
        async fn mark_all_read(&self) -> ApiResult<()>;
    }
}
