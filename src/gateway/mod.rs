//! Resource adapters and the gateway traits list pages talk to.
//!
//! Each management page is one [`Resource`]: where it lives on the API, what
//! its rows look like, and which key its list responses use. Pages only see
//! [`ListGateway`] / [`MutationGateway`], implemented over HTTP by
//! [`http::HttpGateway`] and by mocks in tests.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::api::errors::ApiResult;
use crate::domain::evaluation::Evaluation;
use crate::domain::intervenant::{Intervenant, NewIntervenant};
use crate::domain::log_entry::LogEntry;
use crate::domain::module::{Module, NewModule};
use crate::domain::notification::{NewNotification, Notification};
use crate::domain::periode::{NewPeriode, Periode};
use crate::domain::programme::{NewProgramme, Programme};
use crate::domain::salle::{NewSalle, Salle};
use crate::domain::types::NotificationId;
use crate::domain::user::{NewUser, User};
use crate::forms::import::ProgrammeImportPayload;
use crate::list::ListItem;
use crate::list::query::ListQuery;
use crate::pagination::ListPage;

pub mod http;
#[cfg(feature = "test-mocks")]
pub mod mock;

/// A listable API collection.
pub trait Resource: Send + Sync + 'static {
    type Item: ListItem + DeserializeOwned + Clone + Send + Sync + 'static;

    /// Collection path relative to the API base URL.
    const PATH: &'static str;
    /// Array key used by list responses that name their collection.
    const COLLECTION_KEY: &'static str;
}

/// A collection that also accepts create, update and delete.
pub trait MutableResource: Resource {
    type Create: Serialize + Send + Sync;
    type Update: Serialize + Send + Sync;
}

pub type ItemId<R> = <<R as Resource>::Item as ListItem>::Id;

#[async_trait]
pub trait ListGateway<R: Resource>: Send + Sync {
    async fn list(&self, query: &ListQuery) -> ApiResult<ListPage<R::Item>>;
}

#[async_trait]
pub trait MutationGateway<R: MutableResource>: ListGateway<R> {
    async fn create(&self, payload: &R::Create) -> ApiResult<R::Item>;
    async fn update(&self, id: ItemId<R>, payload: &R::Update) -> ApiResult<R::Item>;
    /// Deletes the item; `force` also removes dependent records.
    async fn delete(&self, id: ItemId<R>, force: bool) -> ApiResult<()>;
}

/// Notification endpoints beyond plain CRUD.
#[async_trait]
pub trait NotificationActions: Send + Sync {
    async fn mark_read(&self, id: NotificationId, read: bool) -> ApiResult<Notification>;
    /// Bulk change; pages refetch afterwards.
    async fn mark_all_read(&self) -> ApiResult<()>;
}

/// Creation of a programme and its modules from an imported workbook.
#[async_trait]
pub trait ProgrammeImport: Send + Sync {
    async fn import_programme(&self, payload: &ProgrammeImportPayload) -> ApiResult<Programme>;
}

macro_rules! resource {
    ($name:ident, $item:ty, $path:expr, $key:expr) => {
        pub struct $name;

        impl Resource for $name {
            type Item = $item;

            const PATH: &'static str = $path;
            const COLLECTION_KEY: &'static str = $key;
        }
    };
    ($name:ident, $item:ty, $path:expr, $key:expr, $new:ty) => {
        resource!($name, $item, $path, $key);

        impl MutableResource for $name {
            type Create = $new;
            type Update = $new;
        }
    };
}

resource!(Programmes, Programme, "programmes", "programmes", NewProgramme);
resource!(Modules, Module, "modules", "modules", NewModule);
resource!(Intervenants, Intervenant, "intervenants", "intervenants", NewIntervenant);
resource!(Salles, Salle, "salles", "salles", NewSalle);
resource!(Periodes, Periode, "periodes", "periodes", NewPeriode);
resource!(Users, User, "users", "users", NewUser);
resource!(Notifications, Notification, "notifications", "notifications", NewNotification);
resource!(Logs, LogEntry, "logs", "logs");
resource!(Evaluations, Evaluation, "evaluations", "evaluations");
