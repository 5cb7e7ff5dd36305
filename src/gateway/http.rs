//! HTTP implementation of the gateway traits.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::client::{ApiClient, entity_body};
use crate::api::envelope::normalize_list;
use crate::api::errors::ApiResult;
use crate::domain::notification::{Notification, NotificationReadState};
use crate::domain::programme::Programme;
use crate::domain::types::NotificationId;
use crate::forms::import::ProgrammeImportPayload;
use crate::gateway::{
    ItemId, ListGateway, MutableResource, MutationGateway, NotificationActions, Notifications,
    ProgrammeImport, Programmes, Resource,
};
use crate::list::query::ListQuery;
use crate::pagination::ListPage;

/// Gateway serving every resource through one [`ApiClient`].
#[derive(Clone, Debug)]
pub struct HttpGateway {
    client: ApiClient,
}

impl HttpGateway {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }
}

fn item_path<R: Resource>(id: impl std::fmt::Display) -> String {
    format!("{}/{id}", R::PATH)
}

fn decode_entity<T: DeserializeOwned>(body: Value) -> ApiResult<T> {
    Ok(serde_json::from_value(entity_body(body))?)
}

#[async_trait]
impl<R: Resource> ListGateway<R> for HttpGateway {
    async fn list(&self, query: &ListQuery) -> ApiResult<ListPage<R::Item>> {
        let body = self.client.get(R::PATH, &query.pairs()).await?;
        normalize_list(body, R::COLLECTION_KEY, query)
    }
}

#[async_trait]
impl<R: MutableResource> MutationGateway<R> for HttpGateway {
    async fn create(&self, payload: &R::Create) -> ApiResult<R::Item> {
        let body = self.client.post(R::PATH, payload).await?;
        decode_entity(body)
    }

    async fn update(&self, id: ItemId<R>, payload: &R::Update) -> ApiResult<R::Item> {
        let body = self.client.put(&item_path::<R>(id), payload).await?;
        decode_entity(body)
    }

    async fn delete(&self, id: ItemId<R>, force: bool) -> ApiResult<()> {
        let query = if force {
            vec![("force".to_string(), "true".to_string())]
        } else {
            Vec::new()
        };
        self.client.delete(&item_path::<R>(id), &query).await
    }
}

#[async_trait]
impl NotificationActions for HttpGateway {
    async fn mark_read(&self, id: NotificationId, read: bool) -> ApiResult<Notification> {
        let body = self
            .client
            .patch(
                &item_path::<Notifications>(id),
                &NotificationReadState { read },
            )
            .await?;
        decode_entity(body)
    }

    async fn mark_all_read(&self) -> ApiResult<()> {
        let path = format!("{}/read-all", Notifications::PATH);
        self.client.post(&path, &Value::Null).await.map(|_| ())
    }
}

#[async_trait]
impl ProgrammeImport for HttpGateway {
    async fn import_programme(&self, payload: &ProgrammeImportPayload) -> ApiResult<Programme> {
        let path = format!("{}/import", Programmes::PATH);
        let body = self.client.post(&path, payload).await?;
        decode_entity(body)
    }
}
