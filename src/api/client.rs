//! Thin HTTP client for the planning REST API.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::api::envelope::decode_error;
use crate::api::errors::{ApiError, ApiResult};
use crate::api::session::SessionContext;
use crate::models::config::DashboardConfig;

pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: SessionContext,
}

impl ApiClient {
    /// Builds a client whose every request gives up after `timeout`.
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        session: SessionContext,
    ) -> ApiResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ApiError::Transport(format!("failed to build HTTP client: {err}")))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn from_config(config: &DashboardConfig, session: SessionContext) -> ApiResult<Self> {
        Self::new(&config.api_base_url, config.request_timeout(), session)
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request_id = Uuid::new_v4().to_string();
        log::debug!("{method} {} [{request_id}]", self.url(path));
        let builder = self
            .http
            .request(method, self.url(path))
            .header(REQUEST_ID_HEADER, request_id);
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub async fn get(&self, path: &str, query: &[(String, String)]) -> ApiResult<Value> {
        let response = self.request(Method::GET, path).query(query).send().await?;
        read_body(response).await
    }

    pub async fn send_json<B>(&self, method: Method, path: &str, body: &B) -> ApiResult<Value>
    where
        B: Serialize + ?Sized,
    {
        let response = self.request(method, path).json(body).send().await?;
        read_body(response).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<Value> {
        self.send_json(Method::POST, path, body).await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<Value> {
        self.send_json(Method::PUT, path, body).await
    }

    pub async fn patch<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<Value> {
        self.send_json(Method::PATCH, path, body).await
    }

    pub async fn delete(&self, path: &str, query: &[(String, String)]) -> ApiResult<()> {
        let response = self
            .request(Method::DELETE, path)
            .query(query)
            .send()
            .await?;
        read_body(response).await.map(|_| ())
    }
}

async fn read_body(response: Response) -> ApiResult<Value> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        let err = decode_error(status.as_u16(), &text);
        log::warn!("API responded {status}: {err}");
        return Err(err);
    }

    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&text)?)
}

/// Unwraps `{data: {...}}` around a single entity when present.
pub fn entity_body(body: Value) -> Value {
    match body {
        Value::Object(mut object) if matches!(object.get("data"), Some(Value::Object(_))) => {
            object.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}
