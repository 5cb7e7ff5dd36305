//! Normalization of the response shapes returned by the planning API.
//!
//! List endpoints answer with a bare array, `{data: [...]}`, `{items: [...]}`
//! or a resource-named key such as `{programmes: [...]}`, and put the
//! pagination either under `pagination` or at the top level. Everything is
//! folded into one [`ListPage`] here so that list state never sees the
//! variants.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::api::errors::{ApiError, ApiResult};
use crate::list::query::ListQuery;
use crate::pagination::{ListPage, PaginationEnvelope};

const PAGINATION_FIELDS: [&str; 4] = ["total", "pages", "totalPages", "limit"];

/// Turns a list response body into the canonical page shape.
pub fn normalize_list<T: DeserializeOwned>(
    body: Value,
    collection_key: &str,
    query: &ListQuery,
) -> ApiResult<ListPage<T>> {
    match body {
        Value::Array(items) => {
            let items = decode_items::<T>(items)?;
            let pagination = PaginationEnvelope::single_page(items.len());
            Ok(ListPage::new(items, pagination))
        }
        Value::Object(mut object) => {
            let items = take_collection(&mut object, collection_key).ok_or_else(|| {
                ApiError::Decode(format!(
                    "list response has no `data`, `items` or `{collection_key}` array"
                ))
            })?;
            let items = decode_items::<T>(items)?;
            let pagination = extract_pagination(object, query, items.len())?;
            Ok(ListPage::new(items, pagination))
        }
        other => Err(ApiError::Decode(format!(
            "expected a list response, got `{other}`"
        ))),
    }
}

fn take_collection(object: &mut Map<String, Value>, collection_key: &str) -> Option<Vec<Value>> {
    for key in ["data", "items", collection_key] {
        if !matches!(object.get(key), Some(Value::Array(_))) {
            continue;
        }
        if let Some(Value::Array(items)) = object.remove(key) {
            return Some(items);
        }
    }
    None
}

fn decode_items<T: DeserializeOwned>(items: Vec<Value>) -> ApiResult<Vec<T>> {
    items
        .into_iter()
        .map(|item| serde_json::from_value(item).map_err(ApiError::from))
        .collect()
}

fn extract_pagination(
    mut object: Map<String, Value>,
    query: &ListQuery,
    len: usize,
) -> ApiResult<PaginationEnvelope> {
    if let Some(pagination) = object.remove("pagination").or_else(|| object.remove("meta")) {
        let mut envelope: PaginationEnvelope = serde_json::from_value(pagination)?;
        if envelope.limit == 0 {
            envelope = PaginationEnvelope::new(envelope.page, query.limit, envelope.total);
        }
        return Ok(envelope);
    }

    if PAGINATION_FIELDS.iter().any(|key| object.contains_key(*key)) {
        let mut envelope: PaginationEnvelope = serde_json::from_value(Value::Object(object))?;
        if envelope.limit == 0 {
            envelope = PaginationEnvelope::new(envelope.page, query.limit, envelope.total);
        }
        return Ok(envelope);
    }

    Ok(PaginationEnvelope::single_page(len))
}

#[derive(Debug, Default, Deserialize)]
struct ErrorPayload {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Option<Value>,
    #[serde(default)]
    counts: Option<BTreeMap<String, u64>>,
}

/// Builds the error for a non-success response.
///
/// A `counts` member always means a dependent-record conflict; a field-keyed
/// `errors` member means server-side validation.
pub fn decode_error(status: u16, body: &str) -> ApiError {
    let payload: ErrorPayload = serde_json::from_str(body).unwrap_or_default();
    let message = payload
        .error
        .or(payload.message)
        .unwrap_or_default()
        .trim()
        .to_string();

    if let Some(counts) = payload.counts.filter(|counts| !counts.is_empty()) {
        return ApiError::Conflict { message, counts };
    }

    let fields = payload.errors.map(field_errors).unwrap_or_default();

    match status {
        401 => ApiError::Unauthorized,
        403 => ApiError::Forbidden,
        404 => ApiError::NotFound,
        409 => ApiError::Conflict {
            message,
            counts: BTreeMap::new(),
        },
        400 | 422 if !fields.is_empty() || status == 422 => ApiError::Validation { message, fields },
        _ => ApiError::Status { status, message },
    }
}

/// Accepts `{"field": "msg"}`, `{"field": ["msg", ...]}` and
/// `[{"field": "...", "message": "..."}]`.
fn field_errors(errors: Value) -> BTreeMap<String, Vec<String>> {
    let mut fields: BTreeMap<String, Vec<String>> = BTreeMap::new();
    match errors {
        Value::Object(map) => {
            for (field, messages) in map {
                let entry = fields.entry(field).or_default();
                match messages {
                    Value::String(message) => entry.push(message),
                    Value::Array(messages) => entry.extend(
                        messages
                            .into_iter()
                            .filter_map(|m| m.as_str().map(str::to_owned)),
                    ),
                    other => entry.push(other.to_string()),
                }
            }
        }
        Value::Array(entries) => {
            for entry in entries {
                let field = entry
                    .get("field")
                    .or_else(|| entry.get("path"))
                    .and_then(Value::as_str);
                let message = entry
                    .get("message")
                    .or_else(|| entry.get("msg"))
                    .and_then(Value::as_str);
                if let (Some(field), Some(message)) = (field, message) {
                    fields
                        .entry(field.to_string())
                        .or_default()
                        .push(message.to_string());
                }
            }
        }
        _ => {}
    }
    fields.retain(|_, messages| !messages.is_empty());
    fields
}
