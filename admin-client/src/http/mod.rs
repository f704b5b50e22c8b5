//! HTTP client adapters
//!
//! [`HttpClient`] is the one seam between the stores and the wire. Every
//! adapter reads the bearer token from the [`TokenStore`] on each request
//! and evicts it when the server answers 401, so route guards and the
//! transport always agree on the session without sharing a cache.
//!
//! Responses are handed back as raw JSON; the stores normalize them.

pub mod network;
#[cfg(any(test, feature = "in-process"))]
pub mod oneshot;

pub use network::NetworkHttpClient;
#[cfg(any(test, feature = "in-process"))]
pub use oneshot::OneshotHttpClient;

use crate::storage::TokenStore;
use crate::{ClientError, ClientResult};
use async_trait::async_trait;
use http::{Method, StatusCode};
use serde_json::Value;
use shared::request::{Filters, FormPayload};
use shared::response::{ensure_success, server_message};

/// Request body variants the admin API accepts
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    /// `multipart/form-data`, used for every create/update submission
    Form(FormPayload),
}

/// Transport-neutral request description
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the API base URL
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn with_filters(mut self, filters: &Filters) -> Self {
        self.query = filters.as_pairs().to_vec();
        self
    }

    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// Path plus encoded query string
    pub fn path_and_query(&self) -> String {
        let path = format!("/{}", self.path.trim_start_matches('/'));
        if self.query.is_empty() {
            return path;
        }
        let filters = self
            .query
            .iter()
            .fold(Filters::new(), |f, (k, v)| f.with(k.clone(), v.clone()));
        format!("{path}?{}", filters.to_query_string())
    }
}

/// HTTP client trait
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Send one request and interpret the response
    ///
    /// Implementations attach `Accept: application/json` and the stored
    /// bearer token, enforce the configured timeout, and pass the answer
    /// through [`interpret_response`].
    async fn send(&self, request: ApiRequest) -> ClientResult<Value>;

    async fn get(&self, path: &str, filters: &Filters) -> ClientResult<Value> {
        self.send(ApiRequest::new(Method::GET, path).with_filters(filters))
            .await
    }

    async fn post_json(&self, path: &str, body: &Value) -> ClientResult<Value> {
        self.send(ApiRequest::new(Method::POST, path).with_body(RequestBody::Json(body.clone())))
            .await
    }

    async fn post_form(&self, path: &str, form: &FormPayload) -> ClientResult<Value> {
        self.send(ApiRequest::new(Method::POST, path).with_body(RequestBody::Form(form.clone())))
            .await
    }

    async fn delete(&self, path: &str) -> ClientResult<Value> {
        self.send(ApiRequest::new(Method::DELETE, path)).await
    }
}

/// `Authorization` header value for the stored token, if any
pub fn bearer(tokens: &dyn TokenStore) -> Option<String> {
    tokens.load().map(|token| format!("Bearer {token}"))
}

/// Turn a status and body into the adapter's result
///
/// - 401 evicts the stored token (once; later 401s find nothing to clear)
///   and rejects with [`ClientError::Unauthorized`]
/// - other non-2xx statuses reject with [`ClientError::Http`] carrying the
///   server's message when the body has one
/// - a 2xx body flagged `success: false` rejects with
///   [`ClientError::Rejected`]
/// - an empty 2xx body is `null`
pub fn interpret_response(
    status: StatusCode,
    body: &[u8],
    tokens: &dyn TokenStore,
) -> ClientResult<Value> {
    let payload = parse_body(body);

    if status == StatusCode::UNAUTHORIZED {
        match tokens.clear() {
            Ok(true) => tracing::warn!("credential rejected (401), session token evicted"),
            Ok(false) => tracing::debug!("401 with no stored token"),
            Err(e) => tracing::error!(error = %e, "failed to evict rejected token"),
        }
        let message = payload.as_ref().ok().and_then(server_message);
        return Err(ClientError::Unauthorized(message));
    }

    if !status.is_success() {
        let message = payload.as_ref().ok().and_then(server_message);
        return Err(ClientError::Http {
            status: status.as_u16(),
            message,
        });
    }

    let payload = payload?;
    ensure_success(&payload)?;
    Ok(payload)
}

fn parse_body(body: &[u8]) -> ClientResult<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body)
        .map_err(|e| ClientError::InvalidResponse(format!("JSON parse error: {e}")))
}
