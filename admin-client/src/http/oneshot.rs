//! In-process adapter driving an axum `Router` directly
//!
//! Requires the "in-process" feature (always on in tests).

use super::{ApiRequest, HttpClient, RequestBody, bearer, interpret_response};
use crate::config::DEFAULT_TIMEOUT_SECS;
use crate::storage::TokenStore;
use crate::{ClientError, ClientResult};
use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::Request;
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use shared::request::FormPayload;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

/// Oneshot HTTP client (in-memory calls)
///
/// Each request is fed to a clone of the router with Tower's `oneshot`, so
/// the stores can run against an embedded or fake backend with no socket.
///
/// # Example
///
/// ```ignore
/// let tokens: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
/// let client = OneshotHttpClient::new(fake_backend(), tokens);
/// let products = client.get("/admin/products/show", &Filters::new()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct OneshotHttpClient {
    router: Router,
    tokens: Arc<dyn TokenStore>,
    timeout: Duration,
}

impl OneshotHttpClient {
    pub fn new(router: Router, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            router,
            tokens,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn build_request(&self, request: &ApiRequest) -> ClientResult<Request<Body>> {
        let mut builder = Request::builder()
            .method(request.method.clone())
            .uri(request.path_and_query())
            .header(ACCEPT, "application/json");

        if let Some(auth) = bearer(self.tokens.as_ref()) {
            builder = builder.header(AUTHORIZATION, auth);
        }

        let body = match &request.body {
            RequestBody::Empty => Body::empty(),
            RequestBody::Json(value) => {
                builder = builder.header(CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(value)?)
            }
            RequestBody::Form(form) => {
                let boundary = format!("admin-client-{}", shared::util::snowflake_id());
                builder = builder.header(
                    CONTENT_TYPE,
                    format!("multipart/form-data; boundary={boundary}"),
                );
                Body::from(encode_multipart(form, &boundary))
            }
        };

        builder
            .body(body)
            .map_err(|e| ClientError::Network(format!("failed to build request: {e}")))
    }
}

#[async_trait]
impl HttpClient for OneshotHttpClient {
    async fn send(&self, request: ApiRequest) -> ClientResult<Value> {
        let http_request = self.build_request(&request)?;

        let response = tokio::time::timeout(self.timeout, self.router.clone().oneshot(http_request))
            .await
            .map_err(|_| ClientError::Timeout)?
            .map_err(|e| ClientError::Network(format!("oneshot call failed: {e}")))?;

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| ClientError::Network(format!("failed to read body: {e}")))?;
        tracing::debug!(method = %request.method, path = %request.path, status = status.as_u16(), "oneshot response");

        interpret_response(status, &body, self.tokens.as_ref())
    }
}

/// Encode a form as a `multipart/form-data` body
///
/// Only the in-process adapter needs this: it hands the router raw bytes.
/// Over the network the form goes through `reqwest::multipart` instead.
/// Field values and file bytes are written as-is; quotes in names are
/// percent-escaped.
fn encode_multipart(form: &FormPayload, boundary: &str) -> Vec<u8> {
    let mut out = Vec::new();
    for (name, value) in &form.fields {
        out.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n",
                escape_quotes(name)
            )
            .as_bytes(),
        );
        out.extend_from_slice(value.as_bytes());
        out.extend_from_slice(b"\r\n");
    }
    for file in &form.files {
        out.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                escape_quotes(&file.field),
                escape_quotes(&file.file_name),
                file.mime
            )
            .as_bytes(),
        );
        out.extend_from_slice(&file.bytes);
        out.extend_from_slice(b"\r\n");
    }
    out.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    out
}

fn escape_quotes(raw: &str) -> String {
    raw.replace('"', "%22")
}
