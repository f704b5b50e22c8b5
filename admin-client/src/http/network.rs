//! Network adapter backed by `reqwest`

use super::{ApiRequest, HttpClient, RequestBody, bearer, interpret_response};
use crate::storage::TokenStore;
use crate::{ClientConfig, ClientError, ClientResult};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use shared::request::FormPayload;
use std::sync::Arc;

/// HTTP client talking to the admin API over the network
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig, tokens: Arc<dyn TokenStore>) -> ClientResult<Self> {
        config.validate()?;
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn multipart(form: &FormPayload) -> ClientResult<Form> {
        let mut multipart = Form::new();
        for (name, value) in &form.fields {
            multipart = multipart.text(name.clone(), value.clone());
        }
        for file in &form.files {
            let part = Part::bytes(file.bytes.clone())
                .file_name(file.file_name.clone())
                .mime_str(&file.mime)
                .map_err(|e| ClientError::Config(format!("invalid MIME type {}: {e}", file.mime)))?;
            multipart = multipart.part(file.field.clone(), part);
        }
        Ok(multipart)
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn send(&self, request: ApiRequest) -> ClientResult<Value> {
        let url = format!("{}{}", self.base_url, request.path_and_query());
        let mut req = self
            .client
            .request(request.method.clone(), &url)
            .header(ACCEPT, "application/json");
        if let Some(auth) = bearer(self.tokens.as_ref()) {
            req = req.header(AUTHORIZATION, auth);
        }
        req = match &request.body {
            RequestBody::Empty => req,
            RequestBody::Json(body) => req.json(body),
            RequestBody::Form(form) => req.multipart(Self::multipart(form)?),
        };

        tracing::debug!(method = %request.method, path = %request.path, "sending request");
        let response = req.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        tracing::debug!(method = %request.method, path = %request.path, status = status.as_u16(), "response received");

        interpret_response(status, &body, self.tokens.as_ref())
    }
}
