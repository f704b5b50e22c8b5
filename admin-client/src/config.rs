//! Client configuration

use crate::{ClientError, ClientResult};
use std::path::PathBuf;
use std::time::Duration;

/// Storage key the session token is persisted under
pub const DEFAULT_STORAGE_KEY: &str = "admin_token";

/// Request timeout applied by every adapter
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration for talking to the admin API
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// API base URL (e.g., "https://api.example.com/api")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// File the session token is persisted in; `None` keeps it in memory
    pub token_path: Option<PathBuf>,

    /// Key the token is stored under
    pub storage_key: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            token_path: None,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }

    /// Read configuration from the environment
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `ADMIN_API_BASE_URL` | required |
    /// | `ADMIN_REQUEST_TIMEOUT_SECS` | 30 |
    /// | `ADMIN_TOKEN_PATH` | in-memory token |
    /// | `ADMIN_STORAGE_KEY` | `admin_token` |
    pub fn from_env() -> ClientResult<Self> {
        let base_url = std::env::var("ADMIN_API_BASE_URL")
            .map_err(|_| ClientError::Config("ADMIN_API_BASE_URL is not set".into()))?;
        let mut config = Self::new(base_url);

        if let Ok(raw) = std::env::var("ADMIN_REQUEST_TIMEOUT_SECS") {
            let secs = raw.trim().parse().map_err(|_| {
                ClientError::Config(format!("ADMIN_REQUEST_TIMEOUT_SECS is not a number: {raw}"))
            })?;
            config = config.with_timeout(secs);
        }
        if let Ok(path) = std::env::var("ADMIN_TOKEN_PATH") {
            config = config.with_token_path(path);
        }
        if let Ok(key) = std::env::var("ADMIN_STORAGE_KEY") {
            config = config.with_storage_key(key);
        }
        config.validate()?;
        Ok(config)
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_secs = seconds;
        self
    }

    /// Persist the token in a JSON file at `path`
    pub fn with_token_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_path = Some(path.into());
        self
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check the base URL parses and the timeout is usable
    pub fn validate(&self) -> ClientResult<()> {
        reqwest::Url::parse(&self.base_url)
            .map_err(|e| ClientError::Config(format!("invalid base URL {}: {e}", self.base_url)))?;
        if self.timeout_secs == 0 {
            return Err(ClientError::Config("timeout must be at least one second".into()));
        }
        if self.storage_key.trim().is_empty() {
            return Err(ClientError::Config("storage key must not be empty".into()));
        }
        Ok(())
    }

    /// `scheme://host[:port]` of the base URL, used to resolve relative
    /// media paths
    pub fn api_origin(&self) -> Option<String> {
        let url = reqwest::Url::parse(&self.base_url).ok()?;
        let origin = url.origin();
        origin.is_tuple().then(|| origin.ascii_serialization())
    }

    /// Absolute URL for an API path
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8000/api")
    }
}
