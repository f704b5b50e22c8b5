//! Session manager
//!
//! The persisted token is the single source of truth: every state query
//! re-reads the [`TokenStore`], so a token evicted by the HTTP adapter on a
//! 401 is observed here immediately with no extra bookkeeping.

use crate::http::HttpClient;
use crate::logger::redact;
use crate::storage::TokenStore;
use crate::{ClientError, ClientResult};
use parking_lot::RwLock;
use shared::AppError;
use shared::client::{LoginRequest, Session, UserInfo};
use shared::normalize::{extract_token, extract_user};
use shared::request::Filters;
use shared::response::server_message;
use std::fmt;
use std::sync::Arc;

const LOGIN_PATH: &str = "/admin-login";

/// Where the session stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No token stored
    Anonymous,
    /// A login request is in flight
    Authenticating,
    /// A token is stored; the user may still be unverified
    Authenticated,
}

#[derive(Debug, Default)]
struct SessionInner {
    authenticating: bool,
    user: Option<UserInfo>,
}

pub struct SessionManager {
    http: Arc<dyn HttpClient>,
    tokens: Arc<dyn TokenStore>,
    inner: RwLock<SessionInner>,
}

impl fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionManager")
            .field("state", &self.state())
            .field("user", &self.inner.read().user)
            .finish()
    }
}

impl SessionManager {
    /// Create a manager over the shared token store
    ///
    /// A stored token puts the session straight into `Authenticated`; call
    /// [`verify`](Self::verify) to load the user it belongs to.
    pub fn new(http: Arc<dyn HttpClient>, tokens: Arc<dyn TokenStore>) -> Self {
        if tokens.load().is_some() {
            tracing::info!("restored session token from storage");
        }
        Self {
            http,
            tokens,
            inner: RwLock::new(SessionInner::default()),
        }
    }

    pub fn state(&self) -> SessionState {
        if self.inner.read().authenticating {
            SessionState::Authenticating
        } else if self.tokens.load().is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state() == SessionState::Authenticated
    }

    pub fn token(&self) -> Option<String> {
        self.tokens.load()
    }

    /// The logged-in user; `None` once the token is gone
    pub fn user(&self) -> Option<UserInfo> {
        self.tokens.load()?;
        self.inner.read().user.clone()
    }

    pub fn session(&self) -> Session {
        Session {
            token: self.token(),
            user: self.user(),
        }
    }

    /// Exchange credentials for a token and persist it
    ///
    /// A response without a token is a failed login even on HTTP 200.
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<UserInfo> {
        self.inner.write().authenticating = true;
        tracing::info!(username, "logging in");

        let result = self.exchange(username, password).await;

        let mut inner = self.inner.write();
        inner.authenticating = false;
        match result {
            Ok(user) => {
                inner.user = Some(user.clone());
                Ok(user)
            }
            Err(e) => {
                inner.user = None;
                tracing::warn!(username, error = %e, "login failed");
                Err(e)
            }
        }
    }

    async fn exchange(&self, username: &str, password: &str) -> ClientResult<UserInfo> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let payload = self
            .http
            .post_json(LOGIN_PATH, &serde_json::to_value(&request)?)
            .await?;

        let token = extract_token(&payload).ok_or_else(|| {
            ClientError::Rejected(AppError::missing_token(server_message(&payload)))
        })?;
        self.tokens.save(&token)?;

        let user = extract_user(&payload).unwrap_or_else(|| UserInfo {
            id: String::new(),
            username: username.to_string(),
            name: username.to_string(),
            role: "admin".to_string(),
        });
        tracing::info!(username = %user.username, role = %user.role, token = %redact(&token), "logged in");
        Ok(user)
    }

    /// Forget the token and the user; no server round-trip
    ///
    /// Safe to call when already logged out.
    pub fn logout(&self) -> ClientResult<()> {
        let had_token = self.tokens.clear()?;
        self.inner.write().user = None;
        if had_token {
            tracing::info!("logged out");
        }
        Ok(())
    }

    /// Load the user behind the stored token
    ///
    /// Failures are tolerated: the token stays stored (unless the server
    /// answered 401, which the HTTP adapter handles) and `None` is returned.
    pub async fn verify(&self) -> Option<UserInfo> {
        self.tokens.load()?;
        match self.http.get(LOGIN_PATH, &Filters::new()).await {
            Ok(payload) => {
                let user = extract_user(&payload)?;
                self.inner.write().user = Some(user.clone());
                tracing::info!(username = %user.username, "session verified");
                Some(user)
            }
            Err(e) => {
                tracing::warn!(error = %e, "session verification failed");
                None
            }
        }
    }
}
