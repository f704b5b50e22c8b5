//! Application state container
//!
//! One owned value holding the configuration, the session and every store.
//! UI layers get it by reference (or a cheap clone) instead of reaching for
//! globals.

use crate::http::network::NetworkHttpClient;
use crate::http::HttpClient;
use crate::session::SessionManager;
use crate::storage::{FileTokenStore, MemoryTokenStore, TokenStore};
use crate::store::catalog::{AttributeStore, VariantStore, VariationStore};
use crate::store::category::CategoryStore;
use crate::store::gst::GstStore;
use crate::store::product::ProductStore;
use crate::store::{SalesStore, SettingsStore};
use crate::{ClientConfig, ClientError, ClientResult};
use shared::client::{Session, UserInfo};
use shared::normalize::NormalizeContext;
use shared::request::Filters;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct AppState {
    pub config: ClientConfig,
    pub session: Arc<SessionManager>,
    pub products: ProductStore,
    pub categories: CategoryStore,
    pub gst: GstStore,
    pub variations: VariationStore,
    pub attributes: AttributeStore,
    pub variants: VariantStore,
    pub sales: SalesStore,
    pub settings: SettingsStore,
}

impl AppState {
    /// Build the state for a networked client
    ///
    /// The token lives in `config.token_path` when set, otherwise in memory.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let tokens: Arc<dyn TokenStore> = match &config.token_path {
            Some(path) => Arc::new(FileTokenStore::new(path, config.storage_key.clone())),
            None => Arc::new(MemoryTokenStore::new()),
        };
        let http: Arc<dyn HttpClient> = Arc::new(NetworkHttpClient::new(&config, tokens.clone())?);
        Ok(Self::with_http(config, http, tokens))
    }

    /// Build the state over any adapter sharing `tokens`
    pub fn with_http(
        config: ClientConfig,
        http: Arc<dyn HttpClient>,
        tokens: Arc<dyn TokenStore>,
    ) -> Self {
        let ctx = config
            .api_origin()
            .map(NormalizeContext::with_origin)
            .unwrap_or_default();

        Self {
            session: Arc::new(SessionManager::new(http.clone(), tokens)),
            products: ProductStore::new(http.clone(), ctx.clone()),
            categories: CategoryStore::new(http.clone(), ctx.clone()),
            gst: GstStore::new(http.clone(), ctx.clone()),
            variations: VariationStore::new(http.clone(), ctx.clone()),
            attributes: AttributeStore::new(http.clone(), ctx.clone()),
            variants: VariantStore::new(http.clone(), ctx.clone()),
            sales: SalesStore::new(http.clone(), ctx.clone()),
            settings: SettingsStore::new(http, ctx),
            config,
        }
    }

    /// Boot sequence: verify a restored session and load site settings
    /// concurrently
    ///
    /// Neither failure is fatal; the verified user is returned when there is
    /// one.
    pub async fn bootstrap(&self) -> Option<UserInfo> {
        let (user, settings) = tokio::join!(self.session.verify(), self.settings.fetch());
        if let Err(e) = settings {
            tracing::warn!(error = %e, "site settings unavailable at boot");
        }
        user
    }

    /// Log in, then preload site settings and online orders
    ///
    /// Preload failures are logged and never fail the login.
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<UserInfo> {
        let user = self.session.login(username, password).await?;

        let filters = Filters::new();
        let (settings, orders) =
            tokio::join!(self.settings.fetch(), self.sales.fetch_online(&filters));
        if let Err(e) = settings {
            tracing::warn!(error = %e, "site settings preload failed");
        }
        if let Err(e) = orders {
            tracing::warn!(error = %e, "online orders preload failed");
        }
        Ok(user)
    }

    pub fn logout(&self) -> ClientResult<()> {
        self.session.logout()
    }

    /// Route guard: the current session, or `Unauthorized` without a token
    pub fn require_session(&self) -> ClientResult<Session> {
        let session = self.session.session();
        if session.is_authenticated() {
            Ok(session)
        } else {
            Err(ClientError::Unauthorized(None))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ADMIN_PASSWORD, ADMIN_USERNAME, FakeBackend, SEED_TOKEN};
    use serde_json::json;
    use shared::models::Channel;

    fn app(backend: &FakeBackend, tokens: Arc<MemoryTokenStore>) -> AppState {
        let config = ClientConfig::new("http://admin.test/api");
        AppState::with_http(config, backend.client(tokens.clone()), tokens)
    }

    #[tokio::test]
    async fn test_login_preloads_settings_and_orders() {
        let backend = FakeBackend::seeded();
        let state = app(&backend, Arc::new(MemoryTokenStore::new()));
        assert!(state.require_session().is_err());

        state.login(ADMIN_USERNAME, ADMIN_PASSWORD).await.unwrap();
        assert_eq!(state.settings.current().site_name, "Nutty Basket");
        assert_eq!(state.sales.by_channel(Channel::Online).len(), 2);
        assert!(state.require_session().unwrap().user.is_some());
    }

    #[tokio::test]
    async fn test_preload_failure_does_not_fail_login() {
        let backend = FakeBackend::seeded();
        backend.break_route("/settings", 500, json!({"message": "boom"}));
        let state = app(&backend, Arc::new(MemoryTokenStore::new()));

        let user = state.login(ADMIN_USERNAME, ADMIN_PASSWORD).await.unwrap();
        assert_eq!(user.username, ADMIN_USERNAME);
        assert!(!state.settings.is_loaded());
        assert_eq!(state.sales.len(), 2);
    }

    #[tokio::test]
    async fn test_bootstrap_restores_session() {
        let backend = FakeBackend::seeded();
        let state = app(&backend, Arc::new(MemoryTokenStore::with_token(SEED_TOKEN)));

        let user = state.bootstrap().await;
        assert_eq!(user.map(|u| u.name).as_deref(), Some("Store Admin"));
        assert!(state.settings.is_loaded());
        assert!(state.require_session().is_ok());
    }

    #[tokio::test]
    async fn test_logout_closes_the_guard() {
        let backend = FakeBackend::seeded();
        let state = app(&backend, Arc::new(MemoryTokenStore::new()));
        state.login(ADMIN_USERNAME, ADMIN_PASSWORD).await.unwrap();
        state.logout().unwrap();

        let err = state.require_session().unwrap_err();
        assert_eq!(err.status(), Some(401));
    }
}
