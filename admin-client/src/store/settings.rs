//! Site settings singleton

use crate::ClientResult;
use crate::http::HttpClient;
use parking_lot::RwLock;
use shared::models::{SettingsDraft, SiteSettings};
use shared::normalize::{NormalizeContext, normalize_settings};
use shared::request::{Filters, FormPayload};
use std::fmt;
use std::sync::Arc;

const SHOW_PATH: &str = "/settings";
const UPDATE_PATH: &str = "/admin/settings/update";

/// Holds the branding/contact settings shown in the dashboard chrome
///
/// Starts out empty; every fetch replaces the whole record.
#[derive(Clone)]
pub struct SettingsStore {
    http: Arc<dyn HttpClient>,
    ctx: NormalizeContext,
    current: Arc<RwLock<SiteSettings>>,
}

impl fmt::Debug for SettingsStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsStore")
            .field("site_name", &self.current.read().site_name)
            .finish()
    }
}

impl SettingsStore {
    pub fn new(http: Arc<dyn HttpClient>, ctx: NormalizeContext) -> Self {
        Self {
            http,
            ctx,
            current: Arc::new(RwLock::new(SiteSettings::default())),
        }
    }

    pub fn current(&self) -> SiteSettings {
        self.current.read().clone()
    }

    /// Whether a fetch has populated the record yet
    pub fn is_loaded(&self) -> bool {
        !self.current.read().raw.is_null()
    }

    pub async fn fetch(&self) -> ClientResult<SiteSettings> {
        let payload = self.http.get(SHOW_PATH, &Filters::new()).await.inspect_err(|e| {
            tracing::warn!(error = %e, "settings fetch failed");
        })?;
        let settings = normalize_settings(&payload, &self.ctx);
        *self.current.write() = settings.clone();
        tracing::info!(site = %settings.site_name, "site settings loaded");
        Ok(settings)
    }

    /// Submit changed settings, then hold the server's full record
    ///
    /// When the response does not echo the settings they are re-fetched.
    pub async fn update(&self, draft: SettingsDraft) -> ClientResult<SiteSettings> {
        let form = FormPayload::from(draft);
        let payload = self.http.post_form(UPDATE_PATH, &form).await.inspect_err(|e| {
            tracing::warn!(error = %e, "settings update failed");
        })?;

        let echoed = normalize_settings(&payload, &self.ctx);
        if echoed.site_name.is_empty() {
            return self.fetch().await;
        }
        *self.current.write() = echoed.clone();
        tracing::info!(site = %echoed.site_name, "site settings updated");
        Ok(echoed)
    }
}
