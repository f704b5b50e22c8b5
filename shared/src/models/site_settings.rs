//! Site settings singleton

use crate::request::{FilePart, FormPayload};
use serde::{Deserialize, Serialize};

/// Branding and contact settings shown in the dashboard chrome
///
/// Replaced as a whole on every fetch; `raw` keeps the payload it was
/// normalized from for fields the dashboard does not model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteSettings {
    pub site_name: String,
    pub email: String,
    pub phone: String,
    pub altphone: String,
    pub whatsappnumber: String,
    pub address: String,
    pub logo_url: String,
    pub favicon_url: String,
    #[serde(default)]
    pub raw: serde_json::Value,
}

/// Settings update payload
#[derive(Debug, Clone, Default)]
pub struct SettingsDraft {
    pub site_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub altphone: Option<String>,
    pub whatsappnumber: Option<String>,
    pub address: Option<String>,
    pub logo: Option<FilePart>,
    pub favicon: Option<FilePart>,
}

impl From<SettingsDraft> for FormPayload {
    fn from(draft: SettingsDraft) -> Self {
        FormPayload::new()
            .text_opt("site_name", draft.site_name)
            .text_opt("email", draft.email)
            .text_opt("phone", draft.phone)
            .text_opt("altphone", draft.altphone)
            .text_opt("whatsappnumber", draft.whatsappnumber)
            .text_opt("address", draft.address)
            .file_opt(draft.logo)
            .file_opt(draft.favicon)
    }
}
