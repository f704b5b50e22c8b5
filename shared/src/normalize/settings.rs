use super::NormalizeContext;
use super::media::media_field;
use super::value::{pick_record, string_of, string_or};
use crate::models::SiteSettings;
use serde_json::{Map, Value};

const WRAPPERS: &[&str] = &["data", "settings", "setting", "site_settings", "result"];

const SITE_NAME: &[&str] = &["site_name", "siteName", "app_name", "title", "name"];
const EMAIL: &[&str] = &["email", "site_email", "contact_email"];
const PHONE: &[&str] = &["phone", "mobile", "contact_phone", "phone_number"];
const ALT_PHONE: &[&str] = &["altphone", "alt_phone", "alternate_phone", "phone2"];
const WHATSAPP: &[&str] = &["whatsappnumber", "whatsapp_number", "whatsapp"];
const ADDRESS: &[&str] = &["address", "site_address"];
const LOGO: &[&str] = &["logo_url", "logoUrl", "logo", "site_logo"];
const FAVICON: &[&str] = &["favicon_url", "faviconUrl", "favicon"];

/// Normalize a settings payload into the full singleton record
///
/// Accepts a plain object, any of the usual wrappers, or a list of
/// `{key, value}` rows which is folded into one object first.
pub fn normalize_settings(raw: &Value, ctx: &NormalizeContext) -> SiteSettings {
    let object = settings_object(raw);
    let source = &object;
    SiteSettings {
        site_name: string_or(source, SITE_NAME, ""),
        email: string_or(source, EMAIL, ""),
        phone: string_or(source, PHONE, ""),
        altphone: string_or(source, ALT_PHONE, ""),
        whatsappnumber: string_or(source, WHATSAPP, ""),
        address: string_or(source, ADDRESS, ""),
        logo_url: media_field(source, LOGO, ctx),
        favicon_url: media_field(source, FAVICON, ctx),
        raw: object,
    }
}

fn settings_object(raw: &Value) -> Value {
    let rows = match raw {
        Value::Array(rows) => Some(rows),
        _ => WRAPPERS
            .iter()
            .find_map(|key| raw.get(*key).and_then(Value::as_array)),
    };
    match rows {
        Some(rows) if rows.len() == 1 && is_settings_record(&rows[0]) => rows[0].clone(),
        Some(rows) => fold_rows(rows),
        None => pick_record(raw, WRAPPERS).clone(),
    }
}

/// A single row that already is the settings record (not a key/value pair)
fn is_settings_record(row: &Value) -> bool {
    row.is_object() && row.get("key").is_none() && row.get("value").is_none()
}

fn fold_rows(rows: &[Value]) -> Value {
    let mut map = Map::new();
    for row in rows {
        let key = row
            .get("key")
            .or_else(|| row.get("name"))
            .and_then(string_of);
        if let Some(key) = key {
            map.insert(key, row.get("value").cloned().unwrap_or(Value::Null));
        }
    }
    Value::Object(map)
}
