//! Image URL resolution

use super::NormalizeContext;
use super::value::{first_string, lookup, string_of};
use crate::util::percent_encode;
use serde_json::Value;

/// External placeholder service, keyed by the record name
pub const PLACEHOLDER_SERVICE: &str = "https://placehold.co/400x300?text=";

/// Bundled placeholder asset used when nothing else is known
pub const STATIC_PLACEHOLDER: &str = "/images/placeholder.png";

/// Whether a path is already a complete URL
pub fn is_absolute(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    lower.starts_with("http://")
        || lower.starts_with("https://")
        || lower.starts_with("//")
        || lower.starts_with("data:")
}

/// Resolve a possibly-relative media path against the API origin
///
/// Without a known origin the relative path is returned unchanged.
pub fn resolve_media_url(origin: Option<&str>, path: &str) -> String {
    let path = path.trim();
    if is_absolute(path) {
        return path.to_string();
    }
    match origin {
        Some(origin) => format!(
            "{}/{}",
            origin.trim_end_matches('/'),
            path.trim_start_matches('/')
        ),
        None => path.to_string(),
    }
}

/// Optional media field (logo, favicon): resolved when present, empty otherwise
pub fn media_field(raw: &Value, paths: &[&str], ctx: &NormalizeContext) -> String {
    first_string(raw, paths)
        .map(|p| resolve_media_url(ctx.api_origin(), &p))
        .unwrap_or_default()
}

/// Image URL for a named record
///
/// 1. an absolute `image_url` / `imageUrl`
/// 2. an `image` path (or a relative `image_url`) resolved against the API origin
/// 3. the first entry of an `images` gallery
/// 4. the placeholder service keyed by `name`
/// 5. [`STATIC_PLACEHOLDER`]
pub fn resolve_image(raw: &Value, name: &str, ctx: &NormalizeContext) -> String {
    let explicit = ["image_url", "imageUrl"];
    if let Some(url) = explicit
        .iter()
        .filter_map(|key| lookup(raw, key).and_then(string_of))
        .find(|url| is_absolute(url))
    {
        return url;
    }

    if let Some(path) = first_string(raw, &["image", "image_url", "imageUrl", "thumbnail"]) {
        return resolve_media_url(ctx.api_origin(), &path);
    }

    if let Some(path) = raw
        .get("images")
        .and_then(Value::as_array)
        .and_then(|images| images.first())
        .and_then(|first| string_of(first).or_else(|| first_string(first, &["url", "path", "image"])))
    {
        return resolve_media_url(ctx.api_origin(), &path);
    }

    let name = name.trim();
    if !name.is_empty() {
        return format!("{}{}", PLACEHOLDER_SERVICE, percent_encode(name));
    }

    STATIC_PLACEHOLDER.to_string()
}
