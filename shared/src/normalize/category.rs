use super::media::resolve_image;
use super::value::{first_present, first_string, record_id, string_or, to_number};
use super::{Normalize, NormalizeContext};
use crate::models::Category;
use serde_json::Value;

const ID: &[&str] = &["id", "category_id", "_id"];
const NAME: &[&str] = &["category", "name", "category_name", "title"];
const CREATED_AT: &[&str] = &["created_at", "createdAt"];
const PRODUCT_COUNT: &[&str] = &["productCount", "product_count", "products_count", "count"];

impl Normalize for Category {
    const CONTAINERS: &'static [&'static str] = &["data", "categories", "rows", "items", "result"];
    const WRAPPERS: &'static [&'static str] = &["data", "category", "result"];

    fn normalize(raw: &Value, ctx: &NormalizeContext) -> Self {
        let name = string_or(raw, NAME, "");
        Category {
            id: record_id(raw, ID),
            image_url: resolve_image(raw, &name, ctx),
            created_at: first_string(raw, CREATED_AT),
            product_count: product_count(raw),
            category: name,
        }
    }
}

/// Declared count, else the length of an embedded product list, else 0
fn product_count(raw: &Value) -> u64 {
    if let Some(count) = first_present(raw, PRODUCT_COUNT) {
        let n = to_number(count);
        return if n > 0.0 { n.round() as u64 } else { 0 };
    }
    raw.get("products")
        .and_then(Value::as_array)
        .map(|products| products.len() as u64)
        .unwrap_or(0)
}
