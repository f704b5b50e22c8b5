use super::media::resolve_image;
use super::value::{first_string, number_or, record_id, string_of, string_or};
use super::{Normalize, NormalizeContext};
use crate::models::{Attribute, Variant, Variation};
use serde_json::Value;

const ID: &[&str] = &["id", "_id"];

/// Strings out of a list of scalars or `{value|name}` objects, or a
/// comma-separated string
fn string_list(raw: Option<&Value>) -> Vec<String> {
    match raw {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| {
                string_of(item).or_else(|| first_string(item, &["value", "name", "attribute_value"]))
            })
            .collect(),
        Some(Value::String(joined)) => joined
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        _ => Vec::new(),
    }
}

impl Normalize for Variation {
    const CONTAINERS: &'static [&'static str] = &["data", "variations", "rows", "items"];
    const WRAPPERS: &'static [&'static str] = &["data", "variation", "result"];

    fn normalize(raw: &Value, _ctx: &NormalizeContext) -> Self {
        let values = ["values", "attributes", "options"]
            .iter()
            .map(|key| string_list(raw.get(*key)))
            .find(|list| !list.is_empty())
            .unwrap_or_default();
        Variation {
            id: record_id(raw, ID),
            name: string_or(raw, &["name", "variation", "variation_name", "title"], ""),
            values,
        }
    }
}

impl Normalize for Attribute {
    const CONTAINERS: &'static [&'static str] = &["data", "attributes", "rows", "items"];
    const WRAPPERS: &'static [&'static str] = &["data", "attribute", "result"];

    fn normalize(raw: &Value, _ctx: &NormalizeContext) -> Self {
        let value = string_or(raw, &["value", "attribute_value", "name"], "");
        Attribute {
            id: record_id(raw, ID),
            name: first_string(
                raw,
                &["variation.name", "variation_name", "attribute_name", "name"],
            )
            .unwrap_or_else(|| value.clone()),
            variation_id: first_string(raw, &["variation_id", "variationId", "variation.id"]),
            value,
        }
    }
}

impl Normalize for Variant {
    const CONTAINERS: &'static [&'static str] = &["data", "variants", "rows", "items"];
    const WRAPPERS: &'static [&'static str] = &["data", "variant", "result"];

    fn normalize(raw: &Value, ctx: &NormalizeContext) -> Self {
        let attributes = ["attributes", "attribute_values", "options"]
            .iter()
            .map(|key| string_list(raw.get(*key)))
            .find(|list| !list.is_empty())
            .unwrap_or_default();
        let name = first_string(raw, &["name", "variant_name", "title"])
            .unwrap_or_else(|| attributes.join(" / "));
        Variant {
            id: record_id(raw, ID),
            product_id: first_string(raw, &["product_id", "productId", "product.id"]),
            sku: string_or(raw, &["sku", "code", "barcode"], ""),
            price: number_or(raw, &["price", "selling_price", "mrp"], 0.0),
            stock: number_or(raw, &["stock", "quantity", "qty", "inventory"], 0.0),
            image_url: resolve_image(raw, &name, ctx),
            attributes,
            name,
        }
    }
}
