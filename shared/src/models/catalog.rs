//! Variation / attribute / variant models

use super::RecordId;
use crate::request::{FilePart, FormPayload};
use serde::{Deserialize, Serialize};

/// Variation axis, e.g. "Weight" with values ["250g", "500g"]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variation {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub values: Vec<String>,
}

/// One value on a variation axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub id: RecordId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variation_id: Option<String>,
    pub value: String,
}

/// Sellable variant of a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub id: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    pub name: String,
    pub sku: String,
    pub price: f64,
    pub stock: f64,
    /// Attribute values describing this variant
    #[serde(default)]
    pub attributes: Vec<String>,
    pub image_url: String,
}

#[derive(Debug, Clone, Default)]
pub struct VariationDraft {
    pub name: String,
    pub values: Vec<String>,
}

impl From<VariationDraft> for FormPayload {
    fn from(draft: VariationDraft) -> Self {
        let mut form = FormPayload::new().text("name", draft.name);
        for value in draft.values {
            form = form.text("values[]", value);
        }
        form
    }
}

#[derive(Debug, Clone, Default)]
pub struct AttributeDraft {
    pub name: String,
    pub variation_id: Option<String>,
    pub value: String,
}

impl From<AttributeDraft> for FormPayload {
    fn from(draft: AttributeDraft) -> Self {
        FormPayload::new()
            .text("name", draft.name)
            .text_opt("variation_id", draft.variation_id)
            .text("value", draft.value)
    }
}

#[derive(Debug, Clone, Default)]
pub struct VariantDraft {
    pub product_id: String,
    pub name: String,
    pub sku: Option<String>,
    pub price: f64,
    pub stock: Option<f64>,
    pub attribute_ids: Vec<String>,
    pub image: Option<FilePart>,
}

impl From<VariantDraft> for FormPayload {
    fn from(draft: VariantDraft) -> Self {
        let mut form = FormPayload::new()
            .text("product_id", draft.product_id)
            .text("name", draft.name)
            .text_opt("sku", draft.sku)
            .text("price", draft.price.to_string())
            .text_opt("stock", draft.stock);
        for id in draft.attribute_ids {
            form = form.text("attribute_ids[]", id);
        }
        form.file_opt(draft.image)
    }
}
