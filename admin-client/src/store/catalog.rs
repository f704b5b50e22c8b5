//! Variation, attribute and variant management

use super::{EntityStore, Resource};
use shared::models::{Attribute, Variant, Variation};

impl Resource for Variation {
    const ENTITY: &'static str = "variation";
    const LIST_PATH: &'static str = "/admin/variation";
    const SHOW_PATH: &'static str = "/admin/variation/{id}";
    const CREATE_PATH: &'static str = "/admin/variation/store";
    const UPDATE_PATH: &'static str = "/admin/variation/update/{id}";
    const DELETE_PATH: &'static str = "/admin/variation/delete/{id}";
}

impl Resource for Attribute {
    const ENTITY: &'static str = "attribute";
    const LIST_PATH: &'static str = "/admin/attributes";
    const SHOW_PATH: &'static str = "/admin/attributes/{id}";
    const CREATE_PATH: &'static str = "/admin/attributes/store";
    const UPDATE_PATH: &'static str = "/admin/attributes/update/{id}";
    const DELETE_PATH: &'static str = "/admin/attributes/delete/{id}";
}

impl Resource for Variant {
    const ENTITY: &'static str = "variant";
    const LIST_PATH: &'static str = "/admin/variants";
    const SHOW_PATH: &'static str = "/admin/variants/{id}";
    const CREATE_PATH: &'static str = "/admin/variants/store";
    const UPDATE_PATH: &'static str = "/admin/variants/update/{id}";
    const DELETE_PATH: &'static str = "/admin/variants/delete/{id}";
}

pub type VariationStore = EntityStore<Variation>;
pub type AttributeStore = EntityStore<Attribute>;
pub type VariantStore = EntityStore<Variant>;

impl EntityStore<Attribute> {
    pub fn for_variation(&self, variation_id: &str) -> Vec<Attribute> {
        self.items()
            .into_iter()
            .filter(|a| a.variation_id.as_deref() == Some(variation_id.trim()))
            .collect()
    }
}

impl EntityStore<Variant> {
    pub fn for_product(&self, product_id: &str) -> Vec<Variant> {
        self.items()
            .into_iter()
            .filter(|v| v.product_id.as_deref() == Some(product_id.trim()))
            .collect()
    }

    /// Units in stock across the loaded variants of a product
    pub fn stock_for_product(&self, product_id: &str) -> f64 {
        self.for_product(product_id).iter().map(|v| v.stock).sum()
    }
}
