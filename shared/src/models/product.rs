//! Product Model

use super::RecordId;
use crate::request::{FilePart, FormPayload};
use serde::{Deserialize, Serialize};

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: RecordId,
    pub name: String,
    pub price: f64,
    /// Net weight in grams
    pub grams: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_price: Option<f64>,
    pub image_url: String,
    /// Category display name (or id when only an id was sent)
    pub category: String,
}

impl Product {
    /// Price the customer pays: discount price when set, else price minus
    /// discount amount, never below zero
    pub fn effective_price(&self) -> f64 {
        if let Some(p) = self.discount_price.filter(|p| *p > 0.0) {
            return p;
        }
        let discount = self.discount_amount.unwrap_or(0.0);
        (self.price - discount).max(0.0)
    }
}

/// Create/update product payload
#[derive(Debug, Clone, Default)]
pub struct ProductDraft {
    pub name: String,
    pub price: f64,
    pub grams: Option<f64>,
    pub discount_amount: Option<f64>,
    pub discount_price: Option<f64>,
    pub category_id: Option<String>,
    pub image: Option<FilePart>,
}

impl From<ProductDraft> for FormPayload {
    fn from(draft: ProductDraft) -> Self {
        FormPayload::new()
            .text("name", draft.name)
            .text("price", draft.price.to_string())
            .text_opt("grams", draft.grams)
            .text_opt("discount_amount", draft.discount_amount)
            .text_opt("discount_price", draft.discount_price)
            .text_opt("category_id", draft.category_id)
            .file_opt(draft.image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price: f64, amount: Option<f64>, discounted: Option<f64>) -> Product {
        Product {
            id: RecordId::server("1"),
            name: "Almonds".into(),
            price,
            grams: 500.0,
            discount_amount: amount,
            discount_price: discounted,
            image_url: String::new(),
            category: "Dry Fruits".into(),
        }
    }

    #[test]
    fn test_effective_price() {
        assert_eq!(product(500.0, None, None).effective_price(), 500.0);
        assert_eq!(product(500.0, Some(50.0), None).effective_price(), 450.0);
        assert_eq!(product(500.0, Some(50.0), Some(420.0)).effective_price(), 420.0);
        assert_eq!(product(40.0, Some(50.0), None).effective_price(), 0.0);
    }

    #[test]
    fn test_draft_to_form() {
        let form: FormPayload = ProductDraft {
            name: "Cashew".into(),
            price: 899.0,
            grams: Some(250.0),
            category_id: Some("3".into()),
            ..Default::default()
        }
        .into();
        assert_eq!(form.field("name"), Some("Cashew"));
        assert_eq!(form.field("price"), Some("899"));
        assert_eq!(form.field("category_id"), Some("3"));
        assert_eq!(form.field("discount_price"), None);
    }
}
