//! Sale / order row model

use super::RecordId;
use crate::request::FormPayload;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where an order originated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Online storefront
    Online,
    /// In-person point of sale
    Offline,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Online => "online",
            Channel::Offline => "offline",
        }
    }

    /// Interpret a loose channel/source label sent by the backend
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "online" | "web" | "website" | "app" | "storefront" => Some(Channel::Online),
            "offline" | "pos" | "store" | "counter" | "walk-in" | "walkin" => {
                Some(Channel::Offline)
            }
            _ => None,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of a sale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    pub name: String,
    pub qty: f64,
    /// Unit price
    pub price: f64,
}

impl SaleItem {
    pub fn line_total(&self) -> f64 {
        self.price * self.qty
    }
}

/// Normalized sale/order row
///
/// Every numeric field is finite after normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: RecordId,
    pub date: String,
    pub amount: f64,
    pub status: String,
    pub channel: Channel,
    #[serde(rename = "customerName")]
    pub customer_name: String,
    #[serde(rename = "customerPhone")]
    pub customer_phone: String,
    pub payment: String,
    pub address: String,
    pub items: Vec<SaleItem>,
    pub subtotal: f64,
    pub gst_percent: f64,
    pub gst_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_type: Option<String>,
    pub discount_value: f64,
}

/// Per-channel aggregate
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ChannelTotals {
    pub orders: usize,
    pub amount: f64,
}

/// Point-of-sale line submitted with a new offline sale
#[derive(Debug, Clone, PartialEq)]
pub struct PosLine {
    pub product_id: String,
    pub qty: f64,
    pub price: f64,
}

/// Payload for recording an offline (POS) sale
#[derive(Debug, Clone, Default)]
pub struct PosSaleDraft {
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub payment: String,
    pub lines: Vec<PosLine>,
    pub gst_percent: Option<f64>,
    /// `percent` or `flat`
    pub discount_type: Option<String>,
    pub discount_value: Option<f64>,
}

impl From<PosSaleDraft> for FormPayload {
    fn from(draft: PosSaleDraft) -> Self {
        let mut form = FormPayload::new()
            .text_opt("customer_name", draft.customer_name)
            .text_opt("customer_phone", draft.customer_phone)
            .text("payment_method", draft.payment)
            .text_opt("gst_percent", draft.gst_percent)
            .text_opt("discount_type", draft.discount_type)
            .text_opt("discount_value", draft.discount_value);
        for (i, line) in draft.lines.into_iter().enumerate() {
            form = form
                .text(format!("items[{i}][product_id]"), line.product_id)
                .text(format!("items[{i}][qty]"), line.qty.to_string())
                .text(format!("items[{i}][price]"), line.price.to_string());
        }
        form
    }
}
