use super::value::{
    first_present, first_string, number_or, optional_number, pick_array, record_id, string_of,
    string_or,
};
use super::{Normalize, NormalizeContext};
use crate::models::{Channel, Sale, SaleItem};
use serde_json::Value;

const ID: &[&str] = &["id", "order_id", "sale_id", "_id", "order_no", "invoice_no"];
const DATE: &[&str] = &["created_at", "date", "order_date", "createdAt", "sale_date", "updated_at"];
const AMOUNT: &[&str] = &[
    "total",
    "amount",
    "grand_total",
    "total_amount",
    "final_total",
    "net_amount",
    "payable_amount",
];
const STATUS: &[&str] = &["status", "order_status", "payment_status"];
const CHANNEL: &[&str] = &["channel", "source", "order_type", "type"];
const CUSTOMER_NAME: &[&str] = &[
    "customer_name",
    "customerName",
    "customer.name",
    "user.name",
    "billing_name",
    "name",
];
const CUSTOMER_PHONE: &[&str] = &[
    "customer_phone",
    "customerPhone",
    "customer.phone",
    "user.phone",
    "billing_phone",
    "phone",
    "mobile",
];
const PAYMENT: &[&str] = &["payment_method", "payment", "payment_mode", "payment_type", "method"];
const ADDRESS: &[&str] = &["address", "shipping_address", "delivery_address", "customer.address"];
const ADDRESS_PARTS: &[&str] = &[
    "line1",
    "address_line1",
    "line2",
    "address_line2",
    "address",
    "street",
    "area",
    "landmark",
    "city",
    "state",
    "pincode",
    "zip",
];
const SUBTOTAL: &[&str] = &["subtotal", "sub_total", "items_total"];
const GST_PERCENT: &[&str] = &["gst_percent", "gst_rate", "gst", "tax_percent", "tax_rate"];
const GST_AMOUNT: &[&str] = &["gst_amount", "tax_amount", "tax", "gst_value"];
const DISCOUNT_TYPE: &[&str] = &["discount_type", "discountType"];
const DISCOUNT_VALUE: &[&str] = &["discount_value", "discount", "discount_amount"];

/// Candidate item containers, in priority order
pub const ITEM_CONTAINERS: &[&str] = &["items", "order_items", "products", "lines", "details", "cart"];

const ITEM_PRODUCT_ID: &[&str] = &["product_id", "productId", "product.id", "id"];
const ITEM_NAME: &[&str] = &["name", "product_name", "title", "product.name"];
const ITEM_QTY: &[&str] = &["qty", "quantity", "count"];
const ITEM_PRICE: &[&str] = &["price", "unit_price", "rate", "selling_price", "product.price"];
const ITEM_TOTAL: &[&str] = &["total", "line_total", "subtotal", "amount", "total_price"];

impl Normalize for Sale {
    const CONTAINERS: &'static [&'static str] =
        &["data", "orders", "sales", "pos_orders", "rows", "items", "result"];
    const WRAPPERS: &'static [&'static str] = &["data", "order", "sale", "result"];

    fn normalize(raw: &Value, ctx: &NormalizeContext) -> Self {
        let channel = ctx
            .channel()
            .or_else(|| first_string(raw, CHANNEL).and_then(|l| Channel::from_label(&l)))
            .unwrap_or(Channel::Online);

        let items = items_of(raw);
        let subtotal = optional_number(raw, SUBTOTAL)
            .unwrap_or_else(|| items.iter().map(SaleItem::line_total).sum());
        let gst_percent = number_or(raw, GST_PERCENT, 0.0);
        let gst_amount = optional_number(raw, GST_AMOUNT).unwrap_or(subtotal * gst_percent / 100.0);
        let discount_type = first_string(raw, DISCOUNT_TYPE);
        let discount_value = number_or(raw, DISCOUNT_VALUE, 0.0);
        let amount = optional_number(raw, AMOUNT).unwrap_or_else(|| {
            let discount = match discount_type.as_deref() {
                Some(t) if t.eq_ignore_ascii_case("percent") || t.eq_ignore_ascii_case("percentage") => {
                    subtotal * discount_value / 100.0
                }
                _ => discount_value,
            };
            (subtotal + gst_amount - discount).max(0.0)
        });

        let (default_status, default_customer) = match channel {
            Channel::Online => ("pending", "Guest"),
            Channel::Offline => ("completed", "Walk-in Customer"),
        };

        Sale {
            id: record_id(raw, ID),
            date: string_or(raw, DATE, ""),
            amount: finite(amount),
            status: string_or(raw, STATUS, default_status),
            channel,
            customer_name: string_or(raw, CUSTOMER_NAME, default_customer),
            customer_phone: string_or(raw, CUSTOMER_PHONE, ""),
            payment: string_or(raw, PAYMENT, "unknown"),
            address: address_of(raw),
            items,
            subtotal: finite(subtotal),
            gst_percent,
            gst_amount: finite(gst_amount),
            discount_type,
            discount_value,
        }
    }
}

fn finite(n: f64) -> f64 {
    if n.is_finite() { n } else { 0.0 }
}

/// Items from the first candidate container that yields a non-empty list
///
/// A container may hold an array, a JSON-encoded string of one, an object
/// wrapping one (`{items: [...]}`), or an object keyed by line id.
pub fn items_of(raw: &Value) -> Vec<SaleItem> {
    for key in ITEM_CONTAINERS {
        let Some(container) = raw.get(*key) else {
            continue;
        };
        let owned = match container {
            Value::String(encoded) => match serde_json::from_str::<Value>(encoded) {
                Ok(decoded) => decoded,
                Err(_) => continue,
            },
            other => other.clone(),
        };
        let entries: Vec<&Value> = match &owned {
            Value::Array(list) => list.iter().filter(|v| v.is_object()).collect(),
            Value::Object(map) => match pick_array(&owned, &["items", "data", "lines"]) {
                Some(list) => list.iter().filter(|v| v.is_object()).collect(),
                None => map.values().filter(|v| v.is_object()).collect(),
            },
            _ => continue,
        };
        if !entries.is_empty() {
            return entries.into_iter().map(normalize_item).collect();
        }
    }
    Vec::new()
}

/// Normalize one line; unit price is back-computed from the line total
/// when not sent directly
pub fn normalize_item(raw: &Value) -> SaleItem {
    let qty = number_or(raw, ITEM_QTY, 1.0);
    let price = optional_number(raw, ITEM_PRICE).unwrap_or_else(|| {
        let total = number_or(raw, ITEM_TOTAL, 0.0);
        if qty != 0.0 { total / qty } else { 0.0 }
    });
    SaleItem {
        product_id: first_string(raw, ITEM_PRODUCT_ID),
        name: string_or(raw, ITEM_NAME, "Item"),
        qty,
        price: finite(price),
    }
}

fn address_of(raw: &Value) -> String {
    match first_present(raw, ADDRESS) {
        Some(address @ Value::Object(_)) => ADDRESS_PARTS
            .iter()
            .filter_map(|key| address.get(*key).and_then(string_of))
            .collect::<Vec<_>>()
            .join(", "),
        Some(other) => string_of(other).unwrap_or_default(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordId;
    use serde_json::json;

    #[test]
    fn test_back_computed_item_price() {
        let raw = json!({"id": 5, "total": "2,500", "items": [{"name": "A", "qty": 2, "total": 400}]});
        let sale = Sale::normalize(&raw, &NormalizeContext::default());
        assert_eq!(sale.id, RecordId::server("5"));
        assert_eq!(sale.amount, 2500.0);
        assert_eq!(sale.items.len(), 1);
        assert_eq!(sale.items[0].price, 200.0);
        assert_eq!(sale.items[0].qty, 2.0);
    }

    #[test]
    fn test_first_non_empty_container_wins() {
        let raw = json!({
            "id": 1,
            "items": [],
            "order_items": "[{\"product_name\": \"Dates\", \"quantity\": \"3\", \"price\": \"₹150\"}]",
            "products": [{"name": "ignored"}]
        });
        let sale = Sale::normalize(&raw, &NormalizeContext::default());
        assert_eq!(sale.items.len(), 1);
        assert_eq!(sale.items[0].name, "Dates");
        assert_eq!(sale.items[0].qty, 3.0);
        assert_eq!(sale.items[0].price, 150.0);
    }

    #[test]
    fn test_cart_object_wrapper() {
        let raw = json!({"id": 1, "cart": {"items": [{"name": "Raisins", "qty": 1, "price": 90}]}});
        let sale = Sale::normalize(&raw, &NormalizeContext::default());
        assert_eq!(sale.items[0].name, "Raisins");
    }

    #[test]
    fn test_derived_totals_when_absent() {
        let raw = json!({
            "id": 2,
            "gst_percent": 5,
            "discount_type": "flat",
            "discount_value": "10",
            "items": [{"name": "A", "qty": 2, "price": 100}]
        });
        let sale = Sale::normalize(&raw, &NormalizeContext::default());
        assert_eq!(sale.subtotal, 200.0);
        assert_eq!(sale.gst_amount, 10.0);
        assert_eq!(sale.amount, 200.0);
        assert_eq!(sale.discount_type.as_deref(), Some("flat"));
    }

    #[test]
    fn test_channel_defaults_and_hint() {
        let raw = json!({"id": 3, "source": "pos"});
        let sale = Sale::normalize(&raw, &NormalizeContext::default());
        assert_eq!(sale.channel, Channel::Offline);
        assert_eq!(sale.status, "completed");
        assert_eq!(sale.customer_name, "Walk-in Customer");

        let ctx = NormalizeContext::default().for_channel(Channel::Online);
        let sale = Sale::normalize(&raw, &ctx);
        assert_eq!(sale.channel, Channel::Online);
        assert_eq!(sale.status, "pending");
    }

    #[test]
    fn test_address_object_joined() {
        let raw = json!({"id": 4, "shipping_address": {"line1": "12 MG Road", "city": "Pune", "pincode": 411001}});
        let sale = Sale::normalize(&raw, &NormalizeContext::default());
        assert_eq!(sale.address, "12 MG Road, Pune, 411001");
    }

    #[test]
    fn test_garbage_numbers_are_zero() {
        let raw = json!({"id": 6, "total": "N/A", "gst_amount": {}, "items": [{"name": "A", "qty": 0, "total": 50}]});
        let sale = Sale::normalize(&raw, &NormalizeContext::default());
        assert_eq!(sale.amount, 0.0);
        assert_eq!(sale.gst_amount, 0.0);
        assert_eq!(sale.items[0].price, 0.0);
    }
}
