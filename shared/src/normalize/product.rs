use super::media::resolve_image;
use super::value::{first_string, number_or, optional_number, record_id, string_or};
use super::{Normalize, NormalizeContext};
use crate::models::Product;
use serde_json::Value;

const ID: &[&str] = &["id", "product_id", "_id"];
const NAME: &[&str] = &["name", "product_name", "title"];
const PRICE: &[&str] = &["price", "selling_price", "mrp", "amount"];
const GRAMS: &[&str] = &["grams", "weight", "gram", "weight_grams"];
const DISCOUNT_AMOUNT: &[&str] = &["discount_amount", "discount"];
const DISCOUNT_PRICE: &[&str] = &["discount_price", "sale_price", "offer_price"];
const CATEGORY: &[&str] = &[
    "category_name",
    "category.category",
    "category.name",
    "category",
    "category_id",
];

impl Normalize for Product {
    const CONTAINERS: &'static [&'static str] = &["data", "products", "rows", "items", "result"];
    const WRAPPERS: &'static [&'static str] = &["data", "product", "result"];

    fn normalize(raw: &Value, ctx: &NormalizeContext) -> Self {
        let name = string_or(raw, NAME, "Unnamed product");
        Product {
            id: record_id(raw, ID),
            image_url: resolve_image(raw, &name, ctx),
            price: number_or(raw, PRICE, 0.0),
            grams: number_or(raw, GRAMS, 0.0),
            discount_amount: optional_number(raw, DISCOUNT_AMOUNT),
            discount_price: optional_number(raw, DISCOUNT_PRICE),
            category: first_string(raw, CATEGORY).unwrap_or_default(),
            name,
        }
    }
}
