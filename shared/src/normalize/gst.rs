use super::value::{first_string, number_or, record_id};
use super::{Normalize, NormalizeContext};
use crate::models::GstRate;
use serde_json::Value;

const ID: &[&str] = &["id", "gst_id", "_id"];
const NAME: &[&str] = &["name", "title", "label", "gst_name"];
const PERCENTAGE: &[&str] = &["percentage", "percent", "rate", "gst", "gst_percentage", "value"];

impl Normalize for GstRate {
    const CONTAINERS: &'static [&'static str] = &["data", "gst", "gst_rates", "gsts", "rates", "rows"];
    const WRAPPERS: &'static [&'static str] = &["data", "gst", "gst_rate", "result"];

    fn normalize(raw: &Value, _ctx: &NormalizeContext) -> Self {
        let percentage = number_or(raw, PERCENTAGE, 0.0);
        GstRate {
            id: record_id(raw, ID),
            name: first_string(raw, NAME).unwrap_or_else(|| format!("GST {percentage}%")),
            percentage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_percentage_coercion() {
        let ctx = NormalizeContext::default();
        let g = GstRate::normalize(&json!({"id": 1, "name": "Standard", "percentage": "18%"}), &ctx);
        assert_eq!(g.percentage, 18.0);

        let g = GstRate::normalize(&json!({"id": 2, "rate": "exempt"}), &ctx);
        assert_eq!(g.percentage, 0.0);
        assert_eq!(g.name, "GST 0%");

        let g = GstRate::normalize(&json!({"id": 3, "percent": 12.5}), &ctx);
        assert_eq!(g.name, "GST 12.5%");
    }

    #[test]
    fn test_list_from_named_container() {
        let raw = json!({"status": true, "gst_rates": [{"id": 1, "percentage": 5}, {"id": 2, "percentage": 12}]});
        let list = GstRate::normalize_list(&raw, &NormalizeContext::default());
        assert_eq!(list.iter().map(|g| g.percentage).collect::<Vec<_>>(), vec![5.0, 12.0]);
    }
}
