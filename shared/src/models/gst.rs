//! GST Rate Model

use super::RecordId;
use crate::request::FormPayload;
use serde::{Deserialize, Serialize};

/// GST (tax) rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GstRate {
    pub id: RecordId,
    pub name: String,
    /// Rate in percent (e.g. 18 = 18%)
    pub percentage: f64,
}

impl GstRate {
    /// Tax amount for a taxable value, rounded to paise
    pub fn tax_on(&self, taxable: f64) -> f64 {
        (taxable * self.percentage / 100.0 * 100.0).round() / 100.0
    }
}

/// Create/update GST payload
#[derive(Debug, Clone, Default)]
pub struct GstRateDraft {
    pub name: String,
    pub percentage: f64,
}

impl From<GstRateDraft> for FormPayload {
    fn from(draft: GstRateDraft) -> Self {
        FormPayload::new()
            .text("name", draft.name)
            .text("percentage", draft.percentage.to_string())
    }
}
