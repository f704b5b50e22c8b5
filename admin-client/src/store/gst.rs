use super::{EntityStore, Resource};
use shared::models::GstRate;

impl Resource for GstRate {
    const ENTITY: &'static str = "gst_rate";
    const LIST_PATH: &'static str = "/admin/settings/gst/show";
    const SHOW_PATH: &'static str = "/admin/settings/gst/show/{id}";
    const CREATE_PATH: &'static str = "/admin/settings/gst/store";
    const UPDATE_PATH: &'static str = "/admin/settings/gst/update/{id}";
    const DELETE_PATH: &'static str = "/admin/settings/gst/delete/{id}";
}

pub type GstStore = EntityStore<GstRate>;

impl EntityStore<GstRate> {
    /// Loaded rates ordered by percentage, for pickers
    pub fn sorted_by_rate(&self) -> Vec<GstRate> {
        let mut rates = self.items();
        rates.sort_by(|a, b| a.percentage.total_cmp(&b.percentage));
        rates
    }
}
