use super::{EntityStore, Resource};
use shared::models::Product;

impl Resource for Product {
    const ENTITY: &'static str = "product";
    const LIST_PATH: &'static str = "/admin/products/show";
    const SHOW_PATH: &'static str = "/admin/products/show/{id}";
    const CREATE_PATH: &'static str = "/admin/products/store";
    const UPDATE_PATH: &'static str = "/admin/products/update/{id}";
    const DELETE_PATH: &'static str = "/admin/products/delete/{id}";
}

pub type ProductStore = EntityStore<Product>;

impl EntityStore<Product> {
    /// Loaded products whose category name matches, ignoring case
    pub fn in_category(&self, category: &str) -> Vec<Product> {
        let wanted = category.trim();
        self.items()
            .into_iter()
            .filter(|p| p.category.eq_ignore_ascii_case(wanted))
            .collect()
    }
}
