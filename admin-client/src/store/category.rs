use super::{EntityStore, Resource};
use shared::models::Category;

impl Resource for Category {
    const ENTITY: &'static str = "category";
    const LIST_PATH: &'static str = "/admin/categories/show";
    const SHOW_PATH: &'static str = "/admin/categories/show/{id}";
    const CREATE_PATH: &'static str = "/admin/categories/store";
    const UPDATE_PATH: &'static str = "/admin/categories/update/{id}";
    const DELETE_PATH: &'static str = "/admin/categories/delete/{id}";
    const DELETE_VIA_POST: bool = true;
}

pub type CategoryStore = EntityStore<Category>;

impl EntityStore<Category> {
    pub fn find_by_name(&self, name: &str) -> Option<Category> {
        let wanted = name.trim();
        self.items()
            .into_iter()
            .find(|c| c.category.eq_ignore_ascii_case(wanted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeBackend;
    use shared::models::CategoryDraft;
    use shared::normalize::PLACEHOLDER_SERVICE;
    use shared::request::Filters;

    #[tokio::test]
    async fn test_fetch_resolves_images_and_counts() {
        let backend = FakeBackend::seeded();
        let store: CategoryStore = backend.store();
        store.fetch(&Filters::new()).await.unwrap();

        let dry = store.find_by_name("Dry Fruits").unwrap();
        assert_eq!(dry.image_url, "http://admin.test/storage/categories/dry.png");
        assert_eq!(dry.product_count, 2);

        let seeds = store.find_by_name("seeds").unwrap();
        assert_eq!(seeds.image_url, format!("{PLACEHOLDER_SERVICE}Seeds"));
        assert_eq!(seeds.product_count, 0);
    }

    #[tokio::test]
    async fn test_create_without_echo_refreshes() {
        let backend = FakeBackend::seeded();
        let store: CategoryStore = backend.store();
        store.fetch(&Filters::new()).await.unwrap();

        let created = store
            .create(CategoryDraft { name: "Dates".into(), image: None })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(created.category, "Dates");
        assert!(store.find_by_name("dates").is_some());
        assert_eq!(store.len(), 3);
    }

    #[tokio::test]
    async fn test_create_without_echo_outside_current_page() {
        let backend = FakeBackend::seeded();
        let store: CategoryStore = backend.store();
        store.fetch(&Filters::new().page(2).per_page(1)).await.unwrap();
        assert_eq!(store.items()[0].category, "Seeds");

        // the new category lands on page 1, pushing Dry Fruits onto page 2
        let created = store
            .create(CategoryDraft { name: "Dates".into(), image: None })
            .await
            .unwrap();
        assert!(created.is_none());
        assert!(store.last_error().is_none());
        assert_eq!(store.items()[0].category, "Dry Fruits");

        store.fetch(&Filters::new()).await.unwrap();
        assert!(store.find_by_name("dates").is_some());
    }

    #[tokio::test]
    async fn test_rejected_create_and_delete_leave_collection() {
        let backend = FakeBackend::seeded();
        let store: CategoryStore = backend.store();
        store.fetch(&Filters::new()).await.unwrap();
        let before = store.items();

        backend.respond_next(200, serde_json::json!({"success": false, "message": "Category exists"}));
        let err = store
            .create(CategoryDraft { name: "Seeds".into(), image: None })
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Category exists");
        assert_eq!(store.items(), before);

        backend.respond_next(200, serde_json::json!({"success": false, "message": "Category in use"}));
        let err = store.delete("1").await.unwrap_err();
        assert_eq!(err.user_message(), "Category in use");
        assert!(store.find_by_name("dry fruits").is_some());
        assert_eq!(store.items(), before);
        assert_eq!(store.last_error().as_deref(), Some("Category in use"));
    }

    #[tokio::test]
    async fn test_delete_is_posted() {
        let backend = FakeBackend::seeded();
        let store: CategoryStore = backend.store();
        store.fetch(&Filters::new()).await.unwrap();
        store.delete("2").await.unwrap();
        assert!(store.find_by_name("seeds").is_none());
        assert!(backend.requests().iter().any(|r| r == "POST /admin/categories/delete/2"));
    }
}
