//! Category Model

use super::RecordId;
use crate::request::{FilePart, FormPayload};
use serde::{Deserialize, Serialize};

/// Category entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: RecordId,
    /// Category name
    pub category: String,
    /// Always resolvable: explicit URL, resolved relative path, or placeholder
    pub image_url: String,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(rename = "productCount")]
    pub product_count: u64,
}

/// Create/update category payload
#[derive(Debug, Clone, Default)]
pub struct CategoryDraft {
    pub name: String,
    pub image: Option<FilePart>,
}

impl From<CategoryDraft> for FormPayload {
    fn from(draft: CategoryDraft) -> Self {
        FormPayload::new()
            .text("category", draft.name)
            .file_opt(draft.image)
    }
}
