//! Shared types for the admin client
//!
//! Canonical records, the response normalizers that produce them, request
//! payload types, envelope helpers and the error taxonomy used across the
//! workspace.

pub mod client;
pub mod error;
pub mod models;
pub mod normalize;
pub mod request;
pub mod response;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use normalize::{Normalize, NormalizeContext};
pub use request::{FilePart, Filters, FormPayload};
pub use response::Pagination;
