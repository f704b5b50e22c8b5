//! Unified error system for the back-office client
//!
//! - [`ErrorCode`]: Standardized error codes for all failure kinds
//! - [`ErrorCategory`]: Classification of errors by range
//! - [`AppError`]: Application-level failure with code, message and details
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Transport errors
//! - 2xxx: HTTP errors
//! - 3xxx: Authentication errors
//! - 4xxx: Application errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::OperationFailed);
//! let err = AppError::operation_failed(Some("GST rate already exists".into()))
//!     .with_detail("field", "percentage");
//! assert_eq!(err.code, ErrorCode::OperationFailed);
//! ```

mod category;
mod codes;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult};
