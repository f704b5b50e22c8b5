//! Unified error codes for the back-office client
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Transport errors (no response received)
//! - 2xxx: HTTP errors (non-2xx status)
//! - 3xxx: Authentication errors
//! - 4xxx: Application errors (2xx status, payload signals failure)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so they can be shown
/// next to a notification or forwarded to a log aggregator unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Invalid client configuration
    InvalidConfig = 2,
    /// Local storage could not be read or written
    StorageFailed = 3,

    // ==================== 1xxx: Transport ====================
    /// Request could not be sent or no response arrived
    NetworkError = 1001,
    /// Request exceeded the configured timeout
    Timeout = 1002,

    // ==================== 2xxx: HTTP ====================
    /// Server rejected the request payload (400/422)
    BadRequest = 2001,
    /// Resource not found (404)
    NotFound = 2002,
    /// Permission denied (403)
    Forbidden = 2003,
    /// Server-side failure (5xx)
    ServerError = 2004,
    /// Any other non-2xx status
    HttpError = 2005,

    // ==================== 3xxx: Auth ====================
    /// Credential missing or rejected (401)
    NotAuthenticated = 3001,
    /// Login succeeded at HTTP level but no token was returned
    MissingToken = 3002,

    // ==================== 4xxx: Application ====================
    /// Payload carried an explicit success=false flag
    OperationFailed = 4001,
    /// Payload could not be interpreted
    InvalidResponse = 4002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this code represents success
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the default message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::Success => "Success",
            ErrorCode::Unknown => "Unknown error",
            ErrorCode::InvalidConfig => "Invalid client configuration",
            ErrorCode::StorageFailed => "Local storage is unavailable",

            ErrorCode::NetworkError => "Network error. Please check your connection and try again.",
            ErrorCode::Timeout => "The server took too long to respond. Please try again.",

            ErrorCode::BadRequest => "The request was rejected by the server",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::Forbidden => "Permission denied",
            ErrorCode::ServerError => "Server error. Please try again later.",
            ErrorCode::HttpError => "Request failed",

            ErrorCode::NotAuthenticated => "Session expired. Please log in again.",
            ErrorCode::MissingToken => "Login failed: no token returned",

            ErrorCode::OperationFailed => "Operation failed",
            ErrorCode::InvalidResponse => "Unexpected response from server",
        }
    }

    /// Map an HTTP status onto the matching 2xxx/3xxx code
    pub fn from_http_status(status: u16) -> Self {
        match status {
            400 | 422 => ErrorCode::BadRequest,
            401 => ErrorCode::NotAuthenticated,
            403 => ErrorCode::Forbidden,
            404 => ErrorCode::NotFound,
            500..=599 => ErrorCode::ServerError,
            _ => ErrorCode::HttpError,
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::InvalidConfig),
            3 => Ok(ErrorCode::StorageFailed),

            // Transport
            1001 => Ok(ErrorCode::NetworkError),
            1002 => Ok(ErrorCode::Timeout),

            // HTTP
            2001 => Ok(ErrorCode::BadRequest),
            2002 => Ok(ErrorCode::NotFound),
            2003 => Ok(ErrorCode::Forbidden),
            2004 => Ok(ErrorCode::ServerError),
            2005 => Ok(ErrorCode::HttpError),

            // Auth
            3001 => Ok(ErrorCode::NotAuthenticated),
            3002 => Ok(ErrorCode::MissingToken),

            // Application
            4001 => Ok(ErrorCode::OperationFailed),
            4002 => Ok(ErrorCode::InvalidResponse),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}
