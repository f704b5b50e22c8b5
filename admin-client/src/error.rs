//! Client error types

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Client error type
///
/// Every store and session operation rejects with this one shape, whether
/// the failure happened in transport, at the HTTP level, or in the payload.
#[derive(Debug, Error)]
pub enum ClientError {
    /// No response within the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// Request could not be sent or the connection failed
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx status, with the server's message when it sent one
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("request failed"))]
    Http { status: u16, message: Option<String> },

    /// Credential missing or rejected (401)
    #[error("Authentication required")]
    Unauthorized(Option<String>),

    /// 2xx response whose payload signals a logical failure
    #[error(transparent)]
    Rejected(#[from] AppError),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Token storage could not be read or written
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Error code for this failure
    pub fn code(&self) -> ErrorCode {
        match self {
            ClientError::Timeout => ErrorCode::Timeout,
            ClientError::Network(_) => ErrorCode::NetworkError,
            ClientError::Http { status, .. } => ErrorCode::from_http_status(*status),
            ClientError::Unauthorized(_) => ErrorCode::NotAuthenticated,
            ClientError::Rejected(err) => err.code,
            ClientError::InvalidResponse(_) | ClientError::Serialization(_) => {
                ErrorCode::InvalidResponse
            }
            ClientError::Storage(_) => ErrorCode::StorageFailed,
            ClientError::Config(_) => ErrorCode::InvalidConfig,
        }
    }

    /// Text to show the user: the server's message when there is one,
    /// otherwise a generic message
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Http {
                message: Some(m), ..
            }
            | ClientError::Unauthorized(Some(m)) => m.clone(),
            ClientError::Rejected(err) => err.message.clone(),
            ClientError::Http { message: None, .. } | ClientError::Network(_) => {
                ErrorCode::NetworkError.message().to_string()
            }
            other => other.code().message().to_string(),
        }
    }

    /// HTTP status, when the failure carried one
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            ClientError::Unauthorized(_) => Some(401),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_decode() {
            ClientError::InvalidResponse(err.to_string())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
