//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// - 0xxx: General errors
/// - 1xxx: Transport errors
/// - 2xxx: HTTP errors
/// - 3xxx: Authentication errors
/// - 4xxx: Application errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// No response received (1xxx)
    Transport,
    /// Non-2xx status (2xxx)
    Http,
    /// Credential problems (3xxx)
    Auth,
    /// 2xx status but the payload signals failure (4xxx)
    Application,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            1000..2000 => Self::Transport,
            2000..3000 => Self::Http,
            3000..4000 => Self::Auth,
            4000..5000 => Self::Application,
            _ => Self::General,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Transport => "transport",
            Self::Http => "http",
            Self::Auth => "auth",
            Self::Application => "application",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}
