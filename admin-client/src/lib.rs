//! Admin Client - back-office client core for the store admin API
//!
//! HTTP adapters with bearer injection and 401 eviction, the session
//! manager, and one store per backend resource.

pub mod app_state;
pub mod config;
pub mod error;
pub mod http;
pub mod logger;
pub mod session;
pub mod storage;
pub mod store;

#[cfg(test)]
mod testing;

pub use app_state::AppState;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, NetworkHttpClient};
pub use session::{SessionManager, SessionState};
pub use storage::{FileTokenStore, MemoryTokenStore, TokenStore};

// Re-export shared types for convenience
pub use shared::client::{Session, UserInfo};
pub use shared::request::{FilePart, Filters, FormPayload};
