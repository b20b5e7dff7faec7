//! HMS Client - session-aware HTTP client for the HMS backend
//!
//! - [`SessionGateway`]: every call goes through it; cookies are attached,
//!   an expired session is refreshed once and the call retried once
//! - [`api`]: thin per-entity request builders on top of [`HttpClient`]
//! - [`AppState`]: current user / selected property, persisted between runs
//! - [`QueryCache`]: keyed response cache invalidated after mutations

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod gateway;
pub mod http;
pub mod navigator;
pub mod state;
pub mod storage;

pub use cache::QueryCache;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use gateway::SessionGateway;
pub use http::{HttpClient, RequestOptions};
pub use navigator::{LogNavigator, LoginNavigator, WatchNavigator};
pub use state::{AppSnapshot, AppState};
pub use storage::SnapshotStore;

// Re-export shared types for convenience
pub use shared::{ApiErrorBody, ApiResponse, models};
