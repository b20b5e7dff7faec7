//! Shared types for the HMS client stack
//!
//! Wire envelope, entity DTOs for every backend resource, and the client-side
//! aggregation of availability data. Used by `hms-client` and `hms-proxy`.

pub mod availability;
pub mod models;
pub mod response;

// Re-exports
pub use response::{ApiErrorBody, ApiResponse};
pub use serde::{Deserialize, Serialize};
