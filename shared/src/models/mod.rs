//! Data models
//!
//! DTOs for every backend resource. The backend speaks camelCase JSON and
//! uses integer ids; dates travel as `YYYY-MM-DD` strings.
//!
//! Naming follows `<Entity>`, `<Entity>Create`, `<Entity>Update`. Update
//! payloads leave unset fields out of the JSON entirely.

pub mod auth;
pub mod availability;
pub mod booking;
pub mod maintenance;
pub mod pricing;
pub mod property;
pub mod rate;
pub mod role;
pub mod room;
pub mod user;

// Re-exports
pub use auth::*;
pub use availability::*;
pub use booking::*;
pub use maintenance::*;
pub use pricing::*;
pub use property::*;
pub use rate::*;
pub use role::*;
pub use room::*;
pub use user::*;
