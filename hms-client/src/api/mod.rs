//! Resource clients
//!
//! One thin wrapper per backend resource. Each borrows an [`HttpClient`],
//! picks the path and method, and hands back the backend envelope untouched.
//!
//! ```ignore
//! let rooms = RoomsApi::new(&gateway).list(property_id).await?;
//! ```

mod auth;
mod bookings;
mod properties;
mod rates;
mod rooms;
mod users;

pub use auth::AuthApi;
pub use bookings::{BookingsApi, GuestsApi, PaymentsApi};
pub use properties::{BlocksApi, PropertiesApi};
pub use rates::{PricingConfigApi, RatePlansApi, RateRulesApi};
pub use rooms::{MaintenanceApi, RoomTypesApi, RoomsApi};
pub use users::{PermissionsApi, RolesApi, UserPermissionsApi, UsersApi};

/// Envelope of endpoints that return no data (deletes, logout)
pub type Empty = shared::ApiResponse<serde_json::Value>;

/// `?from=..&to=..` for date-range endpoints (dates are `YYYY-MM-DD`)
fn range_query(from: &str, to: &str) -> String {
    format!("from={from}&to={to}")
}
