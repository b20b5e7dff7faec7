//! Availability Models
//!
//! Returned by `GET /properties/{id}/availability?from&to`: rooms grouped by
//! room type, each with the dates it is unavailable on.

use super::BookingStatus;
use serde::{Deserialize, Serialize};

/// `status` value the backend uses for maintenance blocks
pub const OCCUPIED_STATUS_MAINTENANCE: &str = "MAINTENANCE";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub property_id: i64,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub room_types: Vec<RoomTypeAvailability>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomTypeAvailability {
    pub room_type_id: i64,
    pub room_type_name: String,
    #[serde(default)]
    pub rooms: Vec<RoomAvailability>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomAvailability {
    pub room_id: i64,
    pub room_number: String,
    #[serde(default)]
    pub occupied_dates: Vec<OccupiedDate>,
}

/// One unavailable night for one room
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupiedDate {
    pub date: String,
    pub status: String,
    #[serde(default)]
    pub booking_id: Option<i64>,
    #[serde(default)]
    pub booking_status: Option<BookingStatus>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl OccupiedDate {
    pub fn is_maintenance(&self) -> bool {
        self.status == OCCUPIED_STATUS_MAINTENANCE
    }
}

/// `GET /bookings/rooms/{id}/availability?from&to`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomAvailabilityCheck {
    pub room_id: i64,
    pub start_date: String,
    pub end_date: String,
    pub is_available: bool,
    #[serde(default)]
    pub occupied_dates: Vec<String>,
}
