//! Room and Room Type Models

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomStatus {
    Available,
    Occupied,
    Maintenance,
    OutOfService,
}

/// Room entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: i64,
    pub property_id: i64,
    #[serde(default)]
    pub block_id: Option<i64>,
    pub room_type_id: i64,
    pub room_number: String,
    #[serde(default)]
    pub floor_number: Option<i32>,
    pub status: RoomStatus,
}

/// Create room payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomCreate {
    pub room_type_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_id: Option<i64>,
    pub room_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor_number: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RoomStatus>,
}

/// Update room payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_type_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor_number: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RoomStatus>,
}

/// Room type entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomType {
    pub id: i64,
    pub property_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub base_occupancy: i32,
    pub max_occupancy: i32,
}

/// Create room type payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomTypeCreate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_occupancy: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_occupancy: Option<i32>,
}

/// Update room type payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomTypeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_occupancy: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_occupancy: Option<i32>,
}
