//! Booking, Guest and Payment Models
//!
//! The booking lifecycle lives in the backend; these are wire shapes only.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Draft,
    Confirmed,
    CheckedIn,
    CheckedOut,
    Cancelled,
    NoShow,
}

impl BookingStatus {
    /// Wire name, e.g. `CHECKED_IN`
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Draft => "DRAFT",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::CheckedIn => "CHECKED_IN",
            BookingStatus::CheckedOut => "CHECKED_OUT",
            BookingStatus::Cancelled => "CANCELLED",
            BookingStatus::NoShow => "NO_SHOW",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingSource {
    Internal,
    Website,
    B2b,
    Phone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Partial,
    Paid,
    Refunded,
}

/// One room-stay line of a booking
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingItem {
    pub id: i64,
    pub booking_id: i64,
    pub room_type_id: i64,
    pub room_id: i64,
    pub checkin_date: String,
    pub checkout_date: String,
    pub price_per_night: f64,
    #[serde(default)]
    pub discount_amount: f64,
    #[serde(default)]
    pub num_adults: i32,
    #[serde(default)]
    pub num_children: i32,
}

/// Booking entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i64,
    pub property_id: i64,
    #[serde(default)]
    pub created_by_user_id: Option<i64>,
    pub status: BookingStatus,
    pub source: BookingSource,
    pub payment_status: PaymentStatus,
    pub total_amount: f64,
    #[serde(default)]
    pub advance_amount: f64,
    pub currency: String,
    #[serde(default)]
    pub checkin_time: Option<String>,
    #[serde(default)]
    pub checkout_time: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub items: Vec<BookingItem>,
}

/// Booking item payload (used on create and `POST /bookings/{id}/items`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingItemCreate {
    pub room_type_id: i64,
    pub room_id: i64,
    pub checkin_date: String,
    pub checkout_date: String,
    pub price_per_night: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_adults: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_children: Option<i32>,
}

/// Update booking item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_night: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_adults: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_children: Option<i32>,
}

/// Create booking payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingCreate {
    pub status: BookingStatus,
    pub source: BookingSource,
    pub payment_status: PaymentStatus,
    pub total_amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advance_amount: Option<f64>,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkin_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkout_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub items: Vec<BookingItemCreate>,
    pub guests: Vec<GuestCreate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<PaymentCreate>,
}

/// Update booking payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BookingStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<BookingSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkin_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkout_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Guest entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    pub id: i64,
    pub booking_id: i64,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
}

/// Create guest payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestCreate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_primary: Option<bool>,
}

/// Update guest payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_primary: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    Upi,
    InternetBanking,
    Card,
    Other,
}

/// Status of a single payment record (distinct from the booking's [`PaymentStatus`])
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentRecordStatus {
    Success,
    Pending,
    Failed,
    Refunded,
}

/// Payment entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: i64,
    pub booking_id: i64,
    pub amount: f64,
    pub currency: String,
    pub payment_method: PaymentMethod,
    pub status: PaymentRecordStatus,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Record payment payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCreate {
    pub amount: f64,
    pub payment_method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}
