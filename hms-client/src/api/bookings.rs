//! Booking, guest and payment endpoints

use shared::ApiResponse;
use shared::models::{
    Booking, BookingCreate, BookingItemCreate, BookingItemUpdate, BookingUpdate, Guest,
    GuestCreate, GuestUpdate, Payment, PaymentCreate, RoomAvailabilityCheck,
};

use super::{Empty, range_query};
use crate::{ClientResult, HttpClient};

/// Bookings and their line items
///
/// Item mutations return the whole booking so totals stay in sync.
#[derive(Debug, Clone, Copy)]
pub struct BookingsApi<'a, C> {
    client: &'a C,
}

impl<'a, C: HttpClient> BookingsApi<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    pub async fn create(&self, property_id: i64, data: &BookingCreate) -> ClientResult<ApiResponse<Booking>> {
        self.client
            .post(&format!("/properties/{property_id}/bookings"), data)
            .await
    }

    pub async fn get(&self, id: i64) -> ClientResult<ApiResponse<Booking>> {
        self.client.get(&format!("/properties/bookings/{id}")).await
    }

    pub async fn update(&self, id: i64, data: &BookingUpdate) -> ClientResult<ApiResponse<Booking>> {
        self.client.patch(&format!("/properties/bookings/{id}"), data).await
    }

    pub async fn delete(&self, id: i64) -> ClientResult<Empty> {
        self.client.delete(&format!("/properties/bookings/{id}")).await
    }

    pub async fn check_in(&self, id: i64) -> ClientResult<ApiResponse<Booking>> {
        self.client
            .post_empty(&format!("/properties/bookings/{id}/checkin"))
            .await
    }

    pub async fn check_out(&self, id: i64) -> ClientResult<ApiResponse<Booking>> {
        self.client
            .post_empty(&format!("/properties/bookings/{id}/checkout"))
            .await
    }

    pub async fn add_item(&self, booking_id: i64, data: &BookingItemCreate) -> ClientResult<ApiResponse<Booking>> {
        self.client
            .post(&format!("/bookings/{booking_id}/items"), data)
            .await
    }

    pub async fn update_item(
        &self,
        booking_id: i64,
        item_id: i64,
        data: &BookingItemUpdate,
    ) -> ClientResult<ApiResponse<Booking>> {
        self.client
            .patch(&format!("/bookings/{booking_id}/items/{item_id}"), data)
            .await
    }

    pub async fn remove_item(&self, booking_id: i64, item_id: i64) -> ClientResult<ApiResponse<Booking>> {
        self.client
            .delete(&format!("/bookings/{booking_id}/items/{item_id}"))
            .await
    }

    /// Whether a single room is free over `[from, to]`
    pub async fn check_room_availability(
        &self,
        room_id: i64,
        from: &str,
        to: &str,
    ) -> ClientResult<ApiResponse<RoomAvailabilityCheck>> {
        self.client
            .get(&format!(
                "/bookings/rooms/{room_id}/availability?{}",
                range_query(from, to)
            ))
            .await
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GuestsApi<'a, C> {
    client: &'a C,
}

impl<'a, C: HttpClient> GuestsApi<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    pub async fn list(&self, booking_id: i64) -> ClientResult<ApiResponse<Vec<Guest>>> {
        self.client.get(&format!("/bookings/{booking_id}/guests")).await
    }

    pub async fn add(&self, booking_id: i64, data: &GuestCreate) -> ClientResult<ApiResponse<Guest>> {
        self.client
            .post(&format!("/bookings/{booking_id}/guests"), data)
            .await
    }

    pub async fn update(
        &self,
        booking_id: i64,
        guest_id: i64,
        data: &GuestUpdate,
    ) -> ClientResult<ApiResponse<Guest>> {
        self.client
            .patch(&format!("/bookings/{booking_id}/guests/{guest_id}"), data)
            .await
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PaymentsApi<'a, C> {
    client: &'a C,
}

impl<'a, C: HttpClient> PaymentsApi<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    pub async fn list(&self, booking_id: i64) -> ClientResult<ApiResponse<Vec<Payment>>> {
        self.client.get(&format!("/bookings/{booking_id}/payments")).await
    }

    pub async fn record(&self, booking_id: i64, data: &PaymentCreate) -> ClientResult<ApiResponse<Payment>> {
        self.client
            .post(&format!("/bookings/{booking_id}/payments"), data)
            .await
    }
}
