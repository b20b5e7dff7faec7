//! Room, room type and maintenance endpoints

use shared::ApiResponse;
use shared::models::{
    Room, RoomCreate, RoomMaintenance, RoomMaintenanceCreate, RoomMaintenanceUpdate, RoomType,
    RoomTypeCreate, RoomTypeUpdate, RoomUpdate,
};

use super::Empty;
use crate::{ClientResult, HttpClient};

#[derive(Debug, Clone, Copy)]
pub struct RoomsApi<'a, C> {
    client: &'a C,
}

impl<'a, C: HttpClient> RoomsApi<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    pub async fn list(&self, property_id: i64) -> ClientResult<ApiResponse<Vec<Room>>> {
        self.client.get(&format!("/properties/{property_id}/rooms")).await
    }

    pub async fn get(&self, id: i64) -> ClientResult<ApiResponse<Room>> {
        self.client.get(&format!("/properties/rooms/{id}")).await
    }

    pub async fn create(&self, property_id: i64, data: &RoomCreate) -> ClientResult<ApiResponse<Room>> {
        self.client
            .post(&format!("/properties/{property_id}/rooms"), data)
            .await
    }

    pub async fn update(&self, id: i64, data: &RoomUpdate) -> ClientResult<ApiResponse<Room>> {
        self.client.patch(&format!("/properties/rooms/{id}"), data).await
    }

    pub async fn delete(&self, id: i64) -> ClientResult<Empty> {
        self.client.delete(&format!("/properties/rooms/{id}")).await
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RoomTypesApi<'a, C> {
    client: &'a C,
}

impl<'a, C: HttpClient> RoomTypesApi<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    pub async fn list(&self, property_id: i64) -> ClientResult<ApiResponse<Vec<RoomType>>> {
        self.client
            .get(&format!("/properties/{property_id}/room-types"))
            .await
    }

    pub async fn get(&self, id: i64) -> ClientResult<ApiResponse<RoomType>> {
        self.client.get(&format!("/properties/room-types/{id}")).await
    }

    pub async fn create(&self, property_id: i64, data: &RoomTypeCreate) -> ClientResult<ApiResponse<RoomType>> {
        self.client
            .post(&format!("/properties/{property_id}/room-types"), data)
            .await
    }

    pub async fn update(&self, id: i64, data: &RoomTypeUpdate) -> ClientResult<ApiResponse<RoomType>> {
        self.client
            .patch(&format!("/properties/room-types/{id}"), data)
            .await
    }

    pub async fn delete(&self, id: i64) -> ClientResult<Empty> {
        self.client.delete(&format!("/properties/room-types/{id}")).await
    }
}

/// Scheduled maintenance windows of a room
#[derive(Debug, Clone, Copy)]
pub struct MaintenanceApi<'a, C> {
    client: &'a C,
}

impl<'a, C: HttpClient> MaintenanceApi<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    pub async fn list(&self, room_id: i64) -> ClientResult<ApiResponse<Vec<RoomMaintenance>>> {
        self.client.get(&format!("/rooms/{room_id}/maintenance")).await
    }

    pub async fn get(&self, id: i64) -> ClientResult<ApiResponse<RoomMaintenance>> {
        self.client.get(&format!("/rooms/maintenance/{id}")).await
    }

    pub async fn create(
        &self,
        room_id: i64,
        data: &RoomMaintenanceCreate,
    ) -> ClientResult<ApiResponse<RoomMaintenance>> {
        self.client
            .post(&format!("/rooms/{room_id}/maintenance"), data)
            .await
    }

    pub async fn update(
        &self,
        id: i64,
        data: &RoomMaintenanceUpdate,
    ) -> ClientResult<ApiResponse<RoomMaintenance>> {
        self.client.patch(&format!("/rooms/maintenance/{id}"), data).await
    }

    pub async fn delete(&self, id: i64) -> ClientResult<Empty> {
        self.client.delete(&format!("/rooms/maintenance/{id}")).await
    }
}
