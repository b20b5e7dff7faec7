//! Property and block endpoints

use shared::ApiResponse;
use shared::models::{
    AvailabilityResponse, Property, PropertyBlock, PropertyBlockCreate, PropertyBlockUpdate,
    PropertyCreate, PropertyUpdate,
};

use super::{Empty, range_query};
use crate::{ClientResult, HttpClient};

/// `/properties`
#[derive(Debug, Clone, Copy)]
pub struct PropertiesApi<'a, C> {
    client: &'a C,
}

impl<'a, C: HttpClient> PropertiesApi<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> ClientResult<ApiResponse<Vec<Property>>> {
        self.client.get("/properties").await
    }

    pub async fn get(&self, id: i64) -> ClientResult<ApiResponse<Property>> {
        self.client.get(&format!("/properties/{id}")).await
    }

    pub async fn create(&self, data: &PropertyCreate) -> ClientResult<ApiResponse<Property>> {
        self.client.post("/properties", data).await
    }

    pub async fn update(&self, id: i64, data: &PropertyUpdate) -> ClientResult<ApiResponse<Property>> {
        self.client.patch(&format!("/properties/{id}"), data).await
    }

    pub async fn delete(&self, id: i64) -> ClientResult<Empty> {
        self.client.delete(&format!("/properties/{id}")).await
    }

    /// Occupied dates of every room in `[from, to]`
    pub async fn availability(
        &self,
        id: i64,
        from: &str,
        to: &str,
    ) -> ClientResult<ApiResponse<AvailabilityResponse>> {
        self.client
            .get(&format!("/properties/{id}/availability?{}", range_query(from, to)))
            .await
    }
}

/// Property blocks (wings, floors, buildings)
#[derive(Debug, Clone, Copy)]
pub struct BlocksApi<'a, C> {
    client: &'a C,
}

impl<'a, C: HttpClient> BlocksApi<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    pub async fn list(&self, property_id: i64) -> ClientResult<ApiResponse<Vec<PropertyBlock>>> {
        self.client.get(&format!("/properties/{property_id}/blocks")).await
    }

    pub async fn get(&self, id: i64) -> ClientResult<ApiResponse<PropertyBlock>> {
        self.client.get(&format!("/properties/blocks/{id}")).await
    }

    pub async fn create(
        &self,
        property_id: i64,
        data: &PropertyBlockCreate,
    ) -> ClientResult<ApiResponse<PropertyBlock>> {
        self.client
            .post(&format!("/properties/{property_id}/blocks"), data)
            .await
    }

    pub async fn update(&self, id: i64, data: &PropertyBlockUpdate) -> ClientResult<ApiResponse<PropertyBlock>> {
        self.client.patch(&format!("/properties/blocks/{id}"), data).await
    }

    pub async fn delete(&self, id: i64) -> ClientResult<Empty> {
        self.client.delete(&format!("/properties/blocks/{id}")).await
    }
}
