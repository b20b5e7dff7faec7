//! User, role and permission endpoints

use shared::ApiResponse;
use shared::models::{
    Permission, PermissionGrant, PermissionOverride, Role, RoleCreate, RolePermission, RoleUpdate,
    User, UserCreate, UserUpdate,
};

use super::Empty;
use crate::{ClientResult, HttpClient};

#[derive(Debug, Clone, Copy)]
pub struct UsersApi<'a, C> {
    client: &'a C,
}

impl<'a, C: HttpClient> UsersApi<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> ClientResult<ApiResponse<Vec<User>>> {
        self.client.get("/users").await
    }

    pub async fn get(&self, id: i64) -> ClientResult<ApiResponse<User>> {
        self.client.get(&format!("/users/{id}")).await
    }

    pub async fn create(&self, data: &UserCreate) -> ClientResult<ApiResponse<User>> {
        self.client.post("/users", data).await
    }

    pub async fn update(&self, id: i64, data: &UserUpdate) -> ClientResult<ApiResponse<User>> {
        self.client.patch(&format!("/users/{id}"), data).await
    }

    pub async fn delete(&self, id: i64) -> ClientResult<Empty> {
        self.client.delete(&format!("/users/{id}")).await
    }
}

/// Per-user overrides on top of the role's permissions
#[derive(Debug, Clone, Copy)]
pub struct UserPermissionsApi<'a, C> {
    client: &'a C,
}

impl<'a, C: HttpClient> UserPermissionsApi<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    pub async fn list(&self, user_id: i64) -> ClientResult<ApiResponse<Vec<PermissionOverride>>> {
        self.client
            .get(&format!("/users/{user_id}/permission-overrides"))
            .await
    }

    pub async fn add(&self, user_id: i64, data: &PermissionGrant) -> ClientResult<ApiResponse<PermissionOverride>> {
        self.client
            .post(&format!("/users/{user_id}/permission-overrides"), data)
            .await
    }

    pub async fn remove(&self, user_id: i64, override_id: i64) -> ClientResult<Empty> {
        self.client
            .delete(&format!("/users/{user_id}/permission-overrides/{override_id}"))
            .await
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RolesApi<'a, C> {
    client: &'a C,
}

impl<'a, C: HttpClient> RolesApi<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> ClientResult<ApiResponse<Vec<Role>>> {
        self.client.get("/roles").await
    }

    pub async fn get(&self, id: i64) -> ClientResult<ApiResponse<Role>> {
        self.client.get(&format!("/roles/{id}")).await
    }

    pub async fn create(&self, data: &RoleCreate) -> ClientResult<ApiResponse<Role>> {
        self.client.post("/roles", data).await
    }

    pub async fn update(&self, id: i64, data: &RoleUpdate) -> ClientResult<ApiResponse<Role>> {
        self.client.patch(&format!("/roles/{id}"), data).await
    }

    pub async fn delete(&self, id: i64) -> ClientResult<Empty> {
        self.client.delete(&format!("/roles/{id}")).await
    }

    pub async fn permissions(&self, role_id: i64) -> ClientResult<ApiResponse<Vec<RolePermission>>> {
        self.client.get(&format!("/roles/{role_id}/permissions")).await
    }

    pub async fn add_permission(
        &self,
        role_id: i64,
        data: &PermissionGrant,
    ) -> ClientResult<ApiResponse<RolePermission>> {
        self.client
            .post(&format!("/roles/{role_id}/permissions"), data)
            .await
    }

    pub async fn remove_permission(&self, role_id: i64, role_permission_id: i64) -> ClientResult<Empty> {
        self.client
            .delete(&format!("/roles/{role_id}/permissions/{role_permission_id}"))
            .await
    }
}

/// Read-only permission catalogue
#[derive(Debug, Clone, Copy)]
pub struct PermissionsApi<'a, C> {
    client: &'a C,
}

impl<'a, C: HttpClient> PermissionsApi<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> ClientResult<ApiResponse<Vec<Permission>>> {
        self.client.get("/permissions").await
    }
}
