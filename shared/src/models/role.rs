//! Role and Permission Models
//!
//! Roles carry per-permission access levels; users can override single
//! permissions on top of their role.

use serde::{Deserialize, Serialize};

/// Role entity (RBAC)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Create role payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleCreate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Update role payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessLevel {
    Disabled,
    Read,
    Write,
}

/// Permission catalogue entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Permission {
    pub id: i64,
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Permission granted to a role
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RolePermission {
    pub id: i64,
    pub role_id: i64,
    pub permission_id: i64,
    pub permission_code: String,
    pub access_level: AccessLevel,
}

/// Per-user override of one permission
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionOverride {
    pub id: i64,
    pub user_id: i64,
    pub permission_id: i64,
    pub permission_code: String,
    pub access_level: AccessLevel,
}

/// Grant payload, shared by role permissions and user overrides
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionGrant {
    pub permission_id: i64,
    pub access_level: AccessLevel,
}
