//! Auth DTOs

use serde::{Deserialize, Serialize};

/// Login request (`POST /auth/login`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Snapshot of the signed-in user kept by the client between runs
///
/// Only `email` is guaranteed; the backend may return more on login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_name: Option<String>,
}

impl UserSnapshot {
    pub fn from_email(email: impl Into<String>) -> Self {
        Self {
            id: None,
            name: None,
            email: email.into(),
            role_name: None,
        }
    }
}
