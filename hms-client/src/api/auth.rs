//! Auth endpoints

use shared::ApiResponse;
use shared::models::LoginRequest;

use super::Empty;
use crate::{ClientResult, HttpClient};

/// `/auth/*`
///
/// The session itself lives in the cookie jar, so these only report success.
#[derive(Debug, Clone, Copy)]
pub struct AuthApi<'a, C> {
    client: &'a C,
}

impl<'a, C: HttpClient> AuthApi<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// `POST /auth/login`; the backend sets the session cookie
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<ApiResponse<serde_json::Value>> {
        let req = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.client.post("/auth/login", &req).await
    }

    pub async fn logout(&self) -> ClientResult<Empty> {
        self.client.post_empty("/auth/logout").await
    }

    /// `POST /auth/refresh`; also used to probe whether a session is alive
    pub async fn refresh(&self) -> ClientResult<Empty> {
        self.client.post_empty("/auth/refresh").await
    }
}
