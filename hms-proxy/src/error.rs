//! Proxy errors
//!
//! Failures the proxy itself produces. Backend error responses are relayed
//! untouched and never pass through here.

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use shared::ApiResponse;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProxyError {
    /// Backend unreachable, timed out, or the connection broke mid-response
    #[error("Upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    /// Target could not be built from the incoming request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ProxyError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ProxyError::Upstream(_) => "PROXY_UPSTREAM",
            ProxyError::InvalidRequest(_) => "PROXY_INVALID_REQUEST",
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Proxy request failed");
        }
        let body: ApiResponse<()> = ApiResponse::error(self.code(), self.to_string());
        (status, Json(body)).into_response()
    }
}

pub type ProxyResult<T> = Result<T, ProxyError>;
