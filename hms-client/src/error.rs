//! Client error types
//!
//! Every failure of a call ends up here so callers can branch on
//! [`ClientError::status`] and show [`ClientError::message`] without caring
//! whether the backend, the network or the session was at fault.

use http::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// 401 whose refresh also failed; the login view has been requested
    #[error("Session expired")]
    SessionExpired,

    /// Non-2xx response
    #[error("{message}")]
    Http {
        status: StatusCode,
        message: String,
        details: Option<Value>,
    },

    /// No response at all (connect, DNS, TLS, reset)
    #[error("Network error")]
    Transport(#[source] reqwest::Error),

    /// Request exceeded its timeout
    #[error("Request timed out")]
    Timeout,

    /// Caller cancelled the request
    #[error("Request cancelled")]
    Cancelled,

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Snapshot persistence failed
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::Timeout
        } else {
            ClientError::Transport(e)
        }
    }
}

impl ClientError {
    /// Build the error for a non-2xx response from its raw body
    ///
    /// Message precedence: `error.message`, then a top-level `message`, then
    /// `HTTP {status}`. The server's `error` object is kept as details.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let json: Value = serde_json::from_str(body).unwrap_or_else(|_| Value::Object(Default::default()));
        let details = json.get("error").filter(|e| !e.is_null()).cloned();

        let message = details
            .as_ref()
            .and_then(|e| e.get("message"))
            .or_else(|| json.get("message"))
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

        ClientError::Http {
            status,
            message,
            details,
        }
    }

    /// HTTP status, when a response was received
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::SessionExpired => Some(StatusCode::UNAUTHORIZED),
            ClientError::Http { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// User-facing message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Structured error payload from the backend
    pub fn details(&self) -> Option<&Value> {
        match self {
            ClientError::Http { details, .. } => details.as_ref(),
            _ => None,
        }
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(self, ClientError::SessionExpired)
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
