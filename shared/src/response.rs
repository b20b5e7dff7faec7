//! API Response types
//!
//! Every backend endpoint wraps its payload in the same envelope:
//! ```json
//! { "success": true, "data": { ... } }
//! { "success": false, "error": { "code": "NOT_FOUND", "message": "...", "details": ... } }
//! ```

use serde::{Deserialize, Serialize};

/// Error object carried by a failed envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiErrorBody {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Unified API response structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorBody>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Successful response without payload (what an empty 2xx body means)
    pub fn empty() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
        }
    }

    /// Create an error response
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiErrorBody::new(code, message)),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Take the payload, dropping the envelope
    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

/// The body every caller sees for an empty 2xx response
pub fn empty_success() -> serde_json::Value {
    serde_json::json!({ "success": true })
}
