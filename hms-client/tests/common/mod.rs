// hms-client/tests/common/mod.rs
// In-memory backend double for resource client and app state tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use hms_client::{ClientError, ClientResult, HttpClient, RequestOptions};
use http::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

/// One recorded call
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

/// Answers canned responses and records every call
#[derive(Default)]
pub struct FakeBackend {
    routes: Mutex<HashMap<(Method, String), Result<Value, StatusCode>>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, method: Method, path: &str, body: Value) {
        self.routes
            .lock()
            .unwrap()
            .insert((method, path.to_string()), Ok(body));
    }

    pub fn fail(&self, method: Method, path: &str, status: StatusCode) {
        self.routes
            .lock()
            .unwrap()
            .insert((method, path.to_string()), Err(status));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last(&self) -> Call {
        self.calls.lock().unwrap().last().cloned().expect("no calls recorded")
    }
}

#[async_trait]
impl HttpClient for FakeBackend {
    async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        _options: &RequestOptions,
    ) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + Sync,
    {
        let body = body.map(serde_json::to_value).transpose()?;
        self.calls.lock().unwrap().push(Call {
            method: method.clone(),
            path: path.to_string(),
            body,
        });

        let canned = self
            .routes
            .lock()
            .unwrap()
            .get(&(method, path.to_string()))
            .cloned()
            .unwrap_or_else(|| Ok(json!({ "success": true })));

        match canned {
            Ok(value) => Ok(serde_json::from_value(value)?),
            Err(status) => Err(ClientError::from_response(status, "")),
        }
    }
}
