//! HTTP client trait
//!
//! Resource clients are generic over [`HttpClient`]; [`crate::SessionGateway`]
//! is the network implementation.

use std::time::Duration;

use async_trait::async_trait;
use http::{HeaderMap, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::ClientResult;

/// Per-call knobs
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Extra headers, sent on the original request and on its retry
    pub headers: HeaderMap,
    /// Overrides the client-wide timeout for each attempt
    pub timeout: Option<Duration>,
    /// Cancels the whole call, refresh and retry included
    pub cancel: Option<CancellationToken>,
}

impl RequestOptions {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_cancel(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }
}

/// HTTP client trait
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Issue one logical call and decode the JSON body
    async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        options: &RequestOptions,
    ) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + Sync;

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.request::<T, ()>(Method::GET, path, None, &RequestOptions::default())
            .await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.request(Method::POST, path, Some(body), &RequestOptions::default())
            .await
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.request::<T, ()>(Method::POST, path, None, &RequestOptions::default())
            .await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.request(Method::PUT, path, Some(body), &RequestOptions::default())
            .await
    }

    async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.request(Method::PATCH, path, Some(body), &RequestOptions::default())
            .await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.request::<T, ()>(Method::DELETE, path, None, &RequestOptions::default())
            .await
    }
}
