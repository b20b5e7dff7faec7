//! Session Gateway
//!
//! Every API call goes through [`SessionGateway::execute`]:
//!
//! ```text
//! ISSUED ──2xx/4xx/5xx──────────────────────────────► DONE
//!    │
//!    └─401─► REFRESHING ──ok──► RETRIED ──any──────► DONE
//!                 │
//!                 └─fail─► REDIRECT ───────────────► FAILED (SessionExpired)
//! ```
//!
//! The retry happens at most once per call; a 401 on the retry is returned
//! as a plain HTTP error. Concurrent 401s share a single refresh call.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use http::header::CONTENT_TYPE;
use http::{Method, StatusCode};
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::http::{HttpClient, RequestOptions};
use crate::navigator::{LogNavigator, LoginNavigator};
use crate::{ClientConfig, ClientError, ClientResult};

/// What a call should do after asking for a refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RefreshOutcome {
    /// This call refreshed the session
    Refreshed,
    /// This call's refresh failed; it owns the redirect
    Failed,
    /// Another call refreshed while this one was in flight
    Joined { ok: bool },
}

/// Coalesces refresh calls
///
/// `epoch` counts finished refresh attempts. A call records it before sending;
/// if the epoch moved by the time the call gets the lock, the session was
/// already renewed (or found dead) on its behalf.
#[derive(Debug, Default)]
struct RefreshGate {
    epoch: AtomicU64,
    last_ok: Mutex<bool>,
}

impl RefreshGate {
    fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::Acquire)
    }

    async fn refresh<F, Fut>(&self, observed: u64, refresh: F) -> RefreshOutcome
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = bool>,
    {
        let mut last_ok = self.last_ok.lock().await;
        if self.epoch() != observed {
            return RefreshOutcome::Joined { ok: *last_ok };
        }

        let ok = refresh().await;
        *last_ok = ok;
        self.epoch.fetch_add(1, Ordering::AcqRel);

        if ok {
            RefreshOutcome::Refreshed
        } else {
            RefreshOutcome::Failed
        }
    }
}

/// Session-aware HTTP client
///
/// Cloning is cheap; clones share the cookie jar and the refresh gate.
#[derive(Clone)]
pub struct SessionGateway {
    client: Client,
    config: Arc<ClientConfig>,
    navigator: Arc<dyn LoginNavigator>,
    gate: Arc<RefreshGate>,
}

impl std::fmt::Debug for SessionGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionGateway")
            .field("base_url", &self.config.base_url)
            .field("refresh_epoch", &self.gate.epoch())
            .finish()
    }
}

impl SessionGateway {
    /// Create a gateway from configuration
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            config: Arc::new(config),
            navigator: Arc::new(LogNavigator),
            gate: Arc::new(RefreshGate::default()),
        })
    }

    /// Set where unrecoverable 401s are reported
    pub fn with_navigator(mut self, navigator: Arc<dyn LoginNavigator>) -> Self {
        self.navigator = navigator;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Base URL every path is joined onto
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn url(&self, path: &str) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }

    /// Run one logical call, honouring the cancellation token if any
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
        options: &RequestOptions,
    ) -> ClientResult<Value> {
        match &options.cancel {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => {
                    debug!(%method, path, "request cancelled");
                    Err(ClientError::Cancelled)
                }
                result = self.run(&method, path, body.as_deref(), options) => result,
            },
            None => self.run(&method, path, body.as_deref(), options).await,
        }
    }

    async fn run(
        &self,
        method: &Method,
        path: &str,
        body: Option<&[u8]>,
        options: &RequestOptions,
    ) -> ClientResult<Value> {
        let observed = self.gate.epoch();
        let response = self.send(method, path, body, options).await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return Self::finish(response).await;
        }

        warn!(%method, path, "401 received, refreshing session");
        match self.gate.refresh(observed, || self.send_refresh()).await {
            RefreshOutcome::Refreshed | RefreshOutcome::Joined { ok: true } => {
                debug!(%method, path, "retrying after refresh");
                let retry = self.send(method, path, body, options).await?;
                Self::finish(retry).await
            }
            RefreshOutcome::Failed => {
                self.navigator.redirect_to_login();
                Err(ClientError::SessionExpired)
            }
            RefreshOutcome::Joined { ok: false } => Err(ClientError::SessionExpired),
        }
    }

    async fn send(
        &self,
        method: &Method,
        path: &str,
        body: Option<&[u8]>,
        options: &RequestOptions,
    ) -> ClientResult<reqwest::Response> {
        let url = self.url(path);
        let mut req = self
            .client
            .request(method.clone(), &url)
            .headers(options.headers.clone());

        if let Some(body) = body {
            req = req
                .header(CONTENT_TYPE, "application/json")
                .body(body.to_vec());
        }
        if let Some(timeout) = options.timeout {
            req = req.timeout(timeout);
        }

        debug!(%method, %url, "sending request");
        Ok(req.send().await?)
    }

    /// `POST {refresh_path}`, no body; any transport error counts as failure
    async fn send_refresh(&self) -> bool {
        let url = self.url(&self.config.refresh_path);
        match self.client.post(&url).send().await {
            Ok(resp) if resp.status().is_success() => {
                info!("Session refreshed");
                true
            }
            Ok(resp) => {
                warn!(status = %resp.status(), "Session refresh rejected");
                false
            }
            Err(e) => {
                warn!(error = %e, "Session refresh failed");
                false
            }
        }
    }

    /// Map a final response to a JSON value or an error
    async fn finish(response: reqwest::Response) -> ClientResult<Value> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            debug!(%status, "request failed");
            return Err(ClientError::from_response(status, &text));
        }

        if text.trim().is_empty() {
            return Ok(shared::response::empty_success());
        }
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl HttpClient for SessionGateway {
    async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        options: &RequestOptions,
    ) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + Sync,
    {
        let body = body.map(serde_json::to_vec).transpose()?;
        let value = self.execute(method, path, body, options).await?;
        Ok(serde_json::from_value(value)?)
    }
}
