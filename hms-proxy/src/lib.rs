//! HMS Dev Proxy - same-origin relay to the HMS backend
//!
//! The back office talks to `http://localhost:<port>/api/proxy/...`; this
//! server forwards each call to the real backend and rewrites its session
//! cookies so the browser keeps them on localhost.

pub mod config;
pub mod cookie;
pub mod error;
pub mod logger;
pub mod middleware;
pub mod proxy;

pub use config::ProxyConfig;
pub use error::{ProxyError, ProxyResult};
pub use proxy::ProxyState;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{any, get};
use http::{HeaderName, HeaderValue};
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

const REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build the proxy application
///
/// Used by the binary and by in-process tests.
pub fn router(state: ProxyState) -> Router {
    let prefix = state.config.prefix.clone();
    let max_body = state.config.max_body_bytes;

    Router::new()
        .route("/health", get(proxy::health))
        .route(&prefix, any(proxy::forward))
        .route(&format!("{prefix}/{{*path}}"), any(proxy::forward))
        .layer(DefaultBodyLimit::max(max_body))
        .layer(axum::middleware::from_fn(middleware::logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(REQUEST_ID))
        .layer(SetRequestIdLayer::new(REQUEST_ID, XRequestId))
        .with_state(state)
}
