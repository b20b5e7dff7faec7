// hms-client/tests/gateway_test.rs
// Session gateway against an in-process backend

use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicU16, AtomicUsize, Ordering};
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use hms_client::api::{AuthApi, PropertiesApi};
use hms_client::{
    ClientConfig, ClientError, HttpClient, LoginNavigator, RequestOptions, SessionGateway,
    WatchNavigator,
};
use http::Method;
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

const FRESH: &str = "sid=fresh";

struct Backend {
    refresh_calls: AtomicUsize,
    refresh_status: AtomicU16,
    refresh_delay_ms: u64,
    property_hits: AtomicUsize,
    always_hits: AtomicUsize,
    echoed: Mutex<Vec<(String, Option<String>)>>,
}

impl Backend {
    fn new(refresh_status: StatusCode) -> Self {
        Self {
            refresh_calls: AtomicUsize::new(0),
            refresh_status: AtomicU16::new(refresh_status.as_u16()),
            refresh_delay_ms: 0,
            property_hits: AtomicUsize::new(0),
            always_hits: AtomicUsize::new(0),
            echoed: Mutex::new(Vec::new()),
        }
    }

    fn with_refresh_delay(mut self, ms: u64) -> Self {
        self.refresh_delay_ms = ms;
        self
    }
}

fn has_fresh_cookie(headers: &HeaderMap) -> bool {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.split(';').any(|c| c.trim() == FRESH))
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "success": false, "error": { "code": "UNAUTHORIZED", "message": "Token expired" } })),
    )
        .into_response()
}

async fn properties(State(b): State<Arc<Backend>>, headers: HeaderMap) -> Response {
    b.property_hits.fetch_add(1, Ordering::SeqCst);
    if !has_fresh_cookie(&headers) {
        return unauthorized();
    }
    Json(json!({ "success": true, "data": [{ "id": 1, "name": "Lakeside", "city": "Pune", "country": "IN", "status": "ACTIVE" }] }))
        .into_response()
}

async fn always_unauthorized(State(b): State<Arc<Backend>>) -> Response {
    b.always_hits.fetch_add(1, Ordering::SeqCst);
    unauthorized()
}

/// Records body and `x-desk-id`; 401 until the session is fresh
async fn echo(State(b): State<Arc<Backend>>, headers: HeaderMap, body: String) -> Response {
    let desk = headers
        .get("x-desk-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    b.echoed.lock().unwrap().push((body, desk));
    if !has_fresh_cookie(&headers) {
        return unauthorized();
    }
    Json(json!({ "success": true })).into_response()
}

async fn refresh(State(b): State<Arc<Backend>>) -> Response {
    b.refresh_calls.fetch_add(1, Ordering::SeqCst);
    if b.refresh_delay_ms > 0 {
        tokio::time::sleep(Duration::from_millis(b.refresh_delay_ms)).await;
    }
    let status = StatusCode::from_u16(b.refresh_status.load(Ordering::SeqCst)).unwrap();
    if status.is_success() {
        (
            [(header::SET_COOKIE, format!("{FRESH}; HttpOnly; Path=/"))],
            Json(json!({ "success": true })),
        )
            .into_response()
    } else {
        (status, Json(json!({ "success": false }))).into_response()
    }
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["password"] != "secret" {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "error": { "code": "INVALID_CREDENTIALS", "message": "Invalid email or password" } })),
        )
            .into_response();
    }
    (
        [(header::SET_COOKIE, format!("{FRESH}; HttpOnly; Path=/"))],
        Json(json!({ "success": true })),
    )
        .into_response()
}

async fn no_content() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn bad_request() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "success": false, "error": { "code": "VALIDATION", "message": "checkOut must be after checkIn", "details": { "field": "checkOut" } } })),
    )
        .into_response()
}

async fn bare_500() -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn slow() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(5)).await;
    Json(json!({ "success": true }))
}

async fn spawn_backend(backend: Backend) -> (String, Arc<Backend>) {
    let backend = Arc::new(backend);
    let app = Router::new()
        .route("/properties", get(properties))
        .route("/always-401", get(always_unauthorized))
        .route("/echo", post(echo))
        .route("/auth/refresh", post(refresh))
        .route("/auth/login", post(login))
        .route("/no-content", get(no_content))
        .route("/bad-request", get(bad_request))
        .route("/bare-500", get(bare_500))
        .route("/slow", get(slow))
        .with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), backend)
}

fn gateway(base_url: &str) -> (SessionGateway, Arc<WatchNavigator>) {
    let navigator = Arc::new(WatchNavigator::new());
    let gateway = SessionGateway::new(ClientConfig::new(base_url))
        .unwrap()
        .with_navigator(navigator.clone() as Arc<dyn LoginNavigator>);
    (gateway, navigator)
}

#[tokio::test]
async fn test_expired_session_is_refreshed_and_retried() {
    let (url, backend) = spawn_backend(Backend::new(StatusCode::OK)).await;
    let (gw, nav) = gateway(&url);

    let resp = PropertiesApi::new(&gw).list().await.unwrap();
    let properties = resp.data.unwrap();
    assert_eq!(properties.len(), 1);
    assert_eq!(properties[0].name, "Lakeside");

    assert_eq!(backend.refresh_calls.load(Ordering::SeqCst), 1);
    assert_eq!(backend.property_hits.load(Ordering::SeqCst), 2);
    assert_eq!(nav.redirects(), 0);
}

#[tokio::test]
async fn test_retry_401_is_final() {
    let (url, backend) = spawn_backend(Backend::new(StatusCode::OK)).await;
    let (gw, nav) = gateway(&url);

    let err = gw.get::<Value>("/always-401").await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    assert_eq!(err.message(), "Token expired");
    assert!(!err.is_session_expired());

    assert_eq!(backend.refresh_calls.load(Ordering::SeqCst), 1);
    assert_eq!(backend.always_hits.load(Ordering::SeqCst), 2);
    assert_eq!(nav.redirects(), 0);
}

#[tokio::test]
async fn test_failed_refresh_redirects_once() {
    for status in [StatusCode::UNAUTHORIZED, StatusCode::FORBIDDEN, StatusCode::INTERNAL_SERVER_ERROR] {
        let (url, backend) = spawn_backend(Backend::new(status)).await;
        let (gw, nav) = gateway(&url);

        let err = PropertiesApi::new(&gw).list().await.unwrap_err();
        assert!(err.is_session_expired(), "refresh status {status}");
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
        assert_eq!(err.message(), "Session expired");

        // no retry after a failed refresh
        assert_eq!(backend.property_hits.load(Ordering::SeqCst), 1);
        assert_eq!(backend.refresh_calls.load(Ordering::SeqCst), 1);
        assert_eq!(nav.redirects(), 1);
    }
}

#[tokio::test]
async fn test_concurrent_401s_share_one_refresh() {
    let (url, backend) = spawn_backend(Backend::new(StatusCode::OK).with_refresh_delay(200)).await;
    let (gw, nav) = gateway(&url);

    let calls = (0..5).map(|_| {
        let gw = gw.clone();
        async move { gw.get::<Value>("/properties").await }
    });
    let results = futures::future::join_all(calls).await;

    for result in results {
        assert_eq!(result.unwrap()["success"], true);
    }
    assert_eq!(backend.refresh_calls.load(Ordering::SeqCst), 1);
    assert_eq!(nav.redirects(), 0);
}

#[tokio::test]
async fn test_concurrent_401s_with_dead_session_redirect_once() {
    let (url, backend) =
        spawn_backend(Backend::new(StatusCode::UNAUTHORIZED).with_refresh_delay(200)).await;
    let (gw, nav) = gateway(&url);

    let calls = (0..4).map(|_| {
        let gw = gw.clone();
        async move { gw.get::<Value>("/properties").await }
    });
    let results = futures::future::join_all(calls).await;

    assert!(results.iter().all(|r| matches!(r, Err(ClientError::SessionExpired))));
    assert_eq!(backend.refresh_calls.load(Ordering::SeqCst), 1);
    assert_eq!(nav.redirects(), 1);
}

#[tokio::test]
async fn test_login_cookie_is_sent_afterwards() {
    let (url, backend) = spawn_backend(Backend::new(StatusCode::UNAUTHORIZED)).await;
    let (gw, _) = gateway(&url);

    AuthApi::new(&gw).login("desk@hotel.test", "secret").await.unwrap();
    PropertiesApi::new(&gw).list().await.unwrap();

    assert_eq!(backend.refresh_calls.load(Ordering::SeqCst), 0);
    assert_eq!(backend.property_hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_login_401_goes_through_refresh() {
    // refresh succeeds: the retried login reports the backend's message
    let (url, backend) = spawn_backend(Backend::new(StatusCode::OK)).await;
    let (gw, nav) = gateway(&url);

    let err = AuthApi::new(&gw).login("desk@hotel.test", "nope").await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    assert_eq!(err.message(), "Invalid email or password");
    assert_eq!(backend.refresh_calls.load(Ordering::SeqCst), 1);
    assert_eq!(nav.redirects(), 0);

    // no session to refresh: session expired and back to login
    let (url, backend) = spawn_backend(Backend::new(StatusCode::UNAUTHORIZED)).await;
    let (gw, nav) = gateway(&url);

    let err = AuthApi::new(&gw).login("desk@hotel.test", "nope").await.unwrap_err();
    assert!(err.is_session_expired(), "got {err:?}");
    assert_eq!(backend.refresh_calls.load(Ordering::SeqCst), 1);
    assert_eq!(nav.redirects(), 1);
}

#[tokio::test]
async fn test_refresh_call_401_redirects() {
    let (url, backend) = spawn_backend(Backend::new(StatusCode::UNAUTHORIZED)).await;
    let (gw, nav) = gateway(&url);

    let err = AuthApi::new(&gw).refresh().await.unwrap_err();
    assert!(err.is_session_expired(), "got {err:?}");
    // the call itself plus the recovery refresh
    assert_eq!(backend.refresh_calls.load(Ordering::SeqCst), 2);
    assert_eq!(nav.redirects(), 1);
}

#[tokio::test]
async fn test_hung_refresh_redirects_once() {
    let (url, backend) = spawn_backend(Backend::new(StatusCode::OK).with_refresh_delay(3_000)).await;
    let navigator = Arc::new(WatchNavigator::new());
    let gw = SessionGateway::new(ClientConfig::new(&url).with_timeout(1))
        .unwrap()
        .with_navigator(navigator.clone() as Arc<dyn LoginNavigator>);

    let err = PropertiesApi::new(&gw).list().await.unwrap_err();
    assert!(matches!(err, ClientError::SessionExpired), "got {err:?}");
    assert_eq!(backend.property_hits.load(Ordering::SeqCst), 1);
    assert_eq!(backend.refresh_calls.load(Ordering::SeqCst), 1);
    assert_eq!(navigator.redirects(), 1);
}

#[tokio::test]
async fn test_retry_resends_method_body_and_headers() {
    let (url, backend) = spawn_backend(Backend::new(StatusCode::OK)).await;
    let (gw, nav) = gateway(&url);

    let mut headers = http::HeaderMap::new();
    headers.insert("x-desk-id", http::HeaderValue::from_static("front-1"));
    let options = RequestOptions::default().with_headers(headers);

    let value: Value = gw
        .request(Method::POST, "/echo", Some(&json!({ "k": 1 })), &options)
        .await
        .unwrap();
    assert_eq!(value["success"], true);

    let seen = backend.echoed.lock().unwrap().clone();
    let expected = (r#"{"k":1}"#.to_string(), Some("front-1".to_string()));
    assert_eq!(seen, vec![expected.clone(), expected]);
    assert_eq!(backend.refresh_calls.load(Ordering::SeqCst), 1);
    assert_eq!(nav.redirects(), 0);
}

#[tokio::test]
async fn test_empty_body_is_success() {
    let (url, _) = spawn_backend(Backend::new(StatusCode::OK)).await;
    let (gw, _) = gateway(&url);

    let value: Value = gw.get("/no-content").await.unwrap();
    assert_eq!(value, json!({ "success": true }));
}

#[tokio::test]
async fn test_error_message_precedence() {
    let (url, _) = spawn_backend(Backend::new(StatusCode::OK)).await;
    let (gw, _) = gateway(&url);

    let err = gw.get::<Value>("/bad-request").await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    assert_eq!(err.message(), "checkOut must be after checkIn");
    assert_eq!(err.details().unwrap()["details"]["field"], "checkOut");

    let err = gw.get::<Value>("/bare-500").await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    assert_eq!(err.message(), "HTTP 500");
    assert!(err.details().is_none());
}

#[tokio::test]
async fn test_timeout_and_cancellation() {
    let (url, _) = spawn_backend(Backend::new(StatusCode::OK)).await;
    let (gw, _) = gateway(&url);

    let options = RequestOptions::default().with_timeout(Duration::from_millis(100));
    let err = gw
        .request::<Value, ()>(Method::GET, "/slow", None, &options)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Timeout), "got {err:?}");

    let token = CancellationToken::new();
    let options = RequestOptions::default().with_cancel(token.clone());
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        token.cancel();
    });
    let err = gw
        .request::<Value, ()>(Method::GET, "/slow", None, &options)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Cancelled), "got {err:?}");
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let (gw, nav) = gateway(&format!("http://{addr}"));
    let err = gw.get::<Value>("/properties").await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)), "got {err:?}");
    assert_eq!(err.status(), None);
    assert_eq!(err.message(), "Network error");
    assert_eq!(nav.redirects(), 0);
}
