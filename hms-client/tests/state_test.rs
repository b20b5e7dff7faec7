// hms-client/tests/state_test.rs
// App state: persistence, login/logout, property selection

mod common;

use std::sync::Arc;

use common::FakeBackend;
use hms_client::models::{PropertySnapshot, UserSnapshot};
use hms_client::{AppState, SnapshotStore};
use http::{Method, StatusCode};
use serde_json::json;
use tempfile::TempDir;

fn lakeside() -> PropertySnapshot {
    PropertySnapshot {
        id: 7,
        name: "Lakeside".into(),
        city: Some("Pune".into()),
        timezone: None,
    }
}

fn state(dir: &TempDir, backend: Arc<FakeBackend>) -> AppState<FakeBackend> {
    AppState::init(backend, SnapshotStore::new(dir.path()))
}

#[tokio::test]
async fn test_init_restores_snapshots() {
    let dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(dir.path());
    store.save("hms_user", &UserSnapshot::from_email("desk@hotel.test")).unwrap();
    store.save("hms_property", &lakeside()).unwrap();

    let app = state(&dir, Arc::new(FakeBackend::new()));
    assert!(app.is_authenticated());
    assert_eq!(app.current_user().unwrap().email, "desk@hotel.test");
    assert_eq!(app.selected_property(), Some(lakeside()));
}

#[tokio::test]
async fn test_empty_store_is_logged_out() {
    let dir = TempDir::new().unwrap();
    let app = state(&dir, Arc::new(FakeBackend::new()));
    assert!(!app.is_authenticated());
    assert!(app.selected_property().is_none());
}

#[tokio::test]
async fn test_login_looks_up_user() {
    let dir = TempDir::new().unwrap();
    let backend = Arc::new(FakeBackend::new());
    backend.respond(
        Method::GET,
        "/users",
        json!({
            "success": true,
            "data": [
                { "id": 1, "name": "Asha", "email": "asha@hotel.test", "roleId": 1, "roleName": "Admin" },
                { "id": 2, "name": "Ravi", "email": "ravi@hotel.test", "roleId": 2, "roleName": "Front Desk" }
            ]
        }),
    );
    let app = state(&dir, backend);

    let user = app.login("ravi@hotel.test", "secret").await.unwrap();
    assert_eq!(user.id, Some(2));
    assert_eq!(user.role_name.as_deref(), Some("Front Desk"));

    // persisted for the next run
    let reopened = state(&dir, Arc::new(FakeBackend::new()));
    assert_eq!(reopened.current_user(), Some(user));
}

#[tokio::test]
async fn test_login_falls_back_to_email() {
    let dir = TempDir::new().unwrap();
    let backend = Arc::new(FakeBackend::new());
    backend.fail(Method::GET, "/users", StatusCode::FORBIDDEN);
    let app = state(&dir, backend);

    let user = app.login("night.audit@hotel.test", "secret").await.unwrap();
    assert_eq!(user.name.as_deref(), Some("night.audit"));
    assert_eq!(user.role_name.as_deref(), Some("User"));
}

#[tokio::test]
async fn test_login_failure_keeps_logged_out() {
    let dir = TempDir::new().unwrap();
    let backend = Arc::new(FakeBackend::new());
    backend.fail(Method::POST, "/auth/login", StatusCode::UNAUTHORIZED);
    let app = state(&dir, backend);

    assert!(app.login("desk@hotel.test", "wrong").await.is_err());
    assert!(!app.is_authenticated());
}

#[tokio::test]
async fn test_logout_clears_even_when_server_fails() {
    let dir = TempDir::new().unwrap();
    let backend = Arc::new(FakeBackend::new());
    backend.fail(Method::POST, "/auth/logout", StatusCode::INTERNAL_SERVER_ERROR);
    let app = state(&dir, backend);

    app.login("desk@hotel.test", "secret").await.unwrap();
    app.select_property(lakeside()).unwrap();
    let mut rx = app.subscribe();

    app.logout().await.unwrap();

    assert!(rx.has_changed().unwrap());
    let snapshot = rx.borrow_and_update().clone();
    assert!(snapshot.user.is_none());
    assert!(snapshot.property.is_none());

    let store = SnapshotStore::new(dir.path());
    assert!(!store.exists("hms_user"));
    assert!(!store.exists("hms_property"));
}

#[tokio::test]
async fn test_deleting_selected_property_clears_selection() {
    let dir = TempDir::new().unwrap();
    let app = state(&dir, Arc::new(FakeBackend::new()));
    app.select_property(lakeside()).unwrap();

    app.property_deleted(99).unwrap();
    assert_eq!(app.selected_property(), Some(lakeside()));

    app.property_deleted(7).unwrap();
    assert!(app.selected_property().is_none());
    assert!(!SnapshotStore::new(dir.path()).exists("hms_property"));
}

#[tokio::test]
async fn test_first_property_is_selected() {
    let dir = TempDir::new().unwrap();
    let backend = Arc::new(FakeBackend::new());
    backend.respond(
        Method::GET,
        "/properties",
        json!({
            "success": true,
            "data": [
                { "id": 7, "name": "Lakeside", "city": "Pune", "country": "IN", "status": "ACTIVE" },
                { "id": 8, "name": "Hilltop", "city": "Ooty", "country": "IN", "status": "ACTIVE" }
            ]
        }),
    );
    let app = state(&dir, backend.clone());

    let selected = app.ensure_property_selected().await.unwrap().unwrap();
    assert_eq!(selected.id, 7);

    // already selected: no second fetch
    app.ensure_property_selected().await.unwrap();
    assert_eq!(backend.calls().len(), 1);
}

#[tokio::test]
async fn test_verify_session() {
    let dir = TempDir::new().unwrap();
    let backend = Arc::new(FakeBackend::new());
    let app = state(&dir, backend.clone());
    app.login("desk@hotel.test", "secret").await.unwrap();

    assert!(app.verify_session().await.unwrap());
    assert!(app.is_authenticated());

    backend.fail(Method::POST, "/auth/refresh", StatusCode::UNAUTHORIZED);
    assert!(!app.verify_session().await.unwrap());
    assert!(!app.is_authenticated());
}
