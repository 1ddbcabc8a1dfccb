//! End-to-end smoke tests for the full homecontrold stack.
//!
//! Each test wires the demo home, the real services and the real axum router,
//! then exercises the HTTP layer via `tower::ServiceExt::oneshot`; no TCP
//! port is bound and the simulator is not started.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use homecontrol_adapter_http_axum::router;
use homecontrol_adapter_http_axum::state::AppState;
use homecontrol_adapter_virtual::{RandomNoise, demo_home};
use homecontrol_app::event_bus::InProcessEventBus;
use homecontrol_app::ports::UnavailableInterpreter;
use homecontrol_app::services::home_service::HomeService;

/// Build a fully-wired router around the demo home.
fn app() -> Router {
    let event_bus = Arc::new(InProcessEventBus::new(256));
    let home = demo_home().expect("demo home should be valid");
    let service = Arc::new(HomeService::new(
        home,
        Arc::clone(&event_bus),
        RandomNoise::seeded(7, 0.0),
    ));
    router::build(AppState::new(service, UnavailableInterpreter, event_bus))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn device_id(app: &Router, name: &str) -> String {
    let (_, devices) = send(app, get("/api/devices")).await;
    devices
        .as_array()
        .unwrap()
        .iter()
        .find(|d| d["name"] == name)
        .unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string()
}

async fn switch_to_remote(app: &Router) {
    let (_, mut settings) = send(app, get("/api/settings")).await;
    settings["control_mode"] = json!("remote");
    let (status, _) = send(app, json_request("PUT", "/api/settings", &settings)).await;
    assert_eq!(status, StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Health & snapshot
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let response = app().oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn should_serve_demo_home_snapshot() {
    let app = app();

    let (status, home) = send(&app, get("/api/home")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(home["rooms"].as_array().unwrap().len(), 4);
    assert_eq!(home["devices"].as_array().unwrap().len(), 4);
    assert_eq!(home["tank"]["mode"], "auto");
    assert_eq!(home["settings"]["control_mode"], "manual");
    assert!(home["settings"].get("wifi_password").is_none());
    assert!(home["pending_confirmation"].is_null());
}

// ---------------------------------------------------------------------------
// Control gate
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_refuse_device_toggle_in_manual_mode() {
    let app = app();
    let id = device_id(&app, "Main Light").await;

    let (status, notification) =
        send(&app, empty("POST", &format!("/api/devices/{id}/toggle"))).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        notification["message"],
        "Switch to Remote Mode to control devices."
    );
}

#[tokio::test]
async fn should_toggle_device_after_switching_to_remote_mode() {
    let app = app();
    switch_to_remote(&app).await;
    let id = device_id(&app, "Main Light").await;

    let (status, device) = send(&app, empty("POST", &format!("/api/devices/{id}/toggle"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(device["is_on"], true);

    let (_, logs) = send(&app, get("/api/logs?limit=5")).await;
    let messages: Vec<&str> = logs
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|entry| entry["message"].as_str())
        .collect();
    assert!(messages.iter().any(|m| m.contains("Main Light")));
}

#[tokio::test]
async fn should_refuse_pump_toggle_while_tank_is_automatic() {
    let app = app();
    switch_to_remote(&app).await;

    let (status, notification) = send(&app, empty("POST", "/api/tank/pump")).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        notification["message"],
        "Switch Water Tank to MANUAL mode to control pump."
    );
}

// ---------------------------------------------------------------------------
// Confirmation flow
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_delete_device_after_confirmation() {
    let app = app();
    let id = device_id(&app, "Ceiling Fan").await;

    let (status, pending) = send(&app, empty("DELETE", &format!("/api/devices/{id}"))).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(pending["title"], "Delete Device");

    let (status, _) = send(&app, empty("POST", "/api/confirmation")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, get(&format!("/api/devices/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_refuse_deleting_the_last_room() {
    let app = app();
    let (_, rooms) = send(&app, get("/api/rooms")).await;
    let ids: Vec<String> = rooms
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap().to_string())
        .collect();

    let (last, others) = ids.split_last().unwrap();
    for id in others {
        let (status, _) = send(&app, empty("DELETE", &format!("/api/rooms/{id}"))).await;
        assert_eq!(status, StatusCode::ACCEPTED);
        let (status, _) = send(&app, empty("POST", "/api/confirmation")).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    let (status, notification) = send(&app, empty("DELETE", &format!("/api/rooms/{last}"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        notification["message"],
        "Cannot delete the only remaining room."
    );

    let (_, home) = send(&app, get("/api/home")).await;
    assert_eq!(home["rooms"].as_array().unwrap().len(), 1);
    assert_eq!(home["active_room"], last.as_str());
}

#[tokio::test]
async fn should_report_unavailable_command_assistant() {
    let app = app();

    let (status, reply) = send(
        &app,
        json_request("POST", "/api/commands", &json!({ "prompt": "lights on" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply["understood"], false);
    assert_eq!(reply["outcome"]["outcome"], "ignored");
}
