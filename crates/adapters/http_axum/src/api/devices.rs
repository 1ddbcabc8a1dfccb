//! JSON handlers for devices.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use homecontrol_app::ports::{CommandInterpreter, EventPublisher, SimulationNoise};
use homecontrol_domain::device::{Device, DeviceKind};
use homecontrol_domain::id::{DeviceId, RoomId};

use super::{OutcomeResponse, parse_id};
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for adding a device to the active room.
#[derive(Debug, Deserialize)]
pub struct CreateDeviceRequest {
    pub name: String,
    pub kind: DeviceKind,
}

/// Request body for the settings-panel device editor.
#[derive(Debug, Deserialize)]
pub struct UpdateDeviceRequest {
    pub room_id: RoomId,
    pub kind: DeviceKind,
    pub name: String,
    pub is_on: bool,
    pub value: u8,
    #[serde(default)]
    pub is_faulty: bool,
    pub ip_address: Option<String>,
    pub gpio_pin: u8,
}

/// Request body for brightness / speed changes.
#[derive(Debug, Deserialize)]
pub struct SetValueRequest {
    pub value: u8,
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Device>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `GET /api/devices`
pub async fn list<P, N, I>(State(state): State<AppState<P, N, I>>) -> Json<Vec<Device>>
where
    P: EventPublisher + Send + Sync + 'static,
    N: SimulationNoise + 'static,
    I: CommandInterpreter + 'static,
{
    Json(state.home_service.list_devices())
}

/// `GET /api/devices/{id}`
pub async fn get<P, N, I>(
    State(state): State<AppState<P, N, I>>,
    Path(id): Path<String>,
) -> Result<Json<Device>, ApiError>
where
    P: EventPublisher + Send + Sync + 'static,
    N: SimulationNoise + 'static,
    I: CommandInterpreter + 'static,
{
    let device_id: DeviceId = parse_id(&id)?;
    Ok(Json(state.home_service.get_device(device_id)?))
}

/// `POST /api/devices`
pub async fn create<P, N, I>(
    State(state): State<AppState<P, N, I>>,
    Json(req): Json<CreateDeviceRequest>,
) -> Result<CreateResponse, ApiError>
where
    P: EventPublisher + Send + Sync + 'static,
    N: SimulationNoise + 'static,
    I: CommandInterpreter + 'static,
{
    let device = state.home_service.add_device(&req.name, req.kind).await?;
    Ok(CreateResponse::Created(Json(device)))
}

/// `PUT /api/devices/{id}`
pub async fn update<P, N, I>(
    State(state): State<AppState<P, N, I>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateDeviceRequest>,
) -> Result<Json<Device>, ApiError>
where
    P: EventPublisher + Send + Sync + 'static,
    N: SimulationNoise + 'static,
    I: CommandInterpreter + 'static,
{
    let device_id: DeviceId = parse_id(&id)?;
    let device = Device {
        id: device_id,
        room_id: req.room_id,
        kind: req.kind,
        name: req.name.trim().to_string(),
        is_on: req.is_on,
        value: req.value,
        is_faulty: req.is_faulty,
        ip_address: req.ip_address,
        gpio_pin: req.gpio_pin,
    };
    let updated = state.home_service.update_device(device).await?;
    Ok(Json(updated))
}

/// `DELETE /api/devices/{id}`: opens a confirmation.
pub async fn delete<P, N, I>(
    State(state): State<AppState<P, N, I>>,
    Path(id): Path<String>,
) -> Result<OutcomeResponse<()>, ApiError>
where
    P: EventPublisher + Send + Sync + 'static,
    N: SimulationNoise + 'static,
    I: CommandInterpreter + 'static,
{
    let device_id: DeviceId = parse_id(&id)?;
    let outcome = state.home_service.request_delete_device(device_id).await?;
    OutcomeResponse::from_outcome(outcome, || Ok(()))
}

/// `POST /api/devices/{id}/toggle`
pub async fn toggle<P, N, I>(
    State(state): State<AppState<P, N, I>>,
    Path(id): Path<String>,
) -> Result<OutcomeResponse<Device>, ApiError>
where
    P: EventPublisher + Send + Sync + 'static,
    N: SimulationNoise + 'static,
    I: CommandInterpreter + 'static,
{
    let device_id: DeviceId = parse_id(&id)?;
    let outcome = state.home_service.toggle_device(device_id).await?;
    OutcomeResponse::from_outcome(outcome, || state.home_service.get_device(device_id))
}

/// `PUT /api/devices/{id}/value`: `204` when the control mode ignores it.
pub async fn set_value<P, N, I>(
    State(state): State<AppState<P, N, I>>,
    Path(id): Path<String>,
    Json(req): Json<SetValueRequest>,
) -> Result<OutcomeResponse<Device>, ApiError>
where
    P: EventPublisher + Send + Sync + 'static,
    N: SimulationNoise + 'static,
    I: CommandInterpreter + 'static,
{
    let device_id: DeviceId = parse_id(&id)?;
    let outcome = state
        .home_service
        .set_device_value(device_id, req.value)
        .await?;
    OutcomeResponse::from_outcome(outcome, || state.home_service.get_device(device_id))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use homecontrol_domain::device::DeviceKind;
    use homecontrol_domain::id::DeviceId;

    use crate::test_support::{app, remote_app};

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn should_refuse_toggle_with_conflict_in_manual_mode() {
        let (router, service) = app();
        let light = service.list_devices()[0].id;

        let response = router
            .oneshot(
                Request::post(format!("/api/devices/{light}/toggle"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Switch to Remote Mode to control devices.");
        assert_eq!(json["kind"], "alert");
    }

    #[tokio::test]
    async fn should_toggle_device_in_remote_mode() {
        let (router, service) = remote_app();
        let light = service.list_devices()[0].id;

        let response = router
            .oneshot(
                Request::post(format!("/api/devices/{light}/toggle"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["is_on"], true);
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_device() {
        let (router, _) = remote_app();

        let response = router
            .oneshot(
                Request::post(format!("/api/devices/{}/toggle", DeviceId::new()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_reject_out_of_range_fan_speed() {
        let (router, service) = remote_app();
        let fan = service
            .list_devices()
            .into_iter()
            .find(|d| d.kind == DeviceKind::Fan)
            .unwrap()
            .id;

        let response = router
            .oneshot(
                Request::put(format!("/api/devices/{fan}/value"))
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"value":7}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_ignore_value_change_in_manual_mode() {
        let (router, service) = app();
        let light = service.list_devices()[0].id;

        let response = router
            .oneshot(
                Request::put(format!("/api/devices/{light}/value"))
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"value":10}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(service.get_device(light).unwrap().value, 80);
    }

    #[tokio::test]
    async fn should_add_device_to_active_room() {
        let (router, service) = app();
        let active = service.snapshot().active_room;

        let response = router
            .oneshot(
                Request::post("/api/devices")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"name":"Desk Lamp","kind":"light"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        assert_eq!(json["room_id"], active.to_string());
        assert_eq!(json["value"], 50);
    }
}
