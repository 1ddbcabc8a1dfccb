//! JSON handlers for rooms.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use homecontrol_app::ports::{CommandInterpreter, EventPublisher, SimulationNoise};
use homecontrol_domain::id::RoomId;
use homecontrol_domain::room::{Room, RoomIcon};

use super::{OutcomeResponse, parse_id};
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating a room.
#[derive(Debug, Deserialize)]
pub struct CreateRoomRequest {
    pub name: String,
    /// Icon key such as `"Sofa"`; unknown keys render as a box.
    pub icon: Option<String>,
    #[serde(default)]
    pub has_tank_widget: bool,
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Room>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `GET /api/rooms`
pub async fn list<P, N, I>(State(state): State<AppState<P, N, I>>) -> Json<Vec<Room>>
where
    P: EventPublisher + Send + Sync + 'static,
    N: SimulationNoise + 'static,
    I: CommandInterpreter + 'static,
{
    Json(state.home_service.list_rooms())
}

/// `POST /api/rooms`
pub async fn create<P, N, I>(
    State(state): State<AppState<P, N, I>>,
    Json(req): Json<CreateRoomRequest>,
) -> Result<CreateResponse, ApiError>
where
    P: EventPublisher + Send + Sync + 'static,
    N: SimulationNoise + 'static,
    I: CommandInterpreter + 'static,
{
    let icon = req.icon.as_deref().map_or_else(RoomIcon::default, RoomIcon::from_key);
    let room = state
        .home_service
        .add_room(&req.name, icon, req.has_tank_widget)
        .await?;
    Ok(CreateResponse::Created(Json(room)))
}

/// `POST /api/rooms/{id}/select`
pub async fn select<P, N, I>(
    State(state): State<AppState<P, N, I>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError>
where
    P: EventPublisher + Send + Sync + 'static,
    N: SimulationNoise + 'static,
    I: CommandInterpreter + 'static,
{
    let room_id: RoomId = parse_id(&id)?;
    state.home_service.select_room(room_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /api/rooms/{id}`: opens a confirmation, refused for the last room.
pub async fn delete<P, N, I>(
    State(state): State<AppState<P, N, I>>,
    Path(id): Path<String>,
) -> Result<OutcomeResponse<()>, ApiError>
where
    P: EventPublisher + Send + Sync + 'static,
    N: SimulationNoise + 'static,
    I: CommandInterpreter + 'static,
{
    let room_id: RoomId = parse_id(&id)?;
    let outcome = state.home_service.request_delete_room(room_id).await?;
    OutcomeResponse::from_outcome(outcome, || Ok(()))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::test_support::app;

    #[tokio::test]
    async fn should_create_room_with_icon_fallback() {
        let (router, _) = app();

        let response = router
            .oneshot(
                Request::post("/api/rooms")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"name":"Garage","icon":"Rocket"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["name"], "Garage");
        assert_eq!(json["icon"], "box");
        assert_eq!(json["has_tank_widget"], false);
    }

    #[tokio::test]
    async fn should_reject_blank_room_name() {
        let (router, _) = app();

        let response = router
            .oneshot(
                Request::post("/api/rooms")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"name":"   "}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_open_confirmation_when_deleting_room() {
        let (router, service) = app();
        let room_id = service.list_rooms()[0].id;

        let response = router
            .oneshot(
                Request::delete(format!("/api/rooms/{room_id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert_eq!(service.list_rooms().len(), 2);
        assert!(service.pending_confirmation().is_some());
    }

    #[tokio::test]
    async fn should_return_bad_request_for_malformed_room_id() {
        let (router, _) = app();

        let response = router
            .oneshot(
                Request::post("/api/rooms/not-a-uuid/select")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
