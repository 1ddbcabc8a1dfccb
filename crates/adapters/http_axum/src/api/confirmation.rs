//! JSON handlers for the confirmation flow of destructive operations.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use homecontrol_app::ports::{CommandInterpreter, EventPublisher, SimulationNoise};
use homecontrol_domain::confirmation::PendingConfirmation;
use homecontrol_domain::home::Outcome;

use crate::error::ErrorBody;
use crate::state::AppState;

/// Request body for `POST /api/confirmation`.
#[derive(Debug, Deserialize)]
pub struct ConfirmRequest {
    /// Authorization phrase, required when the confirmation asks for it.
    pub input: Option<String>,
}

/// Possible responses from the show endpoint.
pub enum ShowResponse {
    Ok(Json<PendingConfirmation>),
    NoContent,
}

impl IntoResponse for ShowResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// Possible responses from the confirm and cancel endpoints.
pub enum ConfirmResponse {
    NoContent,
    Rejected(&'static str),
}

impl IntoResponse for ConfirmResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
            Self::Rejected(reason) => (
                StatusCode::CONFLICT,
                Json(ErrorBody {
                    error: reason.to_string(),
                }),
            )
                .into_response(),
        }
    }
}

/// `GET /api/confirmation`
pub async fn show<P, N, I>(State(state): State<AppState<P, N, I>>) -> ShowResponse
where
    P: EventPublisher + Send + Sync + 'static,
    N: SimulationNoise + 'static,
    I: CommandInterpreter + 'static,
{
    match state.home_service.pending_confirmation() {
        Some(pending) => ShowResponse::Ok(Json(pending)),
        None => ShowResponse::NoContent,
    }
}

/// `POST /api/confirmation`
///
/// The body is optional; a wrong phrase keeps the confirmation pending.
pub async fn confirm<P, N, I>(
    State(state): State<AppState<P, N, I>>,
    body: Option<Json<ConfirmRequest>>,
) -> Response
where
    P: EventPublisher + Send + Sync + 'static,
    N: SimulationNoise + 'static,
    I: CommandInterpreter + 'static,
{
    let input = body.and_then(|Json(req)| req.input);
    match state.home_service.confirm(input.as_deref()).await {
        Outcome::Applied => ConfirmResponse::NoContent.into_response(),
        Outcome::Advisory { notification } => {
            (StatusCode::CONFLICT, Json(notification)).into_response()
        }
        Outcome::AwaitingConfirmation { .. } | Outcome::Ignored => {
            ConfirmResponse::Rejected("nothing to confirm or authorization phrase mismatch")
                .into_response()
        }
    }
}

/// `DELETE /api/confirmation`
pub async fn cancel<P, N, I>(State(state): State<AppState<P, N, I>>) -> ConfirmResponse
where
    P: EventPublisher + Send + Sync + 'static,
    N: SimulationNoise + 'static,
    I: CommandInterpreter + 'static,
{
    if state.home_service.cancel_confirmation().await {
        ConfirmResponse::NoContent
    } else {
        ConfirmResponse::Rejected("nothing to cancel")
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use homecontrol_domain::id::DeviceId;

    use crate::test_support::{app, remote_app};

    #[tokio::test]
    async fn should_report_no_pending_confirmation() {
        let (router, _) = app();

        let response = router
            .oneshot(Request::get("/api/confirmation").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn should_delete_device_once_confirmed() {
        let (router, service) = remote_app();
        let light: DeviceId = service.list_devices()[0].id;

        let response = router
            .clone()
            .oneshot(
                Request::delete(format!("/api/devices/{light}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert!(service.get_device(light).is_ok());

        let response = router
            .oneshot(Request::post("/api/confirmation").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(service.get_device(light).is_err());
    }

    #[tokio::test]
    async fn should_keep_device_when_confirmation_cancelled() {
        let (router, service) = remote_app();
        let light = service.list_devices()[0].id;
        service.request_delete_device(light).await.unwrap();

        let response = router
            .clone()
            .oneshot(Request::delete("/api/confirmation").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = router
            .oneshot(Request::post("/api/confirmation").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert!(service.get_device(light).is_ok());
    }
}
