//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod commands;
#[allow(clippy::missing_errors_doc)]
pub mod confirmation;
#[allow(clippy::missing_errors_doc)]
pub mod devices;
pub mod home;
pub mod logs;
#[allow(clippy::missing_errors_doc)]
pub mod rooms;
#[allow(clippy::missing_errors_doc)]
pub mod settings;
pub mod sse;
#[allow(clippy::missing_errors_doc)]
pub mod tank;

use std::str::FromStr;

use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use serde::Serialize;

use homecontrol_app::ports::{CommandInterpreter, EventPublisher, SimulationNoise};
use homecontrol_domain::confirmation::PendingConfirmation;
use homecontrol_domain::error::HomeControlError;
use homecontrol_domain::home::Outcome;
use homecontrol_domain::notification::Notification;

use crate::error::ApiError;
use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<P, N, I>() -> Router<AppState<P, N, I>>
where
    P: EventPublisher + Send + Sync + 'static,
    N: SimulationNoise + 'static,
    I: CommandInterpreter + 'static,
{
    Router::new()
        .route("/home", get(home::show::<P, N, I>))
        // Rooms
        .route(
            "/rooms",
            get(rooms::list::<P, N, I>).post(rooms::create::<P, N, I>),
        )
        .route("/rooms/{id}", axum::routing::delete(rooms::delete::<P, N, I>))
        .route("/rooms/{id}/select", post(rooms::select::<P, N, I>))
        // Devices
        .route(
            "/devices",
            get(devices::list::<P, N, I>).post(devices::create::<P, N, I>),
        )
        .route(
            "/devices/{id}",
            get(devices::get::<P, N, I>)
                .put(devices::update::<P, N, I>)
                .delete(devices::delete::<P, N, I>),
        )
        .route("/devices/{id}/toggle", post(devices::toggle::<P, N, I>))
        .route("/devices/{id}/value", put(devices::set_value::<P, N, I>))
        // Tank
        .route("/tank", get(tank::show::<P, N, I>))
        .route("/tank/mode", post(tank::toggle_mode::<P, N, I>))
        .route("/tank/pump", post(tank::toggle_pump::<P, N, I>))
        .route("/sync", post(tank::sync::<P, N, I>))
        // Settings & log
        .route(
            "/settings",
            get(settings::show::<P, N, I>).put(settings::update::<P, N, I>),
        )
        .route("/logs", get(logs::list::<P, N, I>))
        // Confirmation flow
        .route(
            "/confirmation",
            get(confirmation::show::<P, N, I>)
                .post(confirmation::confirm::<P, N, I>)
                .delete(confirmation::cancel::<P, N, I>),
        )
        // Commands & live stream
        .route("/commands", post(commands::execute::<P, N, I>))
        .route("/events/stream", get(sse::stream::<P, N, I>))
}

/// Parse an identifier taken from the request path.
pub(crate) fn parse_id<T: FromStr>(raw: &str) -> Result<T, ApiError> {
    T::from_str(raw).map_err(|_| ApiError::invalid_id(raw))
}

/// Response for operations that can be refused or deferred.
pub enum OutcomeResponse<T> {
    /// Applied; carries the resulting resource.
    Ok(Json<T>),
    /// Waiting for `POST /api/confirmation`.
    Accepted(Json<PendingConfirmation>),
    /// Refused by a guard; carries the advisory notification.
    Refused(Json<Notification>),
    /// Nothing happened.
    NoContent,
}

impl<T> OutcomeResponse<T> {
    /// Map an [`Outcome`], loading the resource only when it was applied.
    pub(crate) fn from_outcome(
        outcome: Outcome,
        applied: impl FnOnce() -> Result<T, HomeControlError>,
    ) -> Result<Self, ApiError> {
        Ok(match outcome {
            Outcome::Applied => Self::Ok(Json(applied()?)),
            Outcome::AwaitingConfirmation { confirmation } => Self::Accepted(Json(confirmation)),
            Outcome::Advisory { notification } => Self::Refused(Json(notification)),
            Outcome::Ignored => Self::NoContent,
        })
    }
}

impl<T: Serialize> IntoResponse for OutcomeResponse<T> {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
            Self::Accepted(json) => (StatusCode::ACCEPTED, json).into_response(),
            Self::Refused(json) => (StatusCode::CONFLICT, json).into_response(),
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}
