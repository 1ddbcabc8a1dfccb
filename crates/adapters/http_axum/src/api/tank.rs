//! JSON handlers for the water tank and the sensor sync.

use axum::Json;
use axum::extract::State;

use homecontrol_app::ports::{CommandInterpreter, EventPublisher, SimulationNoise};
use homecontrol_domain::tank::TankState;

use super::OutcomeResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/tank`
pub async fn show<P, N, I>(State(state): State<AppState<P, N, I>>) -> Json<TankState>
where
    P: EventPublisher + Send + Sync + 'static,
    N: SimulationNoise + 'static,
    I: CommandInterpreter + 'static,
{
    Json(state.home_service.tank())
}

/// `POST /api/tank/mode`: flip AUTO / MANUAL.
pub async fn toggle_mode<P, N, I>(State(state): State<AppState<P, N, I>>) -> Json<TankState>
where
    P: EventPublisher + Send + Sync + 'static,
    N: SimulationNoise + 'static,
    I: CommandInterpreter + 'static,
{
    Json(state.home_service.toggle_tank_mode().await)
}

/// `POST /api/tank/pump`
pub async fn toggle_pump<P, N, I>(
    State(state): State<AppState<P, N, I>>,
) -> Result<OutcomeResponse<TankState>, ApiError>
where
    P: EventPublisher + Send + Sync + 'static,
    N: SimulationNoise + 'static,
    I: CommandInterpreter + 'static,
{
    let outcome = state.home_service.toggle_pump().await;
    OutcomeResponse::from_outcome(outcome, || Ok(state.home_service.tank()))
}

/// `POST /api/sync`
pub async fn sync<P, N, I>(State(state): State<AppState<P, N, I>>) -> Json<TankState>
where
    P: EventPublisher + Send + Sync + 'static,
    N: SimulationNoise + 'static,
    I: CommandInterpreter + 'static,
{
    Json(state.home_service.system_sync().await)
}
