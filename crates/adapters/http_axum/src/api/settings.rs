//! JSON handlers for settings.

use axum::Json;
use axum::extract::State;

use homecontrol_app::ports::{CommandInterpreter, EventPublisher, SimulationNoise};
use homecontrol_domain::settings::Settings;

use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/settings`: the Wi-Fi password is never returned.
pub async fn show<P, N, I>(State(state): State<AppState<P, N, I>>) -> Json<Settings>
where
    P: EventPublisher + Send + Sync + 'static,
    N: SimulationNoise + 'static,
    I: CommandInterpreter + 'static,
{
    Json(state.home_service.settings())
}

/// `PUT /api/settings`
pub async fn update<P, N, I>(
    State(state): State<AppState<P, N, I>>,
    Json(settings): Json<Settings>,
) -> Result<Json<Settings>, ApiError>
where
    P: EventPublisher + Send + Sync + 'static,
    N: SimulationNoise + 'static,
    I: CommandInterpreter + 'static,
{
    let updated = state.home_service.update_settings(settings).await?;
    Ok(Json(updated))
}
