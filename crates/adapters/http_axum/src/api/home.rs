//! `GET /api/home`: everything the panel renders, in one document.

use axum::Json;
use axum::extract::State;

use homecontrol_app::ports::{CommandInterpreter, EventPublisher, SimulationNoise};
use homecontrol_domain::home::HomeSnapshot;

use crate::state::AppState;

pub async fn show<P, N, I>(State(state): State<AppState<P, N, I>>) -> Json<HomeSnapshot>
where
    P: EventPublisher + Send + Sync + 'static,
    N: SimulationNoise + 'static,
    I: CommandInterpreter + 'static,
{
    Json(state.home_service.snapshot())
}
