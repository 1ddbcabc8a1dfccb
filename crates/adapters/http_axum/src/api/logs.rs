//! `GET /api/logs`: the activity feed.

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;

use homecontrol_app::ports::{CommandInterpreter, EventPublisher, SimulationNoise};
use homecontrol_domain::log::LogEntry;

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LogQuery {
    /// Only the `limit` most recent entries.
    pub limit: Option<usize>,
}

pub async fn list<P, N, I>(
    State(state): State<AppState<P, N, I>>,
    Query(query): Query<LogQuery>,
) -> Json<Vec<LogEntry>>
where
    P: EventPublisher + Send + Sync + 'static,
    N: SimulationNoise + 'static,
    I: CommandInterpreter + 'static,
{
    Json(state.home_service.logs(query.limit))
}
