//! `POST /api/commands`: natural-language device control.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;

use homecontrol_app::ports::{CommandInterpreter, EventPublisher, SimulationNoise};
use homecontrol_app::services::command_service::CommandReply;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    pub prompt: String,
}

pub async fn execute<P, N, I>(
    State(state): State<AppState<P, N, I>>,
    Json(req): Json<CommandRequest>,
) -> Result<Json<CommandReply>, ApiError>
where
    P: EventPublisher + Send + Sync + 'static,
    N: SimulationNoise + 'static,
    I: CommandInterpreter + 'static,
{
    let reply = state.command_service.execute(&req.prompt).await?;
    Ok(Json(reply))
}
