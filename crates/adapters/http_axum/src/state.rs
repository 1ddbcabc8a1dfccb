//! Shared application state for axum handlers.

use std::sync::Arc;

use homecontrol_app::event_bus::InProcessEventBus;
use homecontrol_app::ports::{CommandInterpreter, EventPublisher, SimulationNoise};
use homecontrol_app::services::command_service::CommandService;
use homecontrol_app::services::home_service::HomeService;

/// Application state shared across all axum handlers.
///
/// Generic over the event publisher, the noise source and the command
/// interpreter. Cloning only bumps the `Arc` counts, so none of them needs
/// to be `Clone`.
pub struct AppState<P, N, I> {
    /// Every home operation.
    pub home_service: Arc<HomeService<P, N>>,
    /// Natural-language commands.
    pub command_service: Arc<CommandService<I, P, N>>,
    /// Event bus used for SSE subscriptions.
    pub event_bus: Arc<InProcessEventBus>,
}

impl<P, N, I> Clone for AppState<P, N, I> {
    fn clone(&self) -> Self {
        Self {
            home_service: Arc::clone(&self.home_service),
            command_service: Arc::clone(&self.command_service),
            event_bus: Arc::clone(&self.event_bus),
        }
    }
}

impl<P, N, I> AppState<P, N, I>
where
    P: EventPublisher + Send + Sync + 'static,
    N: SimulationNoise + 'static,
    I: CommandInterpreter + 'static,
{
    /// Create the state from a shared home service.
    ///
    /// The home service is shared with the tank simulator, so it is passed
    /// in already wrapped.
    pub fn new(
        home_service: Arc<HomeService<P, N>>,
        interpreter: I,
        event_bus: Arc<InProcessEventBus>,
    ) -> Self {
        let command_service = Arc::new(CommandService::new(
            interpreter,
            Arc::clone(&home_service),
        ));
        Self {
            home_service,
            command_service,
            event_bus,
        }
    }
}
