//! Tank simulator: the periodic task driving [`HomeService::tick`].

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::ports::{EventPublisher, SimulationNoise};
use crate::services::home_service::HomeService;

/// Default tick period.
pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

/// Starts the periodic tank simulation.
pub struct TankSimulator;

impl TankSimulator {
    /// Spawn the simulation loop on the current tokio runtime.
    ///
    /// The first tick fires one `period` after start. Ticks missed because
    /// the runtime was busy are skipped, not replayed.
    pub fn start<P, N>(service: Arc<HomeService<P, N>>, period: Duration) -> SimulatorHandle
    where
        P: EventPublisher + Send + Sync + 'static,
        N: SimulationNoise + 'static,
    {
        let (shutdown, mut stop) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = &mut stop => break,
                    _ = interval.tick() => {
                        service.tick().await;
                    }
                }
            }
            tracing::debug!("tank simulator stopped");
        });
        tracing::info!(?period, "tank simulator started");
        SimulatorHandle {
            shutdown: Some(shutdown),
            task: Some(task),
        }
    }
}

/// Handle on a running simulator. Dropping it aborts the task.
pub struct SimulatorHandle {
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl SimulatorHandle {
    /// Ask the loop to stop and wait for it to finish its current tick.
    pub async fn stop(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(task) = self.task.take() {
            if let Err(err) = task.await {
                tracing::warn!(error = %err, "tank simulator task failed");
            }
        }
    }

    /// Whether the loop is still running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for SimulatorHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::debug!("tank simulator task aborted");
        }
    }
}
