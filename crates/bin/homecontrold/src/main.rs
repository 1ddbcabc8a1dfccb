//! # homecontrold: homecontrol daemon
//!
//! Composition root that wires the adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (`homecontrol.toml`, environment overrides)
//! - Initialise `tracing` from the configured filter
//! - Seed the demo home and the simulation noise source
//! - Construct the home service and start the tank simulator
//! - Build the axum router and serve until SIGINT
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use homecontrol_adapter_http_axum::router;
use homecontrol_adapter_http_axum::state::AppState;
use homecontrol_adapter_virtual::{RandomNoise, demo_home};
use homecontrol_app::event_bus::InProcessEventBus;
use homecontrol_app::ports::UnavailableInterpreter;
use homecontrol_app::services::home_service::HomeService;
use homecontrol_app::simulator::TankSimulator;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Event bus
    let event_bus = Arc::new(InProcessEventBus::new(config.simulation.event_capacity));

    // Simulation
    let noise = match config.simulation.seed {
        Some(seed) => RandomNoise::seeded(seed, config.simulation.drain_probability),
        None => RandomNoise::from_entropy(config.simulation.drain_probability),
    };
    let home = demo_home()?;
    let home_service = Arc::new(HomeService::new(home, Arc::clone(&event_bus), noise));
    let simulator = TankSimulator::start(Arc::clone(&home_service), config.tick_period());

    tracing::warn!("no command interpreter configured, natural-language commands are unavailable");

    // HTTP
    let state = AppState::new(home_service, UnavailableInterpreter, event_bus);
    let app = router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "homecontrold listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    simulator.stop().await;
    tracing::info!("homecontrold stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
