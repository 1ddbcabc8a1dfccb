//! Shared fixtures for handler tests.

use std::sync::Arc;

use axum::Router;

use homecontrol_app::event_bus::InProcessEventBus;
use homecontrol_app::ports::{SimulationNoise, UnavailableInterpreter};
use homecontrol_app::services::home_service::HomeService;
use homecontrol_domain::device::{Device, DeviceKind};
use homecontrol_domain::home::Home;
use homecontrol_domain::room::{Room, RoomIcon};
use homecontrol_domain::settings::{ControlMode, Settings};
use homecontrol_domain::tank::TankState;

use crate::state::AppState;

/// Never drains, no jitter.
pub(crate) struct StillWater;

impl SimulationNoise for StillWater {
    fn drains(&self) -> bool {
        false
    }

    fn sync_jitter(&self) -> f64 {
        0.0
    }
}

pub(crate) type TestService = HomeService<Arc<InProcessEventBus>, StillWater>;
pub(crate) type TestState = AppState<Arc<InProcessEventBus>, StillWater, UnavailableInterpreter>;

fn home(control_mode: ControlMode) -> Home {
    let living = Room::builder()
        .name("Living Room")
        .icon(RoomIcon::Sofa)
        .build()
        .unwrap();
    let utility = Room::builder()
        .name("Utility")
        .icon(RoomIcon::Droplets)
        .has_tank_widget(true)
        .build()
        .unwrap();
    let devices = vec![
        Device::builder()
            .room_id(living.id)
            .name("Main Light")
            .value(80)
            .build()
            .unwrap(),
        Device::builder()
            .room_id(living.id)
            .kind(DeviceKind::Fan)
            .name("Ceiling Fan")
            .value(3)
            .build()
            .unwrap(),
        Device::builder()
            .room_id(utility.id)
            .kind(DeviceKind::Motor)
            .name("Main Pump")
            .value(0)
            .build()
            .unwrap(),
    ];
    let settings = Settings {
        control_mode,
        ..Settings::default()
    };
    Home::new(vec![living, utility], devices, TankState::default(), settings).unwrap()
}

pub(crate) fn state(remote: bool) -> (TestState, Arc<InProcessEventBus>) {
    let control_mode = if remote {
        ControlMode::Remote
    } else {
        ControlMode::Manual
    };
    let event_bus = Arc::new(InProcessEventBus::new(64));
    let service = Arc::new(HomeService::new(
        home(control_mode),
        Arc::clone(&event_bus),
        StillWater,
    ));
    let state = AppState::new(service, UnavailableInterpreter, Arc::clone(&event_bus));
    (state, event_bus)
}

fn router(remote: bool) -> (Router, Arc<TestService>) {
    let (state, _) = state(remote);
    let service = Arc::clone(&state.home_service);
    (crate::router::build(state), service)
}

/// Router over a home in manual control mode (the default).
pub(crate) fn app() -> (Router, Arc<TestService>) {
    router(false)
}

/// Router over a home accepting UI commands.
pub(crate) fn remote_app() -> (Router, Arc<TestService>) {
    router(true)
}
