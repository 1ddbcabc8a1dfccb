//! Home service: every home operation, serialised behind one lock.
//!
//! The aggregate is mutated under a [`Mutex`] that is never held across an
//! await point: each call runs the synchronous domain operation, collects
//! the queued events, releases the lock and only then publishes.

use std::sync::{Mutex, PoisonError};

use homecontrol_domain::command::DeviceAction;
use homecontrol_domain::confirmation::PendingConfirmation;
use homecontrol_domain::device::{Device, DeviceKind};
use homecontrol_domain::error::{HomeControlError, NotFoundError};
use homecontrol_domain::event::HomeEvent;
use homecontrol_domain::home::{Home, HomeSnapshot, Outcome};
use homecontrol_domain::id::{DeviceId, RoomId};
use homecontrol_domain::log::LogEntry;
use homecontrol_domain::room::{Room, RoomIcon};
use homecontrol_domain::settings::Settings;
use homecontrol_domain::tank::{TankState, TickOutcome};

use crate::ports::{EventPublisher, SimulationNoise};

/// Application service owning the [`Home`] aggregate.
pub struct HomeService<P, N> {
    home: Mutex<Home>,
    publisher: P,
    noise: N,
}

impl<P: EventPublisher, N: SimulationNoise> HomeService<P, N> {
    /// Create a new service around `home`.
    pub fn new(home: Home, publisher: P, noise: N) -> Self {
        Self {
            home: Mutex::new(home),
            publisher,
            noise,
        }
    }

    // ── Queries ────────────────────────────────────────────────────

    #[must_use]
    pub fn snapshot(&self) -> HomeSnapshot {
        self.read(Home::snapshot)
    }

    #[must_use]
    pub fn list_rooms(&self) -> Vec<Room> {
        self.read(|home| home.rooms().to_vec())
    }

    #[must_use]
    pub fn list_devices(&self) -> Vec<Device> {
        self.read(|home| home.devices().to_vec())
    }

    /// Look up a device by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`HomeControlError::NotFound`] when no device with `id` exists.
    pub fn get_device(&self, id: DeviceId) -> Result<Device, HomeControlError> {
        self.read(|home| home.device(id).cloned()).ok_or_else(|| {
            NotFoundError {
                entity: "Device",
                id: id.to_string(),
            }
            .into()
        })
    }

    #[must_use]
    pub fn tank(&self) -> TankState {
        self.read(Home::tank)
    }

    #[must_use]
    pub fn settings(&self) -> Settings {
        self.read(|home| home.settings().clone())
    }

    /// The most recent log entries, oldest first. `None` returns them all.
    #[must_use]
    pub fn logs(&self, limit: Option<usize>) -> Vec<LogEntry> {
        self.read(|home| match limit {
            Some(limit) => home.log().tail(limit).to_vec(),
            None => home.log().entries().to_vec(),
        })
    }

    #[must_use]
    pub fn pending_confirmation(&self) -> Option<PendingConfirmation> {
        self.read(|home| home.pending_confirmation().cloned())
    }

    // ── Devices ────────────────────────────────────────────────────

    /// Flip a device's power.
    ///
    /// # Errors
    ///
    /// Returns [`HomeControlError::NotFound`] for an unknown device.
    #[tracing::instrument(skip(self))]
    pub async fn toggle_device(&self, id: DeviceId) -> Result<Outcome, HomeControlError> {
        let outcome = self.write(|home| home.toggle_device(id)).await?;
        log_refusal(&outcome);
        Ok(outcome)
    }

    /// Set brightness or fan speed.
    ///
    /// # Errors
    ///
    /// Returns [`HomeControlError::NotFound`] for an unknown device and
    /// [`HomeControlError::Validation`] for an out-of-range value.
    #[tracing::instrument(skip(self))]
    pub async fn set_device_value(
        &self,
        id: DeviceId,
        value: u8,
    ) -> Result<Outcome, HomeControlError> {
        self.write(|home| home.set_device_value(id, value)).await
    }

    /// Replace a device and return its stored state.
    ///
    /// # Errors
    ///
    /// Returns [`HomeControlError::Validation`] if invariants fail, or
    /// [`HomeControlError::NotFound`] for an unknown device or room.
    #[tracing::instrument(skip(self, device), fields(device_id = %device.id))]
    pub async fn update_device(&self, device: Device) -> Result<Device, HomeControlError> {
        let id = device.id;
        self.write(|home| home.update_device(device)).await?;
        self.get_device(id)
    }

    /// Add a device to the active room.
    ///
    /// # Errors
    ///
    /// Returns [`HomeControlError::Validation`] for a blank name.
    #[tracing::instrument(skip(self))]
    pub async fn add_device(
        &self,
        name: &str,
        kind: DeviceKind,
    ) -> Result<Device, HomeControlError> {
        let id = self.write(|home| home.add_device(name, kind)).await?;
        tracing::info!(%id, "device added");
        self.get_device(id)
    }

    /// Ask for confirmation before deleting a device.
    ///
    /// # Errors
    ///
    /// Returns [`HomeControlError::NotFound`] for an unknown device.
    #[tracing::instrument(skip(self))]
    pub async fn request_delete_device(&self, id: DeviceId) -> Result<Outcome, HomeControlError> {
        self.write(|home| home.request_delete_device(id)).await
    }

    // ── Rooms ──────────────────────────────────────────────────────

    /// Add a room and return it.
    ///
    /// # Errors
    ///
    /// Returns [`HomeControlError::Validation`] for a blank name.
    #[tracing::instrument(skip(self))]
    pub async fn add_room(
        &self,
        name: &str,
        icon: RoomIcon,
        has_tank_widget: bool,
    ) -> Result<Room, HomeControlError> {
        self.write(|home| {
            let id = home.add_room(name, icon, has_tank_widget)?;
            home.room(id).cloned().ok_or_else(|| {
                HomeControlError::from(NotFoundError {
                    entity: "Room",
                    id: id.to_string(),
                })
            })
        })
        .await
    }

    /// Make `id` the active room.
    ///
    /// # Errors
    ///
    /// Returns [`HomeControlError::NotFound`] for an unknown room.
    #[tracing::instrument(skip(self))]
    pub async fn select_room(&self, id: RoomId) -> Result<(), HomeControlError> {
        self.write(|home| home.select_room(id)).await
    }

    /// Ask for confirmation before deleting a room.
    ///
    /// # Errors
    ///
    /// Returns [`HomeControlError::NotFound`] for an unknown room.
    #[tracing::instrument(skip(self))]
    pub async fn request_delete_room(&self, id: RoomId) -> Result<Outcome, HomeControlError> {
        let outcome = self.write(|home| home.request_delete_room(id)).await?;
        log_refusal(&outcome);
        Ok(outcome)
    }

    // ── Confirmation flow ──────────────────────────────────────────

    #[tracing::instrument(skip(self, input))]
    pub async fn confirm(&self, input: Option<&str>) -> Outcome {
        let outcome = self.write(|home| home.confirm(input)).await;
        if outcome == Outcome::Ignored {
            tracing::debug!("confirmation ignored");
        }
        outcome
    }

    #[tracing::instrument(skip(self))]
    pub async fn cancel_confirmation(&self) -> bool {
        self.write(Home::cancel_confirmation).await
    }

    // ── Settings ───────────────────────────────────────────────────

    /// Replace the settings and return the stored ones.
    ///
    /// # Errors
    ///
    /// Returns [`HomeControlError::Validation`] for invalid settings.
    #[tracing::instrument(skip(self, settings))]
    pub async fn update_settings(&self, settings: Settings) -> Result<Settings, HomeControlError> {
        self.write(|home| home.update_settings(settings)).await?;
        Ok(self.settings())
    }

    // ── Tank ───────────────────────────────────────────────────────

    #[tracing::instrument(skip(self))]
    pub async fn toggle_tank_mode(&self) -> TankState {
        self.write(|home| {
            home.toggle_tank_mode();
            home.tank()
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn toggle_pump(&self) -> Outcome {
        let outcome = self.write(Home::toggle_pump).await;
        log_refusal(&outcome);
        outcome
    }

    /// Advance the tank simulation by one step.
    pub async fn tick(&self) -> TickOutcome {
        let drained = self.noise.drains();
        let outcome = self.write(|home| home.tick(drained)).await;
        if let Some(transition) = outcome.transition {
            tracing::info!(?transition, level = outcome.state.level, "pump transition");
        }
        tracing::trace!(level = outcome.state.level, drained, "tank tick");
        outcome
    }

    /// Re-read the simulated sensors.
    #[tracing::instrument(skip(self))]
    pub async fn system_sync(&self) -> TankState {
        let jitter = self.noise.sync_jitter();
        self.write(|home| {
            home.system_sync(jitter);
            home.tank()
        })
        .await
    }

    // ── Interpreted commands ───────────────────────────────────────

    #[tracing::instrument(skip(self, actions), fields(actions = actions.len()))]
    pub async fn apply_actions(&self, actions: &[DeviceAction]) -> Outcome {
        let outcome = self.write(|home| home.apply_actions(actions)).await;
        log_refusal(&outcome);
        outcome
    }

    // ── Internals ──────────────────────────────────────────────────

    fn read<T>(&self, f: impl FnOnce(&Home) -> T) -> T {
        let home = self.home.lock().unwrap_or_else(PoisonError::into_inner);
        f(&home)
    }

    async fn write<T>(&self, f: impl FnOnce(&mut Home) -> T) -> T {
        let (result, events) = {
            let mut home = self.home.lock().unwrap_or_else(PoisonError::into_inner);
            let result = f(&mut home);
            (result, home.drain_events())
        };
        self.publish_all(events).await;
        result
    }

    async fn publish_all(&self, events: Vec<HomeEvent>) {
        for event in events {
            if let Err(err) = self.publisher.publish(event).await {
                tracing::warn!(error = %err, "failed to publish home event");
            }
        }
    }
}

fn log_refusal(outcome: &Outcome) {
    if let Outcome::Advisory { notification } = outcome {
        tracing::info!(reason = %notification.message, "operation refused");
    }
}
