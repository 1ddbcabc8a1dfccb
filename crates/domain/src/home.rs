//! Home: the aggregate owning every room, device, the tank and the log.
//!
//! Every operation is a validate-then-mutate step over in-memory state.
//! Guard failures are not errors: they return [`Outcome::Advisory`] and
//! leave the state untouched. Side effects (log lines, notifications,
//! device and tank changes) are queued as [`HomeEvent`]s and collected by
//! the caller through [`Home::drain_events`].
//!
//! Random inputs (drainage roll, sync jitter) are parameters, so the same
//! state and inputs always produce the same transition.

use serde::{Deserialize, Serialize};

use crate::command::DeviceAction;
use crate::confirmation::{ConfirmationAction, PendingConfirmation};
use crate::device::{Device, DeviceKind, MOCK_ESP_PREFIX};
use crate::error::{HomeControlError, NotFoundError, ValidationError};
use crate::event::HomeEvent;
use crate::id::{DeviceId, RoomId};
use crate::log::{ActivityLog, LogEntry, Severity};
use crate::notification::{Notification, NotificationKind};
use crate::room::{Room, RoomIcon};
use crate::settings::Settings;
use crate::tank::{PumpTransition, TankAlert, TankMode, TankState, TickOutcome};
use crate::time::now;

pub const REMOTE_MODE_REQUIRED: &str = "Switch to Remote Mode to control devices.";
pub const PUMP_UNDER_AUTO_CONTROL: &str = "Switch Water Tank to MANUAL mode to control pump.";
pub const LAST_ROOM: &str = "Cannot delete the only remaining room.";

/// Result of an operation that may be refused by a guard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// The mutation was applied.
    Applied,
    /// A guard refused the operation; nothing changed.
    Advisory { notification: Notification },
    /// The operation waits for [`Home::confirm`].
    AwaitingConfirmation { confirmation: PendingConfirmation },
    /// Nothing to do (no pending confirmation, control gate closed for
    /// silent operations, …).
    Ignored,
}

/// Serializable view of the whole home, minus the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeSnapshot {
    pub rooms: Vec<Room>,
    pub devices: Vec<Device>,
    pub tank: TankState,
    pub settings: Settings,
    pub active_room: RoomId,
    pub shows_tank_widget: bool,
    pub pending_confirmation: Option<PendingConfirmation>,
}

#[derive(Debug, Clone)]
pub struct Home {
    rooms: Vec<Room>,
    devices: Vec<Device>,
    tank: TankState,
    settings: Settings,
    log: ActivityLog,
    active_room: RoomId,
    pending: Option<PendingConfirmation>,
    outbox: Vec<HomeEvent>,
}

impl Home {
    /// Assemble a home from its parts.
    ///
    /// The first room becomes the active one and the tank's motor flag is
    /// aligned with the pump device when there is one.
    ///
    /// # Errors
    ///
    /// Returns [`HomeControlError::Validation`] when there are no rooms or
    /// any part is invalid, and [`HomeControlError::NotFound`] when a device
    /// points at an unknown room.
    pub fn new(
        rooms: Vec<Room>,
        devices: Vec<Device>,
        tank: TankState,
        settings: Settings,
    ) -> Result<Self, HomeControlError> {
        let active_room = rooms.first().ok_or(ValidationError::NoRooms)?.id;
        for room in &rooms {
            room.validate()?;
        }
        settings.validate()?;
        for device in &devices {
            device.validate()?;
            if !rooms.iter().any(|r| r.id == device.room_id) {
                return Err(room_not_found(device.room_id));
            }
        }

        let mut home = Self {
            rooms,
            devices,
            tank,
            settings,
            log: ActivityLog::default(),
            active_room,
            pending: None,
            outbox: Vec::new(),
        };
        if let Some(pump) = home.pump() {
            home.tank.motor_on = pump.is_on;
        }
        Ok(home)
    }

    // ── Queries ────────────────────────────────────────────────────

    #[must_use]
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    #[must_use]
    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    #[must_use]
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    #[must_use]
    pub fn device(&self, id: DeviceId) -> Option<&Device> {
        self.devices.iter().find(|d| d.id == id)
    }

    /// Devices located in `room_id`.
    pub fn devices_in(&self, room_id: RoomId) -> impl Iterator<Item = &Device> {
        self.devices.iter().filter(move |d| d.room_id == room_id)
    }

    /// The device driving the tank: the first motor.
    #[must_use]
    pub fn pump(&self) -> Option<&Device> {
        self.devices.iter().find(|d| d.is_motor())
    }

    #[must_use]
    pub fn tank(&self) -> TankState {
        self.tank
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn log(&self) -> &ActivityLog {
        &self.log
    }

    #[must_use]
    pub fn active_room(&self) -> RoomId {
        self.active_room
    }

    #[must_use]
    pub fn pending_confirmation(&self) -> Option<&PendingConfirmation> {
        self.pending.as_ref()
    }

    /// Whether the active room shows the water tank panel.
    #[must_use]
    pub fn shows_tank_widget(&self) -> bool {
        self.room(self.active_room)
            .is_some_and(|room| room.has_tank_widget)
    }

    #[must_use]
    pub fn snapshot(&self) -> HomeSnapshot {
        HomeSnapshot {
            rooms: self.rooms.clone(),
            devices: self.devices.clone(),
            tank: self.tank,
            settings: self.settings.clone(),
            active_room: self.active_room,
            shows_tank_widget: self.shows_tank_widget(),
            pending_confirmation: self.pending.clone(),
        }
    }

    /// Take every event queued since the last call.
    pub fn drain_events(&mut self) -> Vec<HomeEvent> {
        std::mem::take(&mut self.outbox)
    }

    // ── Devices ────────────────────────────────────────────────────

    /// Flip a device's power, subject to the control gates.
    ///
    /// # Errors
    ///
    /// Returns [`HomeControlError::NotFound`] for an unknown device.
    pub fn toggle_device(&mut self, id: DeviceId) -> Result<Outcome, HomeControlError> {
        let idx = self.device_index(id)?;
        if let Some(advisory) = self.command_guard(idx) {
            return Ok(advisory);
        }
        let on = !self.devices[idx].is_on;
        self.set_power(idx, on);
        Ok(Outcome::Applied)
    }

    /// Change brightness or fan speed. Silently ignored in manual control
    /// mode.
    ///
    /// # Errors
    ///
    /// Returns [`HomeControlError::NotFound`] for an unknown device and
    /// [`HomeControlError::Validation`] when `value` does not fit the kind.
    pub fn set_device_value(
        &mut self,
        id: DeviceId,
        value: u8,
    ) -> Result<Outcome, HomeControlError> {
        let idx = self.device_index(id)?;
        if !self.settings.accepts_commands() {
            return Ok(Outcome::Ignored);
        }
        let kind = self.devices[idx].kind;
        if !kind.accepts_value(value) {
            return Err(ValidationError::ValueOutOfRange { kind, value }.into());
        }
        self.set_value(idx, value);
        Ok(Outcome::Applied)
    }

    /// Replace a device wholesale (settings panel). Bypasses the control
    /// gates.
    ///
    /// # Errors
    ///
    /// Returns [`HomeControlError::Validation`] for an invalid device and
    /// [`HomeControlError::NotFound`] for an unknown device or room.
    pub fn update_device(&mut self, device: Device) -> Result<Outcome, HomeControlError> {
        device.validate()?;
        let idx = self.device_index(device.id)?;
        if self.room(device.room_id).is_none() {
            return Err(room_not_found(device.room_id));
        }

        let pump_before = self.pump().map(|p| p.id);
        let power_changed = self.devices[idx].is_on != device.is_on;
        let message = if power_changed {
            format!(
                "{} manually switched {} from settings",
                device.name,
                device.power_label()
            )
        } else {
            format!("Device \"{}\" updated", device.name)
        };

        self.devices[idx] = device.clone();
        self.outbox.push(HomeEvent::DeviceUpdated(device));
        if pump_before != self.pump().map(|p| p.id) || (power_changed && self.is_pump(idx)) {
            self.sync_motor_with_pump();
        }
        self.record(message, Severity::Info);
        Ok(Outcome::Applied)
    }

    /// Add a device of `kind` to the active room.
    ///
    /// # Errors
    ///
    /// Returns [`HomeControlError::Validation`] when `name` is blank.
    pub fn add_device(
        &mut self,
        name: &str,
        kind: DeviceKind,
    ) -> Result<DeviceId, HomeControlError> {
        let device = Device::builder()
            .room_id(self.active_room)
            .kind(kind)
            .name(name)
            .ip_address(format!("{MOCK_ESP_PREFIX}{}", 101 + self.devices.len()))
            .build()?;
        let id = device.id;
        let message = format!("Device \"{}\" added to current room", device.name);

        self.devices.push(device.clone());
        self.outbox.push(HomeEvent::DeviceUpdated(device));
        if self.pump().is_some_and(|p| p.id == id) {
            self.sync_motor_with_pump();
        }
        self.record(message, Severity::Success);
        Ok(id)
    }

    /// Ask for confirmation before deleting a device.
    ///
    /// # Errors
    ///
    /// Returns [`HomeControlError::NotFound`] for an unknown device.
    pub fn request_delete_device(&mut self, id: DeviceId) -> Result<Outcome, HomeControlError> {
        self.device_index(id)?;
        let confirmation = PendingConfirmation::delete_device(id);
        self.pending = Some(confirmation.clone());
        Ok(Outcome::AwaitingConfirmation { confirmation })
    }

    // ── Rooms ──────────────────────────────────────────────────────

    /// Add a room.
    ///
    /// # Errors
    ///
    /// Returns [`HomeControlError::Validation`] when `name` is blank.
    pub fn add_room(
        &mut self,
        name: &str,
        icon: RoomIcon,
        has_tank_widget: bool,
    ) -> Result<RoomId, HomeControlError> {
        let room = Room::builder()
            .name(name)
            .icon(icon)
            .has_tank_widget(has_tank_widget)
            .build()?;
        let id = room.id;
        let message = format!("Room \"{}\" added", room.name);
        self.rooms.push(room);
        self.record(message, Severity::Success);
        Ok(id)
    }

    /// Make `id` the room new devices are added to.
    ///
    /// # Errors
    ///
    /// Returns [`HomeControlError::NotFound`] for an unknown room.
    pub fn select_room(&mut self, id: RoomId) -> Result<(), HomeControlError> {
        if self.room(id).is_none() {
            return Err(room_not_found(id));
        }
        self.active_room = id;
        Ok(())
    }

    /// Ask for confirmation before deleting a room and its devices.
    ///
    /// # Errors
    ///
    /// Returns [`HomeControlError::NotFound`] for an unknown room.
    pub fn request_delete_room(&mut self, id: RoomId) -> Result<Outcome, HomeControlError> {
        let name = self.room(id).ok_or_else(|| room_not_found(id))?.name.clone();
        if self.rooms.len() == 1 {
            return Ok(self.advisory(LAST_ROOM));
        }
        let confirmation = PendingConfirmation::delete_room(id, &name);
        self.pending = Some(confirmation.clone());
        Ok(Outcome::AwaitingConfirmation { confirmation })
    }

    // ── Confirmation flow ──────────────────────────────────────────

    /// Execute the pending confirmation if `input` passes its check.
    ///
    /// A wrong authorization phrase keeps the confirmation pending.
    pub fn confirm(&mut self, input: Option<&str>) -> Outcome {
        let Some(pending) = self.pending.as_ref() else {
            return Outcome::Ignored;
        };
        if !pending.accepts(input) {
            return Outcome::Ignored;
        }
        let action = pending.action;
        self.pending = None;

        match action {
            ConfirmationAction::DeleteDevice(id) => self.delete_device(id),
            ConfirmationAction::DeleteRoom(id) => self.delete_room(id),
        }
    }

    /// Drop the pending confirmation. Returns whether one was pending.
    pub fn cancel_confirmation(&mut self) -> bool {
        self.pending.take().is_some()
    }

    fn delete_device(&mut self, id: DeviceId) -> Outcome {
        let Some(idx) = self.devices.iter().position(|d| d.id == id) else {
            return Outcome::Ignored;
        };
        let pump_before = self.pump().map(|p| p.id);
        let removed = self.devices.remove(idx);
        if pump_before == Some(removed.id) {
            self.sync_motor_with_pump();
        }
        self.record(format!("Device {} removed", removed.name), Severity::Alert);
        Outcome::Applied
    }

    fn delete_room(&mut self, id: RoomId) -> Outcome {
        if self.room(id).is_none() {
            return Outcome::Ignored;
        }
        if self.rooms.len() == 1 {
            return self.advisory(LAST_ROOM);
        }
        let pump_before = self.pump().map(|p| p.id);
        self.rooms.retain(|r| r.id != id);
        self.devices.retain(|d| d.room_id != id);
        if pump_before != self.pump().map(|p| p.id) {
            self.sync_motor_with_pump();
        }
        if self.active_room == id {
            self.active_room = self.rooms[0].id;
        }
        self.record("Room deleted", Severity::Alert);
        Outcome::Applied
    }

    // ── Settings ───────────────────────────────────────────────────

    /// Replace the settings. An empty Wi-Fi password keeps the current one.
    ///
    /// # Errors
    ///
    /// Returns [`HomeControlError::Validation`] for invalid settings.
    pub fn update_settings(&mut self, mut settings: Settings) -> Result<Outcome, HomeControlError> {
        settings.validate()?;
        if settings.wifi_password.is_empty() {
            settings.wifi_password = std::mem::take(&mut self.settings.wifi_password);
        }
        self.settings = settings;
        self.record("Settings updated", Severity::Info);
        Ok(Outcome::Applied)
    }

    // ── Tank ───────────────────────────────────────────────────────

    /// Switch the tank between automatic and manual pump control.
    pub fn toggle_tank_mode(&mut self) -> TankMode {
        self.tank.mode = self.tank.mode.toggled();
        self.outbox.push(HomeEvent::TankUpdated(self.tank));
        self.record(
            format!("Water tank switched to {} mode", self.tank.mode),
            Severity::Info,
        );
        self.tank.mode
    }

    /// Flip the pump from the tank panel.
    ///
    /// Goes through the same gates as [`Home::toggle_device`] when a pump
    /// device exists; otherwise flips the tank's motor flag directly.
    pub fn toggle_pump(&mut self) -> Outcome {
        if let Some(idx) = self.devices.iter().position(Device::is_motor) {
            if let Some(advisory) = self.command_guard(idx) {
                return advisory;
            }
            let on = !self.devices[idx].is_on;
            self.set_power(idx, on);
            return Outcome::Applied;
        }
        self.tank.motor_on = !self.tank.motor_on;
        self.outbox.push(HomeEvent::TankUpdated(self.tank));
        let label = if self.tank.motor_on { "ON" } else { "OFF" };
        self.record(format!("Water pump turned {label}"), Severity::Info);
        Outcome::Applied
    }

    /// Run one simulation step and propagate its side effects.
    ///
    /// Threshold alerts become notifications, a pump transition is logged
    /// and mirrored onto the pump device.
    pub fn tick(&mut self, drained: bool) -> TickOutcome {
        let outcome = self.tank.tick(self.settings.thresholds(), drained);
        self.tank = outcome.state;

        for alert in &outcome.alerts {
            if *alert != TankAlert::EmergencyStop {
                self.notify(alert.message(), alert.kind());
            }
        }

        if let Some(transition) = outcome.transition {
            self.record(transition.log_message(), transition.severity());
            if let Some(idx) = self.devices.iter().position(Device::is_motor) {
                self.set_power(idx, transition.motor_on());
            }
            if transition == PumpTransition::EmergencyStop {
                let alert = TankAlert::EmergencyStop;
                self.notify(alert.message(), alert.kind());
            }
        }

        self.outbox.push(HomeEvent::TankUpdated(self.tank));
        outcome
    }

    /// Re-read the simulated sensors: nudge the level by `jitter`
    /// (clamped to `[-1, 1]`) and re-align the motor flag with the pump.
    pub fn system_sync(&mut self, jitter: f64) {
        self.tank.nudge(jitter.clamp(-1.0, 1.0));
        if let Some(pump) = self.pump() {
            self.tank.motor_on = pump.is_on;
        }
        self.outbox.push(HomeEvent::TankUpdated(self.tank));
        self.record("System synchronized with hardware sensors.", Severity::Success);
    }

    // ── Interpreted commands ───────────────────────────────────────

    /// Apply actions returned by the command interpreter.
    ///
    /// Unknown devices are skipped; the pump is skipped while the tank is in
    /// automatic mode. Returns [`Outcome::Applied`] when at least one action
    /// went through.
    pub fn apply_actions(&mut self, actions: &[DeviceAction]) -> Outcome {
        if !self.settings.accepts_commands() {
            return self.advisory(REMOTE_MODE_REQUIRED);
        }

        let mut applied = 0_usize;
        let mut refused = None;
        for action in actions {
            let Ok(idx) = self.device_index(action.device_id) else {
                continue;
            };
            if let Some(advisory) = self.command_guard(idx) {
                refused = Some(advisory);
                continue;
            }
            if let Some(value) = action.value {
                let device = &self.devices[idx];
                if device.kind.accepts_value(value) && device.value != value {
                    self.set_value(idx, value);
                }
            }
            if self.devices[idx].is_on != action.is_on {
                self.set_power(idx, action.is_on);
            }
            applied += 1;
        }

        if applied > 0 {
            Outcome::Applied
        } else {
            refused.unwrap_or(Outcome::Ignored)
        }
    }

    // ── Internals ──────────────────────────────────────────────────

    fn device_index(&self, id: DeviceId) -> Result<usize, HomeControlError> {
        self.devices.iter().position(|d| d.id == id).ok_or_else(|| {
            NotFoundError {
                entity: "Device",
                id: id.to_string(),
            }
            .into()
        })
    }

    fn is_pump(&self, idx: usize) -> bool {
        self.devices.iter().position(Device::is_motor) == Some(idx)
    }

    /// The advisory refusing a UI command on `devices[idx]`, if any.
    fn command_guard(&mut self, idx: usize) -> Option<Outcome> {
        if !self.settings.accepts_commands() {
            return Some(self.advisory(REMOTE_MODE_REQUIRED));
        }
        if self.devices[idx].is_motor() && self.tank.mode == TankMode::Auto {
            return Some(self.advisory(PUMP_UNDER_AUTO_CONTROL));
        }
        None
    }

    fn set_power(&mut self, idx: usize, on: bool) {
        let is_pump = self.is_pump(idx);
        let device = &mut self.devices[idx];
        device.is_on = on;
        let severity = if device.is_motor() && on {
            Severity::Alert
        } else {
            Severity::Info
        };
        let message = format!("{} turned {}", device.name, device.power_label());
        let snapshot = device.clone();

        self.outbox.push(HomeEvent::DeviceUpdated(snapshot));
        if is_pump {
            self.tank.motor_on = on;
            self.outbox.push(HomeEvent::TankUpdated(self.tank));
        }
        self.record(message, severity);
    }

    fn set_value(&mut self, idx: usize, value: u8) {
        let device = &mut self.devices[idx];
        device.value = value;
        let message = match device.kind {
            DeviceKind::Light => format!("{} brightness set to {value}%", device.name),
            DeviceKind::Fan => format!("{} speed set to {value}", device.name),
            DeviceKind::Motor => format!("{} value set to {value}", device.name),
        };
        let snapshot = device.clone();
        self.outbox.push(HomeEvent::DeviceUpdated(snapshot));
        self.record(message, Severity::Info);
    }

    fn sync_motor_with_pump(&mut self) {
        let motor_on = self.pump().is_some_and(|p| p.is_on);
        if self.tank.motor_on != motor_on {
            self.tank.motor_on = motor_on;
            self.outbox.push(HomeEvent::TankUpdated(self.tank));
        }
    }

    fn record(&mut self, message: impl Into<String>, severity: Severity) {
        let entry = LogEntry::new(message, severity, now());
        self.outbox.push(HomeEvent::Logged(entry.clone()));
        self.log.append(entry);
    }

    fn notify(&mut self, message: impl Into<String>, kind: NotificationKind) -> Notification {
        let notification = Notification::new(
            message,
            kind,
            self.settings.sound_enabled,
            self.settings.alert_sound,
        );
        self.outbox.push(HomeEvent::Notified(notification.clone()));
        notification
    }

    fn advisory(&mut self, message: &str) -> Outcome {
        Outcome::Advisory {
            notification: self.notify(message, NotificationKind::Alert),
        }
    }
}

fn room_not_found(id: RoomId) -> HomeControlError {
    NotFoundError {
        entity: "Room",
        id: id.to_string(),
    }
    .into()
}
