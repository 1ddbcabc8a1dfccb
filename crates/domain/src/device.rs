//! Device: a simulated light, fan or pump living in a room.

use serde::{Deserialize, Serialize};

use crate::error::{HomeControlError, ValidationError};
use crate::id::{DeviceId, RoomId};

/// Prefix of the simulated controller addresses.
pub const MOCK_ESP_PREFIX: &str = "192.168.1.";

/// GPIO pin assigned to devices added at runtime.
pub const DEFAULT_GPIO_PIN: u8 = 2;

/// What a device is, which also decides how its `value` is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    /// `value` is a brightness in `0..=100`.
    Light,
    /// `value` is a discrete speed in `1..=5`.
    Fan,
    /// The water pump; `value` is unused.
    Motor,
}

impl DeviceKind {
    /// Value given to a freshly added device of this kind.
    #[must_use]
    pub fn default_value(self) -> u8 {
        match self {
            Self::Fan => 1,
            Self::Light | Self::Motor => 50,
        }
    }

    /// Whether `value` is meaningful for this kind.
    #[must_use]
    pub fn accepts_value(self, value: u8) -> bool {
        match self {
            Self::Light => value <= 100,
            Self::Fan => (1..=5).contains(&value),
            Self::Motor => true,
        }
    }
}

impl std::fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Light => f.write_str("light"),
            Self::Fan => f.write_str("fan"),
            Self::Motor => f.write_str("motor"),
        }
    }
}

/// A controllable device.
///
/// `ip_address` and `gpio_pin` are decorative: nothing is ever sent to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub room_id: RoomId,
    pub kind: DeviceKind,
    pub name: String,
    pub is_on: bool,
    pub value: u8,
    pub is_faulty: bool,
    pub ip_address: Option<String>,
    pub gpio_pin: u8,
}

impl Device {
    /// Create a builder for constructing a [`Device`].
    #[must_use]
    pub fn builder() -> DeviceBuilder {
        DeviceBuilder::default()
    }

    /// Whether this device is a motor (pump).
    #[must_use]
    pub fn is_motor(&self) -> bool {
        self.kind == DeviceKind::Motor
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HomeControlError::Validation`] when:
    /// - `name` is blank ([`ValidationError::EmptyName`])
    /// - `value` is outside the range of `kind` ([`ValidationError::ValueOutOfRange`])
    pub fn validate(&self) -> Result<(), HomeControlError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if !self.kind.accepts_value(self.value) {
            return Err(ValidationError::ValueOutOfRange {
                kind: self.kind,
                value: self.value,
            }
            .into());
        }
        Ok(())
    }

    /// Human readable power state used in log messages.
    #[must_use]
    pub fn power_label(&self) -> &'static str {
        if self.is_on { "ON" } else { "OFF" }
    }
}

/// Step-by-step builder for [`Device`].
#[derive(Debug, Default)]
pub struct DeviceBuilder {
    id: Option<DeviceId>,
    room_id: Option<RoomId>,
    kind: Option<DeviceKind>,
    name: Option<String>,
    is_on: bool,
    value: Option<u8>,
    is_faulty: bool,
    ip_address: Option<String>,
    gpio_pin: Option<u8>,
}

impl DeviceBuilder {
    #[must_use]
    pub fn id(mut self, id: DeviceId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn room_id(mut self, room_id: RoomId) -> Self {
        self.room_id = Some(room_id);
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: DeviceKind) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn is_on(mut self, is_on: bool) -> Self {
        self.is_on = is_on;
        self
    }

    #[must_use]
    pub fn value(mut self, value: u8) -> Self {
        self.value = Some(value);
        self
    }

    #[must_use]
    pub fn is_faulty(mut self, is_faulty: bool) -> Self {
        self.is_faulty = is_faulty;
        self
    }

    #[must_use]
    pub fn ip_address(mut self, ip_address: impl Into<String>) -> Self {
        self.ip_address = Some(ip_address.into());
        self
    }

    #[must_use]
    pub fn gpio_pin(mut self, gpio_pin: u8) -> Self {
        self.gpio_pin = Some(gpio_pin);
        self
    }

    /// Consume the builder, validate, and return a [`Device`].
    ///
    /// Defaults: kind [`DeviceKind::Light`], value from
    /// [`DeviceKind::default_value`], GPIO [`DEFAULT_GPIO_PIN`].
    ///
    /// # Errors
    ///
    /// Returns [`HomeControlError::Validation`] if the name is missing or
    /// the value does not fit the kind.
    pub fn build(self) -> Result<Device, HomeControlError> {
        let kind = self.kind.unwrap_or(DeviceKind::Light);
        let device = Device {
            id: self.id.unwrap_or_default(),
            room_id: self.room_id.unwrap_or_default(),
            kind,
            name: self.name.unwrap_or_default().trim().to_string(),
            is_on: self.is_on,
            value: self.value.unwrap_or_else(|| kind.default_value()),
            is_faulty: self.is_faulty,
            ip_address: self.ip_address,
            gpio_pin: self.gpio_pin.unwrap_or(DEFAULT_GPIO_PIN),
        };
        device.validate()?;
        Ok(device)
    }
}
