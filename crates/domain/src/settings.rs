//! Settings: user preferences and the global control gate.

use serde::{Deserialize, Serialize};

use crate::error::{HomeControlError, ValidationError};
use crate::notification::SoundType;
use crate::tank::Thresholds;

/// Global gate on whether device commands take effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlMode {
    /// Commands are rejected with an advisory.
    #[default]
    Manual,
    /// Commands are applied.
    Remote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// User-editable settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub home_name: String,
    pub wifi_ssid: String,
    /// Decorative; never serialized back out.
    #[serde(default, skip_serializing)]
    pub wifi_password: String,
    pub control_mode: ControlMode,
    pub pump_low_threshold: u8,
    pub pump_high_threshold: u8,
    pub sound_enabled: bool,
    pub alert_sound: SoundType,
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        let thresholds = Thresholds::default();
        Self {
            home_name: "HomeControl".to_string(),
            wifi_ssid: "Home_Net_2.4".to_string(),
            wifi_password: String::new(),
            control_mode: ControlMode::Manual,
            pump_low_threshold: thresholds.low,
            pump_high_threshold: thresholds.high,
            sound_enabled: true,
            alert_sound: SoundType::Chime,
            theme: Theme::Light,
        }
    }
}

impl Settings {
    /// Pump thresholds as a single value.
    #[must_use]
    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            low: self.pump_low_threshold,
            high: self.pump_high_threshold,
        }
    }

    /// Whether UI-issued device commands are currently accepted.
    #[must_use]
    pub fn accepts_commands(&self) -> bool {
        self.control_mode == ControlMode::Remote
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HomeControlError::Validation`] when the home name is blank
    /// or the pump thresholds are invalid.
    pub fn validate(&self) -> Result<(), HomeControlError> {
        if self.home_name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        self.thresholds().validate()?;
        Ok(())
    }
}
