//! Water tank: the simulated level sensor and the pump control policy.
//!
//! [`TankState::tick`] is the whole state machine: a pure function of the
//! previous state, the configured [`Thresholds`] and one noise input (whether
//! passive drainage happened this tick). The caller owns the timer and the
//! randomness, which keeps every transition reproducible.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::log::Severity;
use crate::notification::NotificationKind;

/// Level lost per tick when the pump is off and drainage happens.
pub const DRAIN_STEP: f64 = 0.5;

/// Level gained per tick while the pump runs.
pub const FILL_STEP: f64 = 2.0;

/// Half-width of the band around a threshold in which a crossing counts.
pub const CROSSING_TOLERANCE: f64 = 0.5;

/// Level at which the "tank full" alert fires.
pub const FULL_ALERT_LEVEL: f64 = 99.0;

/// Upper bound of the level.
pub const MAX_LEVEL: f64 = 100.0;

/// Who drives the pump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TankMode {
    /// The pump follows the low/high thresholds.
    #[default]
    Auto,
    /// The pump only moves on explicit user action (plus the emergency stop).
    Manual,
}

impl TankMode {
    /// The other mode.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Auto => Self::Manual,
            Self::Manual => Self::Auto,
        }
    }
}

impl std::fmt::Display for TankMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => f.write_str("AUTO"),
            Self::Manual => f.write_str("MANUAL"),
        }
    }
}

/// Pump start/stop thresholds, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    pub low: u8,
    pub high: u8,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self { low: 20, high: 90 }
    }
}

impl Thresholds {
    /// Build validated thresholds.
    ///
    /// # Errors
    ///
    /// See [`Thresholds::validate`].
    pub fn new(low: u8, high: u8) -> Result<Self, ValidationError> {
        let thresholds = Self { low, high };
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Both values must be percentages and `low` must be below `high`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ThresholdOutOfRange`] or
    /// [`ValidationError::InvertedThresholds`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.high > 100 {
            return Err(ValidationError::ThresholdOutOfRange(self.high));
        }
        if self.low >= self.high {
            return Err(ValidationError::InvertedThresholds {
                low: self.low,
                high: self.high,
            });
        }
        Ok(())
    }
}

/// Snapshot of the simulated tank.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TankState {
    /// Fill level, always within `[0, 100]`.
    pub level: f64,
    pub mode: TankMode,
    /// Mirrors the pump device's power state.
    pub motor_on: bool,
    /// Set once the LOW alert fired; cleared when the level leaves the band.
    #[serde(default)]
    pub low_alert_latched: bool,
    /// Set once the HIGH alert fired; cleared when the level leaves the band.
    #[serde(default)]
    pub high_alert_latched: bool,
}

impl Default for TankState {
    fn default() -> Self {
        Self::new(65.0, TankMode::Auto, false)
    }
}

/// Why the pump changed state during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PumpTransition {
    AutoStart,
    AutoStop,
    EmergencyStop,
}

impl PumpTransition {
    /// Pump power after the transition.
    #[must_use]
    pub fn motor_on(self) -> bool {
        matches!(self, Self::AutoStart)
    }

    #[must_use]
    pub fn log_message(self) -> &'static str {
        match self {
            Self::AutoStart => "Auto-started water pump: Low level detected",
            Self::AutoStop => "Auto-stopped water pump: High level reached",
            Self::EmergencyStop => "Emergency Stop: Tank Full",
        }
    }

    #[must_use]
    pub fn severity(self) -> Severity {
        match self {
            Self::AutoStart | Self::EmergencyStop => Severity::Alert,
            Self::AutoStop => Severity::Success,
        }
    }
}

/// A user-facing alert raised by a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "percent", rename_all = "snake_case")]
pub enum TankAlert {
    Low(u8),
    High(u8),
    Full,
    EmergencyStop,
}

impl TankAlert {
    #[must_use]
    pub fn message(self) -> String {
        match self {
            Self::Low(percent) => format!("Water Level LOW ({percent}%)"),
            Self::High(percent) => format!("Water Level HIGH ({percent}%)"),
            Self::Full => "Water Tank Full Alert!".to_string(),
            Self::EmergencyStop => "Emergency Stop: Tank Full".to_string(),
        }
    }

    #[must_use]
    pub fn kind(self) -> NotificationKind {
        match self {
            Self::High(_) => NotificationKind::Success,
            Self::Low(_) | Self::Full | Self::EmergencyStop => NotificationKind::Alert,
        }
    }
}

/// Result of one simulation step.
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutcome {
    /// State to feed into the next tick.
    pub state: TankState,
    /// Alerts in the order they were detected.
    pub alerts: Vec<TankAlert>,
    /// Pump change decided this tick, if any.
    pub transition: Option<PumpTransition>,
}

impl TankState {
    /// Create a tank with clear alert latches; `level` is clamped.
    #[must_use]
    pub fn new(level: f64, mode: TankMode, motor_on: bool) -> Self {
        Self {
            level: clamp_level(level),
            mode,
            motor_on,
            low_alert_latched: false,
            high_alert_latched: false,
        }
    }

    /// Move the level by `delta`, clamped to `[0, 100]`.
    pub fn nudge(&mut self, delta: f64) {
        self.level = clamp_level(self.level + delta);
    }

    /// Whole-percent reading used in messages.
    #[must_use]
    pub fn percent(&self) -> u8 {
        floor_percent(self.level)
    }

    /// Advance the simulation by one tick.
    ///
    /// `drained` says whether passive drainage happens this tick; it only
    /// matters while the pump is off.
    #[must_use]
    pub fn tick(&self, thresholds: Thresholds, drained: bool) -> TickOutcome {
        let previous = self.level;
        let level = if self.motor_on {
            clamp_level(previous + FILL_STEP)
        } else if drained {
            clamp_level(previous - DRAIN_STEP)
        } else {
            previous
        };

        let low = f64::from(thresholds.low);
        let high = f64::from(thresholds.high);
        let mut next = Self { level, ..*self };
        let mut alerts = Vec::new();

        if level > low + CROSSING_TOLERANCE {
            next.low_alert_latched = false;
        }
        if level < high - CROSSING_TOLERANCE {
            next.high_alert_latched = false;
        }
        if level < previous && level <= low + CROSSING_TOLERANCE && !next.low_alert_latched {
            next.low_alert_latched = true;
            alerts.push(TankAlert::Low(floor_percent(level)));
        }
        if level > previous && level >= high - CROSSING_TOLERANCE && !next.high_alert_latched {
            next.high_alert_latched = true;
            alerts.push(TankAlert::High(floor_percent(level)));
        }
        if level >= FULL_ALERT_LEVEL && previous < FULL_ALERT_LEVEL {
            alerts.push(TankAlert::Full);
        }

        let transition = match self.mode {
            TankMode::Auto if level <= low && !self.motor_on => Some(PumpTransition::AutoStart),
            TankMode::Auto if level >= high && self.motor_on => Some(PumpTransition::AutoStop),
            TankMode::Manual if self.motor_on && level >= MAX_LEVEL => {
                alerts.push(TankAlert::EmergencyStop);
                Some(PumpTransition::EmergencyStop)
            }
            _ => None,
        };
        if let Some(transition) = transition {
            next.motor_on = transition.motor_on();
        }

        TickOutcome {
            state: next,
            alerts,
            transition,
        }
    }
}

fn clamp_level(level: f64) -> f64 {
    level.clamp(0.0, MAX_LEVEL)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn floor_percent(level: f64) -> u8 {
    clamp_level(level).floor() as u8
}
