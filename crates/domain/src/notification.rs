//! Advisory notifications: transient messages, distinct from the log feed.

use serde::{Deserialize, Serialize};

/// Sound cue played alongside a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundType {
    Beep,
    Alarm,
    #[default]
    Chime,
}

/// Tone of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Alert,
    Success,
}

/// A fire-and-forget, user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    /// `None` when sound is disabled in the settings.
    pub sound: Option<SoundType>,
}

impl Notification {
    /// Build a notification, picking the sound cue from the preferences.
    ///
    /// Alerts always use [`SoundType::Alarm`]; successes use the configured
    /// `alert_sound`.
    #[must_use]
    pub fn new(
        message: impl Into<String>,
        kind: NotificationKind,
        sound_enabled: bool,
        alert_sound: SoundType,
    ) -> Self {
        let sound = sound_enabled.then(|| match kind {
            NotificationKind::Alert => SoundType::Alarm,
            NotificationKind::Success => alert_sound,
        });
        Self {
            message: message.into(),
            kind,
            sound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_use_alarm_for_alerts() {
        let n = Notification::new("low", NotificationKind::Alert, true, SoundType::Beep);
        assert_eq!(n.sound, Some(SoundType::Alarm));
    }

    #[test]
    fn should_use_configured_sound_for_successes() {
        let n = Notification::new("high", NotificationKind::Success, true, SoundType::Beep);
        assert_eq!(n.sound, Some(SoundType::Beep));
    }

    #[test]
    fn should_stay_silent_when_sound_disabled() {
        let n = Notification::new("x", NotificationKind::Alert, false, SoundType::Chime);
        assert!(n.sound.is_none());
    }
}
