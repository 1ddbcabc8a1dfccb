//! Event: an immutable record of a side effect produced by an operation.
//!
//! Events are fire-and-forget: they are broadcast to whoever listens
//! (the SSE stream, tests) and never feed back into the state.

use serde::{Deserialize, Serialize};

use crate::device::Device;
use crate::log::LogEntry;
use crate::notification::Notification;
use crate::tank::TankState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum HomeEvent {
    /// A line was appended to the activity log.
    Logged(LogEntry),
    /// An advisory notification was raised.
    Notified(Notification),
    /// A device changed (power, value or metadata).
    DeviceUpdated(Device),
    /// The tank state changed.
    TankUpdated(TankState),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::Severity;
    use crate::time::now;

    #[test]
    fn should_tag_events_by_type() {
        let event = HomeEvent::Logged(LogEntry::new("hello", Severity::Info, now()));
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "logged");
        assert_eq!(json["data"]["message"], "hello");
    }
}
