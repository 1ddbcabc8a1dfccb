//! Commands produced by the natural-language interpreter.

use serde::{Deserialize, Serialize};

use crate::id::DeviceId;

/// One device change requested by an interpreted command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceAction {
    pub device_id: DeviceId,
    pub is_on: bool,
    /// Brightness (0-100) or fan speed (1-5).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<u8>,
}

/// Actions plus the short reply shown to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterpretedCommand {
    pub actions: Vec<DeviceAction>,
    pub reply: String,
}
