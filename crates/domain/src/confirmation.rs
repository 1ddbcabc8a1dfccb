//! Confirmation: a destructive operation waiting for the user to agree.

use serde::{Deserialize, Serialize};

use crate::id::{DeviceId, RoomId};

/// Phrase that must be typed when a confirmation requires authorization.
pub const AUTH_PHRASE: &str = "DELETE";

/// The operation executed once the confirmation is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum ConfirmationAction {
    DeleteDevice(DeviceId),
    DeleteRoom(RoomId),
}

/// A pending request for confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingConfirmation {
    pub title: String,
    pub message: String,
    /// When set, [`AUTH_PHRASE`] must be supplied to confirm.
    pub require_auth: bool,
    pub action: ConfirmationAction,
}

impl PendingConfirmation {
    #[must_use]
    pub fn delete_device(id: DeviceId) -> Self {
        Self {
            title: "Delete Device".to_string(),
            message: "Are you sure you want to remove this device? This action cannot be undone."
                .to_string(),
            require_auth: false,
            action: ConfirmationAction::DeleteDevice(id),
        }
    }

    #[must_use]
    pub fn delete_room(id: RoomId, name: &str) -> Self {
        Self {
            title: format!("Delete Space: {name}"),
            message: "Are you sure you want to delete this space? All devices inside it will be removed."
                .to_string(),
            require_auth: false,
            action: ConfirmationAction::DeleteRoom(id),
        }
    }

    /// Whether `input` satisfies the authorization check.
    #[must_use]
    pub fn accepts(&self, input: Option<&str>) -> bool {
        !self.require_auth || input == Some(AUTH_PHRASE)
    }
}
