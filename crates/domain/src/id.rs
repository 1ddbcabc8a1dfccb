//! Identifiers for rooms, devices and log lines.
//!
//! Each is a UUID v4 newtype so a [`RoomId`] can never be handed to an
//! operation expecting a [`DeviceId`]. They serialize as the bare UUID string
//! and parse back from it, which is what the HTTP paths carry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! uuid_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// A fresh random id.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(raw.trim()).map(Self)
            }
        }
    };
}

uuid_newtype!(
    /// Identifies a [`Room`](crate::room::Room).
    RoomId
);

uuid_newtype!(
    /// Identifies a [`Device`](crate::device::Device).
    DeviceId
);

uuid_newtype!(
    /// Identifies a [`LogEntry`](crate::log::LogEntry).
    LogEntryId
);
