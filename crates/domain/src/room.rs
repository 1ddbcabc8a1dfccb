//! Room: a named space grouping devices.

use serde::{Deserialize, Serialize};

use crate::error::{HomeControlError, ValidationError};
use crate::id::RoomId;

/// Icon shown next to a room, resolved through a fixed table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomIcon {
    Sofa,
    Utensils,
    Bed,
    Droplets,
    Bath,
    Monitor,
    Car,
    Trees,
    #[default]
    Box,
}

impl RoomIcon {
    const TABLE: [(&'static str, Self); 9] = [
        ("Sofa", Self::Sofa),
        ("Utensils", Self::Utensils),
        ("Bed", Self::Bed),
        ("Droplets", Self::Droplets),
        ("Bath", Self::Bath),
        ("Monitor", Self::Monitor),
        ("Car", Self::Car),
        ("Trees", Self::Trees),
        ("Box", Self::Box),
    ];

    /// Resolve an icon key, falling back to [`RoomIcon::Box`] for unknown keys.
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        Self::TABLE
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map_or(Self::Box, |(_, icon)| *icon)
    }

    /// The icon-set key this variant renders as.
    #[must_use]
    pub fn key(self) -> &'static str {
        Self::TABLE
            .iter()
            .find(|(_, icon)| *icon == self)
            .map_or("Box", |(name, _)| name)
    }
}

/// A space (living room, kitchen, …) holding devices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub icon: RoomIcon,
    /// Whether the water tank panel is shown in this room.
    pub has_tank_widget: bool,
}

impl Room {
    /// Create a builder for constructing a [`Room`].
    #[must_use]
    pub fn builder() -> RoomBuilder {
        RoomBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HomeControlError::Validation`] when `name` is blank.
    pub fn validate(&self) -> Result<(), HomeControlError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Room`].
#[derive(Debug, Default)]
pub struct RoomBuilder {
    id: Option<RoomId>,
    name: Option<String>,
    icon: Option<RoomIcon>,
    has_tank_widget: bool,
}

impl RoomBuilder {
    #[must_use]
    pub fn id(mut self, id: RoomId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn icon(mut self, icon: RoomIcon) -> Self {
        self.icon = Some(icon);
        self
    }

    #[must_use]
    pub fn has_tank_widget(mut self, has_tank_widget: bool) -> Self {
        self.has_tank_widget = has_tank_widget;
        self
    }

    /// Consume the builder, validate, and return a [`Room`].
    ///
    /// The name is trimmed before validation.
    ///
    /// # Errors
    ///
    /// Returns [`HomeControlError::Validation`] if `name` is missing or blank.
    pub fn build(self) -> Result<Room, HomeControlError> {
        let room = Room {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default().trim().to_string(),
            icon: self.icon.unwrap_or_default(),
            has_tank_widget: self.has_tank_widget,
        };
        room.validate()?;
        Ok(room)
    }
}
