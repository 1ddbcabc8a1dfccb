//! Common error types used across the workspace.
//!
//! Guard failures (wrong control mode, pump under automatic control, deleting
//! the last room) are **not** errors: they surface as advisory
//! notifications. Errors are reserved for malformed input and unknown ids.

use crate::device::DeviceKind;

/// Top-level error for every fallible domain and application operation.
#[derive(Debug, thiserror::Error)]
pub enum HomeControlError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("not found: {0}")]
    NotFound(#[from] NotFoundError),
}

/// A domain invariant was violated by the supplied input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("value {value} is out of range for a {kind} device")]
    ValueOutOfRange { kind: DeviceKind, value: u8 },

    #[error("threshold {0} is above 100%")]
    ThresholdOutOfRange(u8),

    #[error("low threshold {low}% must be below high threshold {high}%")]
    InvertedThresholds { low: u8, high: u8 },

    #[error("a home needs at least one room")]
    NoRooms,

    #[error("invalid identifier: {0}")]
    InvalidId(String),

    #[error("command prompt must not be empty")]
    EmptyPrompt,
}

/// Lookup of an entity by id failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_convert_validation_error_into_top_level_error() {
        let err: HomeControlError = ValidationError::EmptyName.into();
        assert!(matches!(
            err,
            HomeControlError::Validation(ValidationError::EmptyName)
        ));
    }

    #[test]
    fn should_describe_missing_entity() {
        let err = NotFoundError {
            entity: "Device",
            id: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Device abc not found");
    }

    #[test]
    fn should_describe_out_of_range_value() {
        let err = ValidationError::ValueOutOfRange {
            kind: DeviceKind::Fan,
            value: 9,
        };
        assert_eq!(err.to_string(), "value 9 is out of range for a fan device");
    }
}
