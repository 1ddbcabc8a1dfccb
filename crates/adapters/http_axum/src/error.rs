//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use homecontrol_domain::error::{HomeControlError, ValidationError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
pub(crate) struct ErrorBody {
    pub(crate) error: String,
}

/// Maps [`HomeControlError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(HomeControlError);

impl ApiError {
    /// Error for a path segment that is not a valid identifier.
    #[must_use]
    pub fn invalid_id(raw: &str) -> Self {
        Self(ValidationError::InvalidId(raw.to_string()).into())
    }
}

impl From<HomeControlError> for ApiError {
    fn from(err: HomeControlError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            HomeControlError::Validation(_) => StatusCode::BAD_REQUEST,
            HomeControlError::NotFound(_) => StatusCode::NOT_FOUND,
        };
        tracing::debug!(%status, error = %self.0, "request failed");

        (
            status,
            Json(ErrorBody {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}
