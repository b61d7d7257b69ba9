//! Gateway error types with HTTP status code mapping.
//!
//! [`GatewayError`] is the central error type for the gateway. Each variant
//! maps to a specific HTTP status code and structured JSON error response.
//! Booking conflicts and ownership violations are distinct variants so the
//! HTTP layer can surface them as expected business outcomes (409 / 403)
//! rather than generic server errors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 4001,
///     "message": "slot 8f14e45f-... is no longer open",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see code ranges on [`GatewayError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category          | HTTP Status                |
/// |-----------|-------------------|----------------------------|
/// | 1000–1099 | Validation        | 400 Bad Request            |
/// | 1100–1199 | Identity          | 401 / 403                  |
/// | 2000–2999 | Not Found         | 404 Not Found              |
/// | 3000–3999 | Server            | 500 Internal Server Error  |
/// | 4000–4999 | Booking conflicts | 409 Conflict               |
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Appointment status outside the allowed transition set.
    #[error("invalid status: {0}")]
    InvalidStatus(String),

    /// Request carried no usable caller identity.
    #[error("unauthorized")]
    Unauthorized,

    /// Caller does not own the appointment they tried to transition.
    #[error("forbidden")]
    Forbidden,

    /// Availability slot with the given ID was not found.
    #[error("slot not found: {0}")]
    SlotNotFound(uuid::Uuid),

    /// Appointment with the given ID was not found.
    #[error("appointment not found: {0}")]
    AppointmentNotFound(uuid::Uuid),

    /// Slot was already claimed by a competing booking.
    #[error("slot {0} is no longer open")]
    SlotUnavailable(uuid::Uuid),

    /// Appointment already reached a terminal status.
    #[error("appointment {0} has already been decided")]
    AlreadyDecided(uuid::Uuid),

    /// Persistence layer failure.
    #[error("persistence error: {0}")]
    PersistenceError(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::InvalidStatus(_) => 1002,
            Self::Unauthorized => 1101,
            Self::Forbidden => 1102,
            Self::SlotNotFound(_) => 2001,
            Self::AppointmentNotFound(_) => 2002,
            Self::SlotUnavailable(_) => 4001,
            Self::AlreadyDecided(_) => 4002,
            Self::PersistenceError(_) => 3001,
            Self::Internal(_) => 3000,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::InvalidStatus(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::SlotNotFound(_) | Self::AppointmentNotFound(_) => StatusCode::NOT_FOUND,
            Self::SlotUnavailable(_) | Self::AlreadyDecided(_) => StatusCode::CONFLICT,
            Self::PersistenceError(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
