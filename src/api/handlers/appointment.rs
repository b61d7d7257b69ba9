//! Appointment handlers: booking, listing, and status decisions.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, patch, post};
use axum::{Json, Router};

use crate::api::auth::AuthUser;
use crate::api::dto::{AppointmentBriefDto, BookResponse, UpdateStatusRequest};
use crate::app_state::AppState;
use crate::domain::{AppointmentId, SlotId};
use crate::error::{ErrorResponse, GatewayError};

/// `POST /slots/{id}/book` — Book an open slot for the calling patient.
///
/// # Errors
///
/// Returns [`GatewayError::SlotUnavailable`] when a competing booking won
/// the slot, [`GatewayError::SlotNotFound`] when it does not exist.
#[utoipa::path(
    post,
    path = "/api/v1/slots/{id}/book",
    tag = "Appointments",
    summary = "Book an open slot",
    description = "Atomically claims the slot for the calling patient. Exactly one concurrent booking per slot succeeds; the rest receive 409 and may retry with a different slot.",
    params(
        ("id" = uuid::Uuid, Path, description = "Slot ID"),
    ),
    responses(
        (status = 201, description = "Appointment created", body = BookResponse),
        (status = 404, description = "Slot not found", body = ErrorResponse),
        (status = 409, description = "Slot already claimed", body = ErrorResponse),
    )
)]
pub async fn book_slot(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, GatewayError> {
    let patient_id = user.require_patient()?;
    let appointment_id = state
        .appointment_service
        .book(SlotId::from_uuid(id), patient_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(BookResponse {
            id: *appointment_id.as_uuid(),
        }),
    ))
}

/// `GET /appointments/me` — List the caller's appointments.
///
/// # Errors
///
/// Returns [`GatewayError`] on internal failures.
#[utoipa::path(
    get,
    path = "/api/v1/appointments/me",
    tag = "Appointments",
    summary = "List my appointments",
    description = "Returns the caller's appointments (as therapist or patient, per their role), earliest slot first.",
    responses(
        (status = 200, description = "Appointment briefs", body = Vec<AppointmentBriefDto>),
        (status = 401, description = "Missing identity", body = ErrorResponse),
    )
)]
pub async fn list_my_appointments(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, GatewayError> {
    let briefs = state
        .appointment_service
        .list_my_appointments(user.id, user.role)
        .await?;

    let body: Vec<AppointmentBriefDto> =
        briefs.into_iter().map(AppointmentBriefDto::from).collect();
    Ok(Json(body))
}

/// `PATCH /appointments/{id}/status` — Decide a booked appointment.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidStatus`], [`GatewayError::Forbidden`],
/// [`GatewayError::AppointmentNotFound`], or
/// [`GatewayError::AlreadyDecided`] per the status machine's validation
/// order.
#[utoipa::path(
    patch,
    path = "/api/v1/appointments/{id}/status",
    tag = "Appointments",
    summary = "Confirm or reject an appointment",
    description = "Transitions a booked appointment to confirmed or rejected. Only the owning therapist may decide, and only once; a confirmation schedules a reminder 24 hours before the slot start.",
    params(
        ("id" = uuid::Uuid, Path, description = "Appointment ID"),
    ),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Updated appointment", body = AppointmentBriefDto),
        (status = 400, description = "Invalid status", body = ErrorResponse),
        (status = 403, description = "Caller does not own the appointment", body = ErrorResponse),
        (status = 404, description = "Appointment not found", body = ErrorResponse),
        (status = 409, description = "Appointment already decided", body = ErrorResponse),
    )
)]
pub async fn update_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<uuid::Uuid>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let therapist_id = user.require_therapist()?;
    let brief = state
        .appointment_service
        .update_status(AppointmentId::from_uuid(id), therapist_id, &req.status)
        .await?;

    Ok(Json(AppointmentBriefDto::from(brief)))
}

/// Appointment routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/slots/{id}/book", post(book_slot))
        .route("/appointments/me", get(list_my_appointments))
        .route("/appointments/{id}/status", patch(update_status))
}
