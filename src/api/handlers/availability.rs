//! Availability handlers: publish and list open slots.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::auth::AuthUser;
use crate::api::dto::{CreateAvailabilityRequest, SlotDto};
use crate::app_state::AppState;
use crate::domain::SlotWindow;
use crate::error::{ErrorResponse, GatewayError};

/// `POST /availability` — Publish open slots for the calling therapist.
///
/// # Errors
///
/// Returns [`GatewayError`] on invalid windows or when the caller is not a
/// therapist.
#[utoipa::path(
    post,
    path = "/api/v1/availability",
    tag = "Availability",
    summary = "Publish availability slots",
    description = "Publishes one open slot per submitted window. Duplicate windows are silently ignored, so republishing a schedule is safe.",
    request_body = CreateAvailabilityRequest,
    responses(
        (status = 201, description = "Slots published"),
        (status = 400, description = "Invalid slot window", body = ErrorResponse),
        (status = 403, description = "Caller is not a therapist", body = ErrorResponse),
    )
)]
pub async fn create_availability(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<CreateAvailabilityRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let therapist_id = user.require_therapist()?;
    let windows: Vec<SlotWindow> = req.slots.iter().map(SlotWindow::from).collect();

    state
        .appointment_service
        .create_availability(therapist_id, &windows)
        .await?;

    Ok(StatusCode::CREATED)
}

/// `GET /availability/{therapist_id}` — List a therapist's open slots.
///
/// # Errors
///
/// Returns [`GatewayError`] on internal failures.
#[utoipa::path(
    get,
    path = "/api/v1/availability/{therapist_id}",
    tag = "Availability",
    summary = "List a therapist's open slots",
    description = "Returns the therapist's open slots ordered by start time ascending. Reserved slots are never listed.",
    params(
        ("therapist_id" = uuid::Uuid, Path, description = "Therapist user ID"),
    ),
    responses(
        (status = 200, description = "Open slots", body = Vec<SlotDto>),
    )
)]
pub async fn list_availability(
    State(state): State<AppState>,
    Path(therapist_id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, GatewayError> {
    let slots = state
        .appointment_service
        .list_availability(therapist_id)
        .await?;

    let body: Vec<SlotDto> = slots.into_iter().map(SlotDto::from).collect();
    Ok(Json(body))
}

/// Availability routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/availability", post(create_availability))
        .route("/availability/{therapist_id}", get(list_availability))
}
