//! Reminder handlers.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;

use crate::api::auth::AuthUser;
use crate::api::dto::ReminderDto;
use crate::app_state::AppState;
use crate::error::{ErrorResponse, GatewayError};

/// `GET /reminders/me` — List the calling patient's upcoming reminders.
///
/// # Errors
///
/// Returns [`GatewayError`] on internal failures.
#[utoipa::path(
    get,
    path = "/api/v1/reminders/me",
    tag = "Reminders",
    summary = "List my upcoming reminders",
    description = "Returns reminders for the caller's confirmed appointments that are scheduled from now on, earliest first.",
    responses(
        (status = 200, description = "Upcoming reminders", body = Vec<ReminderDto>),
        (status = 401, description = "Missing identity", body = ErrorResponse),
    )
)]
pub async fn list_my_reminders(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, GatewayError> {
    let patient_id = user.require_patient()?;
    let items = state
        .reminder_service
        .list_upcoming(patient_id, Utc::now())
        .await?;

    let body: Vec<ReminderDto> = items.into_iter().map(ReminderDto::from).collect();
    Ok(Json(body))
}

/// Reminder routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/reminders/me", get(list_my_reminders))
}
