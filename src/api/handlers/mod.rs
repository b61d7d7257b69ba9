//! REST endpoint handlers organized by resource.

pub mod appointment;
pub mod availability;
pub mod reminder;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(availability::routes())
        .merge(appointment::routes())
        .merge(reminder::routes())
}
