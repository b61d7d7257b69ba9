//! Shared application state injected into all Axum handlers.
//!
//! Services are constructed once at startup and passed explicitly; there is
//! no process-wide mutable registry.

use std::sync::Arc;

use crate::service::{AppointmentService, ReminderService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Availability, booking, and status-machine operations.
    pub appointment_service: Arc<AppointmentService>,
    /// Reminder listing (scheduling is driven by the appointment service).
    pub reminder_service: Arc<ReminderService>,
}
