//! Post-commit booking notification dispatch.
//!
//! [`BookingDispatcher::notify_booked`] runs strictly after the booking
//! transaction has committed. The submission happens on a detached task
//! whose error channel ends at a log line: notification outcome must never
//! unwind or delay a booking.

use std::sync::Arc;

use crate::persistence::models::BookingRecord;

use super::engine::WorkflowEngine;

/// Job name submitted for every successful booking.
pub const BOOKING_JOB: &str = "booking-confirmation";

/// Fire-and-forget dispatcher for booking side effects.
#[derive(Debug, Clone)]
pub struct BookingDispatcher {
    engine: Option<Arc<dyn WorkflowEngine>>,
    task_queue: String,
}

impl BookingDispatcher {
    /// Creates a dispatcher. `engine = None` means the workflow engine is
    /// not configured in this deployment and every notification is a no-op.
    #[must_use]
    pub fn new(engine: Option<Arc<dyn WorkflowEngine>>, task_queue: String) -> Self {
        Self { engine, task_queue }
    }

    /// Submits the booking notification job without awaiting its outcome.
    pub fn notify_booked(&self, booking: &BookingRecord) {
        let Some(engine) = self.engine.clone() else {
            tracing::debug!(
                appointment_id = %booking.appointment_id,
                "workflow engine not configured; skipping booking notification"
            );
            return;
        };

        let task_queue = self.task_queue.clone();
        let appointment_id = booking.appointment_id;
        let payload = serde_json::json!({
            "appointment_id": booking.appointment_id,
            "patient_id": booking.patient_id,
            "therapist_id": booking.therapist_id,
        });

        tokio::spawn(async move {
            if let Err(err) = engine.submit(&task_queue, BOOKING_JOB, payload).await {
                tracing::warn!(%appointment_id, error = %err, "booking notification failed");
            } else {
                tracing::debug!(%appointment_id, "booking notification submitted");
            }
        });
    }

    /// Whether an engine is configured. Used only for startup logging.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.engine.is_some()
    }

    /// A dispatcher with no engine: every notification is a logged no-op.
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(None, String::new())
    }
}
