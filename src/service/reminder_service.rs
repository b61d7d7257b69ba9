//! Reminder scheduling and listing.
//!
//! Scheduling is invoked by the status machine when a therapist confirms an
//! appointment: the reminder fires a fixed lead time before the slot start.
//! Listing backs the patient-facing reminders endpoint.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::AppointmentId;
use crate::domain::reminder;
use crate::error::GatewayError;
use crate::persistence::Store;

/// A reminder as presented to the patient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderItem {
    /// Reminder row ID.
    pub id: Uuid,
    /// Message text.
    pub message: String,
    /// When the reminder fires.
    pub remind_at: DateTime<Utc>,
}

/// Scheduler and read side for appointment reminders.
#[derive(Debug, Clone)]
pub struct ReminderService {
    store: Arc<dyn Store>,
}

impl ReminderService {
    /// Creates a new `ReminderService`.
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Persists a reminder for the appointment, scheduled
    /// [`reminder::REMINDER_LEAD_HOURS`] before the slot start. Idempotent
    /// per appointment.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::AppointmentNotFound`] when the appointment
    /// vanished between confirmation and scheduling, or a persistence error
    /// on database failure. The caller treats both as non-fatal.
    pub async fn schedule(&self, appointment_id: AppointmentId) -> Result<(), GatewayError> {
        let detail = self
            .store
            .get_appointment(appointment_id)
            .await?
            .ok_or(GatewayError::AppointmentNotFound(
                *appointment_id.as_uuid(),
            ))?;

        let scheduled_for = reminder::scheduled_for(detail.start_ts);
        self.store
            .insert_reminder(appointment_id, scheduled_for, reminder::payload(detail.start_ts))
            .await?;

        tracing::info!(%appointment_id, %scheduled_for, "reminder scheduled");
        Ok(())
    }

    /// Lists the patient's reminders scheduled at or after `now`, earliest
    /// first. Messages fall back to the derived default when the stored
    /// payload has none.
    ///
    /// # Errors
    ///
    /// Returns a persistence error on database failure.
    pub async fn list_upcoming(
        &self,
        patient_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<ReminderItem>, GatewayError> {
        let records = self.store.list_upcoming_reminders(patient_id, now).await?;
        Ok(records
            .into_iter()
            .map(|r| {
                let message = r
                    .payload
                    .as_ref()
                    .and_then(|p| p.get("message"))
                    .and_then(|m| m.as_str())
                    .filter(|m| !m.is_empty())
                    .map_or_else(|| reminder::default_message(r.appointment_start), String::from);
                ReminderItem {
                    id: r.id,
                    message,
                    remind_at: r.scheduled_for,
                }
            })
            .collect())
    }
}
