//! Appointment service: availability publishing, slot booking, and the
//! appointment status machine.
//!
//! Booking delegates single-winner semantics entirely to the store's
//! row-locking transaction; this layer adds validation, the post-commit
//! notification dispatch, and the confirm-triggers-reminder rule.

use std::sync::Arc;

use uuid::Uuid;

use crate::dispatch::BookingDispatcher;
use crate::domain::{
    AppointmentDecision, AppointmentId, AppointmentStatus, Slot, SlotId, SlotWindow, UserRole,
};
use crate::error::GatewayError;
use crate::persistence::Store;
use crate::persistence::models::AppointmentDetail;
use crate::service::reminder_service::ReminderService;

/// One side of an appointment, with denormalized name parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    /// User ID.
    pub id: Uuid,
    /// First name, empty when the profile has none.
    pub first_name: String,
    /// Last name, empty when the profile has none.
    pub last_name: String,
}

/// Appointment view returned to callers: status plus slot window plus both
/// participants.
#[derive(Debug, Clone)]
pub struct AppointmentBrief {
    /// Appointment ID.
    pub id: AppointmentId,
    /// Slot window start.
    pub start_ts: chrono::DateTime<chrono::Utc>,
    /// Slot window end.
    pub end_ts: chrono::DateTime<chrono::Utc>,
    /// Current status.
    pub status: AppointmentStatus,
    /// Owning therapist.
    pub therapist: Participant,
    /// Booking patient.
    pub patient: Participant,
}

/// Orchestration layer for availability and appointments.
#[derive(Debug, Clone)]
pub struct AppointmentService {
    store: Arc<dyn Store>,
    dispatcher: BookingDispatcher,
    reminders: ReminderService,
}

impl AppointmentService {
    /// Creates a new `AppointmentService`.
    #[must_use]
    pub fn new(
        store: Arc<dyn Store>,
        dispatcher: BookingDispatcher,
        reminders: ReminderService,
    ) -> Self {
        Self {
            store,
            dispatcher,
            reminders,
        }
    }

    /// Publishes open slots for a therapist. Duplicate windows are silently
    /// ignored, so republishing the same schedule is safe.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] for empty or inverted
    /// windows, or a persistence error when the store is unreachable.
    pub async fn create_availability(
        &self,
        therapist_id: Uuid,
        windows: &[SlotWindow],
    ) -> Result<(), GatewayError> {
        for window in windows {
            window.validate()?;
        }
        self.store.insert_open_slots(therapist_id, windows).await?;
        tracing::info!(%therapist_id, count = windows.len(), "availability published");
        Ok(())
    }

    /// Lists a therapist's open slots, earliest first.
    ///
    /// # Errors
    ///
    /// Returns a persistence error on database failure.
    pub async fn list_availability(&self, therapist_id: Uuid) -> Result<Vec<Slot>, GatewayError> {
        self.store.list_open_slots(therapist_id).await
    }

    /// Books an open slot for a patient.
    ///
    /// Exactly one concurrent call per slot succeeds; the rest receive
    /// [`GatewayError::SlotUnavailable`]. After the transaction commits,
    /// the workflow notification is dispatched without being awaited —
    /// its outcome cannot fail the booking.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::SlotNotFound`] when the slot does not exist.
    /// - [`GatewayError::SlotUnavailable`] when a competing booking won.
    /// - [`GatewayError::PersistenceError`] on database failure; the slot
    ///   is left open.
    pub async fn book(
        &self,
        slot_id: SlotId,
        patient_id: Uuid,
    ) -> Result<AppointmentId, GatewayError> {
        let booking = self.store.book_slot(slot_id, patient_id).await?;

        self.dispatcher.notify_booked(&booking);

        tracing::info!(
            appointment_id = %booking.appointment_id,
            %slot_id,
            %patient_id,
            "slot booked"
        );
        Ok(booking.appointment_id)
    }

    /// Lists the user's appointments as briefs, earliest slot first.
    ///
    /// # Errors
    ///
    /// Returns a persistence error on database failure.
    pub async fn list_my_appointments(
        &self,
        user_id: Uuid,
        role: UserRole,
    ) -> Result<Vec<AppointmentBrief>, GatewayError> {
        let details = self.store.list_appointments(user_id, role).await?;
        Ok(details.into_iter().map(to_brief).collect())
    }

    /// Applies a therapist's decision to a booked appointment.
    ///
    /// Validation order: the requested status must be a valid decision,
    /// the appointment must exist, the caller must own it, and it must not
    /// already be decided. A confirmation schedules a reminder; if that
    /// scheduling fails the confirmation stands and the failure is only
    /// logged.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::InvalidStatus`] for statuses outside
    ///   `{confirmed, rejected}`.
    /// - [`GatewayError::AppointmentNotFound`] when the appointment does
    ///   not exist.
    /// - [`GatewayError::Forbidden`] when the caller is not the owning
    ///   therapist.
    /// - [`GatewayError::AlreadyDecided`] when the appointment had already
    ///   left the `booked` state.
    pub async fn update_status(
        &self,
        appointment_id: AppointmentId,
        therapist_id: Uuid,
        requested_status: &str,
    ) -> Result<AppointmentBrief, GatewayError> {
        let decision = AppointmentDecision::parse(requested_status)?;

        let detail = self
            .store
            .get_appointment(appointment_id)
            .await?
            .ok_or(GatewayError::AppointmentNotFound(
                *appointment_id.as_uuid(),
            ))?;
        if detail.therapist_id != therapist_id {
            return Err(GatewayError::Forbidden);
        }

        let transitioned = self
            .store
            .decide_appointment(appointment_id, decision.target_status())
            .await?;
        if !transitioned {
            return Err(GatewayError::AlreadyDecided(*appointment_id.as_uuid()));
        }

        if decision == AppointmentDecision::Confirm {
            if let Err(err) = self.reminders.schedule(appointment_id).await {
                // The confirmation is already durable; the reminder is
                // best-effort.
                tracing::warn!(%appointment_id, error = %err, "reminder scheduling failed");
            }
        }

        tracing::info!(
            %appointment_id,
            %therapist_id,
            status = decision.target_status().as_str(),
            "appointment decided"
        );

        let refreshed = self
            .store
            .get_appointment(appointment_id)
            .await?
            .ok_or(GatewayError::AppointmentNotFound(
                *appointment_id.as_uuid(),
            ))?;
        Ok(to_brief(refreshed))
    }
}

fn to_brief(detail: AppointmentDetail) -> AppointmentBrief {
    let (t_first, t_last) = split_display_name(detail.therapist_name.as_deref().unwrap_or(""));
    let (p_first, p_last) = split_display_name(detail.patient_name.as_deref().unwrap_or(""));
    AppointmentBrief {
        id: detail.id,
        start_ts: detail.start_ts,
        end_ts: detail.end_ts,
        status: detail.status,
        therapist: Participant {
            id: detail.therapist_id,
            first_name: t_first,
            last_name: t_last,
        },
        patient: Participant {
            id: detail.patient_id,
            first_name: p_first,
            last_name: p_last,
        },
    }
}

/// Splits a profile display name into (first, last) at the first space.
fn split_display_name(name: &str) -> (String, String) {
    match name.split_once(' ') {
        Some((first, last)) => (first.to_string(), last.to_string()),
        None => (name.to_string(), String::new()),
    }
}
