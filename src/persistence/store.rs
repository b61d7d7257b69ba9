//! Store contract between the service layer and the database.
//!
//! Services depend on this trait rather than on `sqlx` directly so that the
//! booking and reminder logic can be tested against an in-memory store. The
//! single production implementation is
//! [`PostgresStore`](super::postgres::PostgresStore), which carries the
//! row-locking booking transaction; single-winner semantics must hold across
//! process instances, so they are never emulated with in-process locks.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::models::{AppointmentDetail, BookingRecord, ReminderRecord};
use crate::domain::{AppointmentId, AppointmentStatus, Slot, SlotId, SlotWindow, UserRole};
use crate::error::GatewayError;

/// Persistence operations for slots, appointments, and reminders.
#[async_trait]
pub trait Store: Send + Sync + std::fmt::Debug {
    /// Inserts one open slot per window. Duplicate
    /// (therapist, start, end) triples are silently ignored.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] when the store is
    /// unreachable.
    async fn insert_open_slots(
        &self,
        therapist_id: Uuid,
        windows: &[SlotWindow],
    ) -> Result<(), GatewayError>;

    /// Returns the therapist's open slots ordered by start ascending.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] on database failure.
    async fn list_open_slots(&self, therapist_id: Uuid) -> Result<Vec<Slot>, GatewayError>;

    /// Atomically claims an open slot for `patient_id`: locks the slot row,
    /// verifies it is still open, inserts the appointment, and flips the
    /// slot to `reserved` — all in one transaction. The appointment exists
    /// only once the transaction has committed.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::SlotNotFound`] when the slot does not exist.
    /// - [`GatewayError::SlotUnavailable`] when a competing booking won;
    ///   nothing is mutated.
    /// - [`GatewayError::PersistenceError`] on database failure or deadline
    ///   expiry; the transaction is rolled back and the slot left open.
    async fn book_slot(
        &self,
        slot_id: SlotId,
        patient_id: Uuid,
    ) -> Result<BookingRecord, GatewayError>;

    /// Fetches an appointment with its slot window and display names.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] on database failure.
    async fn get_appointment(
        &self,
        id: AppointmentId,
    ) -> Result<Option<AppointmentDetail>, GatewayError>;

    /// Moves a `booked` appointment to the given terminal status. Returns
    /// `false` without mutating anything when the appointment was already
    /// decided — the conditional update is what makes repeated decisions
    /// safe under concurrent requests.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] on database failure.
    async fn decide_appointment(
        &self,
        id: AppointmentId,
        status: AppointmentStatus,
    ) -> Result<bool, GatewayError>;

    /// Persists a reminder for a confirmed appointment. Idempotent per
    /// appointment: a second insert for the same appointment is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] on database failure.
    async fn insert_reminder(
        &self,
        appointment_id: AppointmentId,
        scheduled_for: DateTime<Utc>,
        payload: serde_json::Value,
    ) -> Result<(), GatewayError>;

    /// Lists the user's appointments (by role) ordered by slot start.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] on database failure.
    async fn list_appointments(
        &self,
        user_id: Uuid,
        role: UserRole,
    ) -> Result<Vec<AppointmentDetail>, GatewayError>;

    /// Lists the patient's reminders scheduled at or after `now`, ordered
    /// by schedule time ascending.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] on database failure.
    async fn list_upcoming_reminders(
        &self,
        patient_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<ReminderRecord>, GatewayError>;
}
