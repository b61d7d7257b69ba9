//! Read models returned by the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{AppointmentId, AppointmentStatus, SlotId};

/// Outcome of a committed booking transaction.
#[derive(Debug, Clone, Copy)]
pub struct BookingRecord {
    /// The appointment created by the transaction.
    pub appointment_id: AppointmentId,
    /// The slot that was flipped to `reserved`.
    pub slot_id: SlotId,
    /// Owner of the slot, denormalized for the notification payload.
    pub therapist_id: Uuid,
    /// The patient who won the slot.
    pub patient_id: Uuid,
}

/// An appointment joined with its slot window and participant display names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentDetail {
    /// Appointment identifier.
    pub id: AppointmentId,
    /// The originating slot.
    pub slot_id: SlotId,
    /// Owning therapist.
    pub therapist_id: Uuid,
    /// Booking patient.
    pub patient_id: Uuid,
    /// Current status.
    pub status: AppointmentStatus,
    /// Slot window start.
    pub start_ts: DateTime<Utc>,
    /// Slot window end.
    pub end_ts: DateTime<Utc>,
    /// Therapist display name, when the profile collaborator has one.
    pub therapist_name: Option<String>,
    /// Patient display name, when the profile collaborator has one.
    pub patient_name: Option<String>,
}

/// A reminder row joined with the appointment's slot start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderRecord {
    /// Reminder row identifier.
    pub id: Uuid,
    /// The confirmed appointment the reminder belongs to.
    pub appointment_id: AppointmentId,
    /// When the reminder fires.
    pub scheduled_for: DateTime<Utc>,
    /// Message payload written at confirmation time.
    pub payload: Option<serde_json::Value>,
    /// Start of the appointment's slot, for message fallback.
    pub appointment_start: DateTime<Utc>,
}
