//! Reminder derivation for confirmed appointments.
//!
//! A reminder is scheduled a fixed lead time before the slot start, with a
//! default message embedding the start timestamp. The payload is stored as
//! JSONB so the notification worker can evolve the shape without a schema
//! change.

use chrono::{DateTime, Duration, Utc};

/// Fixed lead time between the reminder and the appointment start.
pub const REMINDER_LEAD_HOURS: i64 = 24;

/// When a reminder for an appointment starting at `start_ts` fires.
#[must_use]
pub fn scheduled_for(start_ts: DateTime<Utc>) -> DateTime<Utc> {
    start_ts - Duration::hours(REMINDER_LEAD_HOURS)
}

/// Default reminder message for an appointment starting at `start_ts`.
#[must_use]
pub fn default_message(start_ts: DateTime<Utc>) -> String {
    format!("Reminder: appointment on {}", start_ts.to_rfc3339())
}

/// JSONB payload persisted with the reminder row.
#[must_use]
pub fn payload(start_ts: DateTime<Utc>) -> serde_json::Value {
    serde_json::json!({ "message": default_message(start_ts) })
}
