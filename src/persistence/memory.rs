//! In-memory store used by service-level tests.
//!
//! `book_slot` runs under a single async mutex, so the exactly-one-winner
//! property the production store gets from row locks holds here too. A
//! failure knob lets tests exercise the "reminder insert failed after
//! confirmation" recovery path.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::models::{AppointmentDetail, BookingRecord, ReminderRecord};
use super::store::Store;
use crate::domain::{
    AppointmentId, AppointmentStatus, Slot, SlotId, SlotStatus, SlotWindow, UserRole,
};
use crate::error::GatewayError;

#[derive(Debug, Clone)]
struct StoredAppointment {
    id: AppointmentId,
    slot_id: SlotId,
    therapist_id: Uuid,
    patient_id: Uuid,
    status: AppointmentStatus,
}

#[derive(Debug, Clone)]
struct StoredReminder {
    id: Uuid,
    appointment_id: AppointmentId,
    scheduled_for: DateTime<Utc>,
    payload: serde_json::Value,
}

#[derive(Debug, Default)]
struct State {
    slots: HashMap<SlotId, Slot>,
    appointments: Vec<StoredAppointment>,
    reminders: Vec<StoredReminder>,
    profiles: HashMap<Uuid, String>,
}

/// Mutex-guarded in-memory implementation of [`Store`].
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
    fail_reminder_inserts: AtomicBool,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a display name for a user, as the external profile
    /// collaborator would.
    pub async fn set_profile(&self, user_id: Uuid, display_name: &str) {
        let mut state = self.state.lock().await;
        state.profiles.insert(user_id, display_name.to_string());
    }

    /// Makes every subsequent `insert_reminder` call fail.
    pub fn fail_reminder_inserts(&self) {
        self.fail_reminder_inserts.store(true, Ordering::SeqCst);
    }

    /// Number of reminder rows currently stored.
    pub async fn reminder_count(&self) -> usize {
        self.state.lock().await.reminders.len()
    }

    /// Current status of the slot, if it exists.
    pub async fn slot_status(&self, slot_id: SlotId) -> Option<SlotStatus> {
        self.state.lock().await.slots.get(&slot_id).map(|s| s.status)
    }

    /// Appointments referencing the given slot.
    pub async fn appointments_for_slot(&self, slot_id: SlotId) -> usize {
        self.state
            .lock()
            .await
            .appointments
            .iter()
            .filter(|a| a.slot_id == slot_id)
            .count()
    }

    fn detail(state: &State, appt: &StoredAppointment) -> Option<AppointmentDetail> {
        let slot = state.slots.get(&appt.slot_id)?;
        Some(AppointmentDetail {
            id: appt.id,
            slot_id: appt.slot_id,
            therapist_id: appt.therapist_id,
            patient_id: appt.patient_id,
            status: appt.status,
            start_ts: slot.start_ts,
            end_ts: slot.end_ts,
            therapist_name: state.profiles.get(&appt.therapist_id).cloned(),
            patient_name: state.profiles.get(&appt.patient_id).cloned(),
        })
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn insert_open_slots(
        &self,
        therapist_id: Uuid,
        windows: &[SlotWindow],
    ) -> Result<(), GatewayError> {
        let mut state = self.state.lock().await;
        for window in windows {
            let duplicate = state.slots.values().any(|s| {
                s.therapist_id == therapist_id
                    && s.start_ts == window.start_ts
                    && s.end_ts == window.end_ts
            });
            if duplicate {
                continue;
            }
            let slot = Slot {
                id: SlotId::new(),
                therapist_id,
                start_ts: window.start_ts,
                end_ts: window.end_ts,
                status: SlotStatus::Open,
            };
            state.slots.insert(slot.id, slot);
        }
        Ok(())
    }

    async fn list_open_slots(&self, therapist_id: Uuid) -> Result<Vec<Slot>, GatewayError> {
        let state = self.state.lock().await;
        let mut slots: Vec<Slot> = state
            .slots
            .values()
            .filter(|s| s.therapist_id == therapist_id && s.status == SlotStatus::Open)
            .cloned()
            .collect();
        slots.sort_by_key(|s| s.start_ts);
        Ok(slots)
    }

    async fn book_slot(
        &self,
        slot_id: SlotId,
        patient_id: Uuid,
    ) -> Result<BookingRecord, GatewayError> {
        let mut state = self.state.lock().await;
        let Some(slot) = state.slots.get(&slot_id).cloned() else {
            return Err(GatewayError::SlotNotFound(*slot_id.as_uuid()));
        };
        if slot.status != SlotStatus::Open {
            return Err(GatewayError::SlotUnavailable(*slot_id.as_uuid()));
        }

        let appointment = StoredAppointment {
            id: AppointmentId::new(),
            slot_id,
            therapist_id: slot.therapist_id,
            patient_id,
            status: AppointmentStatus::Booked,
        };
        let record = BookingRecord {
            appointment_id: appointment.id,
            slot_id,
            therapist_id: slot.therapist_id,
            patient_id,
        };
        state.appointments.push(appointment);
        if let Some(s) = state.slots.get_mut(&slot_id) {
            s.status = SlotStatus::Reserved;
        }
        Ok(record)
    }

    async fn get_appointment(
        &self,
        id: AppointmentId,
    ) -> Result<Option<AppointmentDetail>, GatewayError> {
        let state = self.state.lock().await;
        Ok(state
            .appointments
            .iter()
            .find(|a| a.id == id)
            .and_then(|a| Self::detail(&state, a)))
    }

    async fn decide_appointment(
        &self,
        id: AppointmentId,
        status: AppointmentStatus,
    ) -> Result<bool, GatewayError> {
        let mut state = self.state.lock().await;
        let Some(appt) = state
            .appointments
            .iter_mut()
            .find(|a| a.id == id && a.status == AppointmentStatus::Booked)
        else {
            return Ok(false);
        };
        appt.status = status;
        Ok(true)
    }

    async fn insert_reminder(
        &self,
        appointment_id: AppointmentId,
        scheduled_for: DateTime<Utc>,
        payload: serde_json::Value,
    ) -> Result<(), GatewayError> {
        if self.fail_reminder_inserts.load(Ordering::SeqCst) {
            return Err(GatewayError::PersistenceError(
                "reminder insert failed".to_string(),
            ));
        }
        let mut state = self.state.lock().await;
        if state
            .reminders
            .iter()
            .any(|r| r.appointment_id == appointment_id)
        {
            return Ok(());
        }
        state.reminders.push(StoredReminder {
            id: Uuid::new_v4(),
            appointment_id,
            scheduled_for,
            payload,
        });
        Ok(())
    }

    async fn list_appointments(
        &self,
        user_id: Uuid,
        role: UserRole,
    ) -> Result<Vec<AppointmentDetail>, GatewayError> {
        let state = self.state.lock().await;
        let mut details: Vec<AppointmentDetail> = state
            .appointments
            .iter()
            .filter(|a| match role {
                UserRole::Therapist => a.therapist_id == user_id,
                UserRole::Patient => a.patient_id == user_id,
            })
            .filter_map(|a| Self::detail(&state, a))
            .collect();
        details.sort_by_key(|d| d.start_ts);
        Ok(details)
    }

    async fn list_upcoming_reminders(
        &self,
        patient_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<ReminderRecord>, GatewayError> {
        let state = self.state.lock().await;
        let mut records: Vec<ReminderRecord> = state
            .reminders
            .iter()
            .filter(|r| r.scheduled_for >= now)
            .filter_map(|r| {
                let appt = state
                    .appointments
                    .iter()
                    .find(|a| a.id == r.appointment_id && a.patient_id == patient_id)?;
                let slot = state.slots.get(&appt.slot_id)?;
                Some(ReminderRecord {
                    id: r.id,
                    appointment_id: r.appointment_id,
                    scheduled_for: r.scheduled_for,
                    payload: Some(r.payload.clone()),
                    appointment_start: slot.start_ts,
                })
            })
            .collect();
        records.sort_by_key(|r| r.scheduled_for);
        Ok(records)
    }
}
