//! PostgreSQL implementation of the store.
//!
//! The booking transaction relies on `SELECT … FOR UPDATE` to serialize
//! concurrent claims on the same slot row: whichever transaction acquires
//! the row lock first wins, and every other contender observes the flipped
//! status after the lock is released. Losing is surfaced as a distinct
//! conflict, not retried.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::models::{AppointmentDetail, BookingRecord, ReminderRecord};
use super::store::Store;
use crate::domain::{
    AppointmentId, AppointmentStatus, Slot, SlotId, SlotStatus, SlotWindow, UserRole,
};
use crate::error::GatewayError;

/// PostgreSQL-backed store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
    booking_timeout: Duration,
}

impl PostgresStore {
    /// Creates a new store with the given connection pool and booking
    /// transaction deadline.
    #[must_use]
    pub fn new(pool: PgPool, booking_timeout: Duration) -> Self {
        Self {
            pool,
            booking_timeout,
        }
    }

    async fn book_slot_tx(
        &self,
        slot_id: SlotId,
        patient_id: Uuid,
    ) -> Result<BookingRecord, GatewayError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        // Row lock serializes concurrent bookings of this slot; other slots
        // stay unlocked.
        let row = sqlx::query_as::<_, (Uuid, Uuid, String)>(
            "SELECT id, therapist_id, status FROM availability_slots WHERE id = $1 FOR UPDATE",
        )
        .bind(slot_id.as_uuid())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        let Some((id, therapist_id, status)) = row else {
            return Err(GatewayError::SlotNotFound(*slot_id.as_uuid()));
        };
        if SlotStatus::parse(&status)? != SlotStatus::Open {
            return Err(GatewayError::SlotUnavailable(id));
        }

        let (appointment_id,) = sqlx::query_as::<_, (Uuid,)>(
            "INSERT INTO appointments (slot_id, therapist_id, patient_id, status) \
             VALUES ($1, $2, $3, 'booked') RETURNING id",
        )
        .bind(id)
        .bind(therapist_id)
        .bind(patient_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        sqlx::query("UPDATE availability_slots SET status = 'reserved' WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        Ok(BookingRecord {
            appointment_id: AppointmentId::from_uuid(appointment_id),
            slot_id: SlotId::from_uuid(id),
            therapist_id,
            patient_id,
        })
    }
}

/// Shared SELECT for appointment details; `$1`/`$2` are appended per query.
const APPOINTMENT_DETAIL_SELECT: &str =
    "SELECT a.id, a.slot_id, a.therapist_id, a.patient_id, a.status, \
            s.start_ts, s.end_ts, tp.display_name, pp.display_name \
     FROM appointments a \
     JOIN availability_slots s ON s.id = a.slot_id \
     LEFT JOIN profiles tp ON tp.user_id = a.therapist_id \
     LEFT JOIN profiles pp ON pp.user_id = a.patient_id";

type AppointmentDetailTuple = (
    Uuid,
    Uuid,
    Uuid,
    Uuid,
    String,
    DateTime<Utc>,
    DateTime<Utc>,
    Option<String>,
    Option<String>,
);

fn map_detail(row: AppointmentDetailTuple) -> Result<AppointmentDetail, GatewayError> {
    let (id, slot_id, therapist_id, patient_id, status, start_ts, end_ts, tp_name, pp_name) = row;
    Ok(AppointmentDetail {
        id: AppointmentId::from_uuid(id),
        slot_id: SlotId::from_uuid(slot_id),
        therapist_id,
        patient_id,
        status: AppointmentStatus::parse(&status)?,
        start_ts,
        end_ts,
        therapist_name: tp_name,
        patient_name: pp_name,
    })
}

#[async_trait]
impl Store for PostgresStore {
    async fn insert_open_slots(
        &self,
        therapist_id: Uuid,
        windows: &[SlotWindow],
    ) -> Result<(), GatewayError> {
        for window in windows {
            sqlx::query(
                "INSERT INTO availability_slots (therapist_id, start_ts, end_ts, status) \
                 VALUES ($1, $2, $3, 'open') \
                 ON CONFLICT (therapist_id, start_ts, end_ts) DO NOTHING",
            )
            .bind(therapist_id)
            .bind(window.start_ts)
            .bind(window.end_ts)
            .execute(&self.pool)
            .await
            .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;
        }
        Ok(())
    }

    async fn list_open_slots(&self, therapist_id: Uuid) -> Result<Vec<Slot>, GatewayError> {
        let rows = sqlx::query_as::<_, (Uuid, Uuid, DateTime<Utc>, DateTime<Utc>, String)>(
            "SELECT id, therapist_id, start_ts, end_ts, status FROM availability_slots \
             WHERE therapist_id = $1 AND status = 'open' ORDER BY start_ts ASC",
        )
        .bind(therapist_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        rows.into_iter()
            .map(|(id, therapist_id, start_ts, end_ts, status)| {
                Ok(Slot {
                    id: SlotId::from_uuid(id),
                    therapist_id,
                    start_ts,
                    end_ts,
                    status: SlotStatus::parse(&status)?,
                })
            })
            .collect()
    }

    async fn book_slot(
        &self,
        slot_id: SlotId,
        patient_id: Uuid,
    ) -> Result<BookingRecord, GatewayError> {
        // The deadline bounds lock-wait time. When it expires the dropped
        // transaction rolls back, releasing the row lock so the slot is not
        // blocked for other bookers.
        match tokio::time::timeout(self.booking_timeout, self.book_slot_tx(slot_id, patient_id))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(GatewayError::PersistenceError(format!(
                "booking transaction for slot {slot_id} exceeded its deadline and was rolled back"
            ))),
        }
    }

    async fn get_appointment(
        &self,
        id: AppointmentId,
    ) -> Result<Option<AppointmentDetail>, GatewayError> {
        let query = format!("{APPOINTMENT_DETAIL_SELECT} WHERE a.id = $1");
        let row = sqlx::query_as::<_, AppointmentDetailTuple>(&query)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        row.map(map_detail).transpose()
    }

    async fn decide_appointment(
        &self,
        id: AppointmentId,
        status: AppointmentStatus,
    ) -> Result<bool, GatewayError> {
        let result = sqlx::query(
            "UPDATE appointments SET status = $2, updated_at = now() \
             WHERE id = $1 AND status = 'booked'",
        )
        .bind(id.as_uuid())
        .bind(status.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn insert_reminder(
        &self,
        appointment_id: AppointmentId,
        scheduled_for: DateTime<Utc>,
        payload: serde_json::Value,
    ) -> Result<(), GatewayError> {
        sqlx::query(
            "INSERT INTO reminders (appointment_id, scheduled_for, payload) \
             VALUES ($1, $2, $3) ON CONFLICT (appointment_id) DO NOTHING",
        )
        .bind(appointment_id.as_uuid())
        .bind(scheduled_for)
        .bind(payload)
        .execute(&self.pool)
        .await
        .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        Ok(())
    }

    async fn list_appointments(
        &self,
        user_id: Uuid,
        role: UserRole,
    ) -> Result<Vec<AppointmentDetail>, GatewayError> {
        let query = format!(
            "{APPOINTMENT_DETAIL_SELECT} \
             WHERE CASE WHEN $2 = 'therapist' THEN a.therapist_id = $1 \
                        ELSE a.patient_id = $1 END \
             ORDER BY s.start_ts ASC"
        );
        let role_str = match role {
            UserRole::Therapist => "therapist",
            UserRole::Patient => "patient",
        };
        let rows = sqlx::query_as::<_, AppointmentDetailTuple>(&query)
            .bind(user_id)
            .bind(role_str)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        rows.into_iter().map(map_detail).collect()
    }

    async fn list_upcoming_reminders(
        &self,
        patient_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<ReminderRecord>, GatewayError> {
        let rows = sqlx::query_as::<
            _,
            (
                Uuid,
                Uuid,
                DateTime<Utc>,
                Option<serde_json::Value>,
                DateTime<Utc>,
            ),
        >(
            "SELECT r.id, r.appointment_id, r.scheduled_for, r.payload, s.start_ts \
             FROM reminders r \
             JOIN appointments a ON a.id = r.appointment_id \
             JOIN availability_slots s ON s.id = a.slot_id \
             WHERE a.patient_id = $1 AND r.scheduled_for >= $2 \
             ORDER BY r.scheduled_for ASC",
        )
        .bind(patient_id)
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(
                |(id, appointment_id, scheduled_for, payload, appointment_start)| ReminderRecord {
                    id,
                    appointment_id: AppointmentId::from_uuid(appointment_id),
                    scheduled_for,
                    payload,
                    appointment_start,
                },
            )
            .collect())
    }
}
