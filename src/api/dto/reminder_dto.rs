//! DTOs for the patient reminders endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::service::ReminderItem;

/// A scheduled reminder as presented to the patient.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReminderDto {
    /// Reminder ID.
    #[serde(rename = "_id")]
    pub id: uuid::Uuid,
    /// Message text.
    pub message: String,
    /// When the reminder fires.
    #[serde(rename = "remindAt")]
    pub remind_at: DateTime<Utc>,
}

impl From<ReminderItem> for ReminderDto {
    fn from(item: ReminderItem) -> Self {
        Self {
            id: item.id,
            message: item.message,
            remind_at: item.remind_at,
        }
    }
}
