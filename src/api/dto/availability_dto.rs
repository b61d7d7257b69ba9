//! DTOs for availability publishing and listing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Slot, SlotWindow};

/// One start/end pair in a publish request.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SlotWindowDto {
    /// Window start (RFC 3339).
    #[serde(rename = "startTime")]
    pub start_time: DateTime<Utc>,
    /// Window end (RFC 3339).
    #[serde(rename = "endTime")]
    pub end_time: DateTime<Utc>,
}

impl From<&SlotWindowDto> for SlotWindow {
    fn from(dto: &SlotWindowDto) -> Self {
        Self {
            start_ts: dto.start_time,
            end_ts: dto.end_time,
        }
    }
}

/// Request body for `POST /availability`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateAvailabilityRequest {
    /// Windows to publish as open slots.
    pub slots: Vec<SlotWindowDto>,
}

/// An open slot in a listing response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SlotDto {
    /// Slot ID.
    #[serde(rename = "_id")]
    pub id: uuid::Uuid,
    /// Publishing therapist.
    #[serde(rename = "therapistId")]
    pub therapist_id: uuid::Uuid,
    /// Window start.
    #[serde(rename = "startTime")]
    pub start_time: DateTime<Utc>,
    /// Window end.
    #[serde(rename = "endTime")]
    pub end_time: DateTime<Utc>,
    /// Slot status (`open` in listings).
    pub status: String,
}

impl From<Slot> for SlotDto {
    fn from(slot: Slot) -> Self {
        Self {
            id: *slot.id.as_uuid(),
            therapist_id: slot.therapist_id,
            start_time: slot.start_ts,
            end_time: slot.end_ts,
            status: slot.status.as_str().to_string(),
        }
    }
}
