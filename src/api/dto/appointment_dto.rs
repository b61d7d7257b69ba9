//! DTOs for booking and appointment status updates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::service::{AppointmentBrief, Participant};

/// Response body for a successful booking.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookResponse {
    /// The created appointment's ID.
    pub id: uuid::Uuid,
}

/// Request body for `PATCH /appointments/{id}/status`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    /// Requested status; must be `confirmed` or `rejected`.
    pub status: String,
}

/// Denormalized name parts of a participant's profile.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProfileDto {
    /// First name, empty when unknown.
    #[serde(rename = "firstName")]
    pub first_name: String,
    /// Last name, empty when unknown.
    #[serde(rename = "lastName")]
    pub last_name: String,
}

/// One side of an appointment.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PartyDto {
    /// User ID.
    #[serde(rename = "_id")]
    pub id: uuid::Uuid,
    /// Profile name parts.
    pub profile: ProfileDto,
}

impl From<Participant> for PartyDto {
    fn from(p: Participant) -> Self {
        Self {
            id: p.id,
            profile: ProfileDto {
                first_name: p.first_name,
                last_name: p.last_name,
            },
        }
    }
}

/// An appointment as returned by listing and status-update endpoints.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AppointmentBriefDto {
    /// Appointment ID.
    #[serde(rename = "_id")]
    pub id: uuid::Uuid,
    /// Owning therapist.
    pub pt: PartyDto,
    /// Booking patient.
    pub patient: PartyDto,
    /// Slot window start.
    #[serde(rename = "startTime")]
    pub start_time: DateTime<Utc>,
    /// Slot window end.
    #[serde(rename = "endTime")]
    pub end_time: DateTime<Utc>,
    /// Current appointment status.
    pub status: String,
}

impl From<AppointmentBrief> for AppointmentBriefDto {
    fn from(brief: AppointmentBrief) -> Self {
        Self {
            id: *brief.id.as_uuid(),
            pt: brief.therapist.into(),
            patient: brief.patient.into(),
            start_time: brief.start_ts,
            end_time: brief.end_ts,
            status: brief.status.as_str().to_string(),
        }
    }
}
