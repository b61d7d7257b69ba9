//! Availability slots: bookable time windows published by a therapist.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::SlotId;
use crate::error::GatewayError;

/// Lifecycle status of an availability slot.
///
/// A slot moves `Open` → `Reserved` exactly once, inside the booking
/// transaction, and never reverts. Slots are kept after reservation so the
/// booking history stays intact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    /// Published and bookable.
    Open,
    /// Claimed by exactly one appointment.
    Reserved,
}

impl SlotStatus {
    /// Database/wire representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Reserved => "reserved",
        }
    }

    /// Parses the database representation.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Internal`] for unknown status strings, which
    /// would indicate a corrupted row.
    pub fn parse(s: &str) -> Result<Self, GatewayError> {
        match s {
            "open" => Ok(Self::Open),
            "reserved" => Ok(Self::Reserved),
            other => Err(GatewayError::Internal(format!(
                "unknown slot status in store: {other}"
            ))),
        }
    }
}

/// A published availability slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slot {
    /// Slot identifier.
    pub id: SlotId,
    /// Therapist who published the slot.
    pub therapist_id: uuid::Uuid,
    /// Window start.
    pub start_ts: DateTime<Utc>,
    /// Window end.
    pub end_ts: DateTime<Utc>,
    /// Current lifecycle status.
    pub status: SlotStatus,
}

/// A start/end pair submitted when publishing availability.
///
/// Validated with [`SlotWindow::validate`] before it reaches the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotWindow {
    /// Window start.
    pub start_ts: DateTime<Utc>,
    /// Window end.
    pub end_ts: DateTime<Utc>,
}

impl SlotWindow {
    /// Checks that the window is non-empty (`start < end`).
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] for empty or inverted
    /// windows.
    pub fn validate(&self) -> Result<(), GatewayError> {
        if self.start_ts >= self.end_ts {
            return Err(GatewayError::InvalidRequest(format!(
                "slot window must start before it ends ({} >= {})",
                self.start_ts, self.end_ts
            )));
        }
        Ok(())
    }
}
