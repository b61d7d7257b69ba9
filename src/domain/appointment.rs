//! Appointments: the binding of one patient to one slot, with its own
//! status lifecycle.

use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

/// Lifecycle status of an appointment.
///
/// `Booked` is the initial state created by the booking transaction.
/// `Confirmed` and `Rejected` are terminal: once a therapist has decided,
/// no further transition is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    /// Created by a successful booking, awaiting the therapist's decision.
    Booked,
    /// Accepted by the owning therapist; triggers reminder scheduling.
    Confirmed,
    /// Declined by the owning therapist.
    Rejected,
}

impl AppointmentStatus {
    /// Database/wire representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Booked => "booked",
            Self::Confirmed => "confirmed",
            Self::Rejected => "rejected",
        }
    }

    /// Parses the database representation.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Internal`] for unknown status strings.
    pub fn parse(s: &str) -> Result<Self, GatewayError> {
        match s {
            "booked" => Ok(Self::Booked),
            "confirmed" => Ok(Self::Confirmed),
            "rejected" => Ok(Self::Rejected),
            other => Err(GatewayError::Internal(format!(
                "unknown appointment status in store: {other}"
            ))),
        }
    }

    /// Whether the status is terminal (no further transitions allowed).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Confirmed | Self::Rejected)
    }
}

/// A therapist's decision on a booked appointment.
///
/// This is the only transition the status machine accepts, so it is a
/// separate type: parsing a request status string either yields a decision
/// or an `InvalidStatus` error, never an arbitrary [`AppointmentStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentDecision {
    /// Transition the appointment to `confirmed`.
    Confirm,
    /// Transition the appointment to `rejected`.
    Reject,
}

impl AppointmentDecision {
    /// Parses a requested status string into a decision.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidStatus`] for anything outside
    /// `{"confirmed", "rejected"}`.
    pub fn parse(s: &str) -> Result<Self, GatewayError> {
        match s {
            "confirmed" => Ok(Self::Confirm),
            "rejected" => Ok(Self::Reject),
            other => Err(GatewayError::InvalidStatus(other.to_string())),
        }
    }

    /// The appointment status this decision results in.
    #[must_use]
    pub const fn target_status(&self) -> AppointmentStatus {
        match self {
            Self::Confirm => AppointmentStatus::Confirmed,
            Self::Reject => AppointmentStatus::Rejected,
        }
    }
}

/// Role of the authenticated caller, as asserted by the upstream auth
/// collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// A therapist: publishes availability and decides appointments.
    Therapist,
    /// A patient: books slots and receives reminders.
    Patient,
}

impl UserRole {
    /// Parses the role header value. `"pt"` is accepted as a legacy alias
    /// for therapists.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Unauthorized`] for unknown role strings.
    pub fn parse(s: &str) -> Result<Self, GatewayError> {
        match s {
            "therapist" | "pt" => Ok(Self::Therapist),
            "patient" => Ok(Self::Patient),
            _ => Err(GatewayError::Unauthorized),
        }
    }
}
