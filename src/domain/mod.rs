//! Domain layer: core booking types and invariants.
//!
//! This module contains the marketplace domain model: slot and appointment
//! identity, their status lifecycles, and reminder derivation. Persistence
//! and HTTP concerns live in their own layers.

pub mod appointment;
pub mod ids;
pub mod reminder;
pub mod slot;

pub use appointment::{AppointmentDecision, AppointmentStatus, UserRole};
pub use ids::{AppointmentId, SlotId};
pub use slot::{Slot, SlotStatus, SlotWindow};
