//! Service layer: booking orchestration and reminder scheduling.

pub mod appointment_service;
pub mod reminder_service;

pub use appointment_service::{AppointmentBrief, AppointmentService, Participant};
pub use reminder_service::{ReminderItem, ReminderService};
