//! # therapy-gateway
//!
//! REST API gateway for a therapist/patient appointment marketplace.
//!
//! The correctness-critical core is slot booking: many patients may race to
//! book the same published slot, exactly one must win, and the winner's
//! appointment later moves through a confirm/reject status machine that
//! schedules a reminder on confirmation. Single-winner semantics come from
//! PostgreSQL row locking, so they hold across process instances; a
//! fire-and-forget dispatcher notifies an external workflow engine after
//! each committed booking.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── AppointmentService / ReminderService (service/)
//!     ├── BookingDispatcher → workflow engine (dispatch/)
//!     │
//!     ├── Store trait (persistence/)
//!     └── PostgreSQL (row-locking booking transaction)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod dispatch;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
