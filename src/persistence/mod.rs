//! Persistence layer: PostgreSQL store for slots, appointments, and
//! reminders.
//!
//! Provides the [`Store`] trait consumed by the service layer and its
//! production implementation over `sqlx::PgPool`. The booking transaction
//! (row lock, status check, insert, flip) lives entirely in this layer.

pub mod models;
pub mod postgres;
pub mod store;

#[cfg(test)]
pub mod memory;

pub use postgres::PostgresStore;
pub use store::Store;
