//! Data Transfer Objects for REST request/response serialization.
//!
//! Field names follow the wire format the frontend already speaks
//! (`startTime`, `_id`, `remindAt`, ...), so serde renames are explicit.

pub mod appointment_dto;
pub mod availability_dto;
pub mod reminder_dto;

pub use appointment_dto::*;
pub use availability_dto::*;
pub use reminder_dto::*;
