//! Side-effect dispatch toward the external workflow engine.
//!
//! Bookings trigger a notification workflow (confirmation email etc.) run
//! by an external engine. Dispatch is fire-and-forget: it happens after the
//! booking transaction commits, is never awaited by the request, and its
//! failures are logged, not propagated.

pub mod dispatcher;
pub mod engine;

#[cfg(test)]
pub mod testing;

pub use dispatcher::{BOOKING_JOB, BookingDispatcher};
pub use engine::{HttpWorkflowEngine, SubmitError, WorkflowEngine};
