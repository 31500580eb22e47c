//! Pure scheduling rules for flight records.
//!
//! Nothing in this crate performs I/O. Callers fetch candidate neighbours
//! from their store, then hand them here to decide whether a flight breaks
//! the separation or same-day-destination rule.

pub mod error;
pub mod policy;
pub mod rules;

pub use error::ScheduleViolation;
pub use policy::{DateWindow, DayWindow, SchedulePolicy, calendar_day_window, overlap_window};
pub use rules::{audit_schedule, check_same_day_destination, check_separation};
