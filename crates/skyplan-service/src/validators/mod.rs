//! Store-backed scheduling validators.
//!
//! Each validator narrows the store to the candidate's window with a single
//! [`FlightFilter`](crate::store::FlightFilter) query, then hands the result
//! to the matching pure rule in `skyplan_rules`. Both are read-only and
//! independent, so the service runs them concurrently.

pub mod overlap;
pub mod same_day;
