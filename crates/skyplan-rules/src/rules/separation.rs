//! Minimum separation between any two flights.
//!
//! The window is symmetric and closed: a neighbour exactly
//! `min_separation` away conflicts, one a millisecond further does not.
//! The rule is global, it does not care about destinations.

use skyplan_types::{Flight, FlightId, Scheduled};

use crate::error::ScheduleViolation;
use crate::policy::{SchedulePolicy, overlap_window};

/// Check `candidate` against flights already fetched from the store.
///
/// `existing` may be wider than the window; anything outside it, and the
/// candidate's own record, is ignored.
pub fn check_separation<C: Scheduled + ?Sized>(
    candidate: &C,
    existing: &[Flight],
    policy: &SchedulePolicy,
) -> Result<(), ScheduleViolation> {
    let window = overlap_window(candidate.date(), policy);
    let own_id = candidate.id();

    let conflicting: Vec<FlightId> = existing
        .iter()
        .filter(|f| Some(f.id) != own_id && window.contains(f.date))
        .map(|f| f.id)
        .collect();

    if !conflicting.is_empty() {
        return Err(ScheduleViolation::TooClose {
            flight: own_id,
            date: candidate.date(),
            separation: policy.min_separation,
            conflicting,
        });
    }
    Ok(())
}
