//! At most one flight per destination per calendar day.

use skyplan_types::{Flight, FlightId, Scheduled};

use crate::error::ScheduleViolation;
use crate::policy::{SchedulePolicy, calendar_day_window};

/// Check `candidate` against flights already fetched from the store.
///
/// Only flights to the candidate's destination whose departure falls on the
/// same calendar day (in the policy's reference offset) count.
pub fn check_same_day_destination<C: Scheduled + ?Sized>(
    candidate: &C,
    existing: &[Flight],
    policy: &SchedulePolicy,
) -> Result<(), ScheduleViolation> {
    let day = calendar_day_window(candidate.date(), policy);
    let destination = candidate.destination();
    let own_id = candidate.id();

    let same_day: Vec<FlightId> = existing
        .iter()
        .filter(|f| {
            Some(f.id) != own_id && f.destination == destination && day.window.contains(f.date)
        })
        .map(|f| f.id)
        .collect();

    if !same_day.is_empty() {
        return Err(ScheduleViolation::DestinationAlreadyServed {
            flight: own_id,
            destination,
            day: day.day,
            existing: same_day,
        });
    }
    Ok(())
}
