//! Scheduling rule checks.
//!
//! Two modes, mirroring how the rules are used:
//! - **Candidate** ([`check_separation`], [`check_same_day_destination`]): decide
//!   whether one flight may join a set of already-fetched neighbours. Used at
//!   create time, after the caller has narrowed the store down to the window.
//! - **Batch** ([`audit_schedule`]): sweep a full set of persisted flights and
//!   report every violation. Used to reconcile stores written outside the
//!   create path.

mod same_day;
mod separation;

pub use same_day::check_same_day_destination;
pub use separation::check_separation;

use chrono::NaiveDate;
use skyplan_types::{Flight, FlightId, LocationId, Scheduled};
use std::collections::BTreeMap;

use crate::error::ScheduleViolation;
use crate::policy::{SchedulePolicy, calendar_day_window, overlap_window};

/// Batch-validate a set of persisted flights, returning every violation.
///
/// Flights are swept in `(date, id)` order, so output is deterministic:
/// - same source/destination: one entry per offending flight;
/// - separation: one entry per flight that has later neighbours inside its
///   window, listing those neighbours (each close pair appears once);
/// - same-day destination: one entry per surplus flight, pointing at the
///   earliest flight to that destination that day.
pub fn audit_schedule(flights: &[Flight], policy: &SchedulePolicy) -> Vec<ScheduleViolation> {
    let mut ordered: Vec<&Flight> = flights.iter().collect();
    ordered.sort_by_key(|f| (f.date, f.id));

    let mut violations = Vec::new();

    for flight in &ordered {
        if flight.validate_locations().is_err() {
            violations.push(ScheduleViolation::SameSourceAndDestination {
                flight: Some(flight.id),
                location: flight.source,
            });
        }
    }

    for (i, flight) in ordered.iter().enumerate() {
        let latest = overlap_window(flight.date, policy).end;
        let conflicting: Vec<FlightId> = ordered[i + 1..]
            .iter()
            .take_while(|other| other.date <= latest)
            .map(|other| other.id)
            .collect();
        if !conflicting.is_empty() {
            violations.push(ScheduleViolation::TooClose {
                flight: Some(flight.id),
                date: flight.date,
                separation: policy.min_separation,
                conflicting,
            });
        }
    }

    let mut by_destination_day: BTreeMap<(LocationId, NaiveDate), Vec<&Flight>> = BTreeMap::new();
    for flight in &ordered {
        let day = calendar_day_window(flight.date, policy).day;
        by_destination_day
            .entry((flight.destination, day))
            .or_default()
            .push(*flight);
    }
    for ((destination, day), group) in by_destination_day {
        let Some((first, surplus)) = group.split_first() else {
            continue;
        };
        for flight in surplus {
            violations.push(ScheduleViolation::DestinationAlreadyServed {
                flight: Some(flight.id),
                destination,
                day,
                existing: vec![first.id],
            });
        }
    }

    violations
}
