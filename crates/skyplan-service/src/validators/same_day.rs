//! Same-day-destination validator: one flight per destination per calendar day.

use skyplan_rules::{SchedulePolicy, calendar_day_window, check_same_day_destination};
use skyplan_types::{FlightError, Scheduled};
use tracing::debug;

use crate::store::{FlightFilter, FlightStore};

/// Fails with [`FlightError::DuplicateDestination`] if another stored flight
/// to the candidate's destination departs on the same calendar day.
pub async fn validate<S, C>(
    store: &S,
    policy: &SchedulePolicy,
    candidate: &C,
) -> Result<(), FlightError>
where
    S: FlightStore + ?Sized,
    C: Scheduled + Sync + ?Sized,
{
    let day = calendar_day_window(candidate.date(), policy);
    let filter = FlightFilter::all()
        .to_destination(candidate.destination())
        .between(day.window)
        .excluding(candidate.id());
    let same_day = store.find(&filter).await?;

    check_same_day_destination(candidate, &same_day, policy).map_err(|violation| {
        debug!(%violation, "same-day destination check rejected flight");
        FlightError::from(violation)
    })
}
