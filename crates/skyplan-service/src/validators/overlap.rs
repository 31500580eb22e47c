//! Overlap validator: no other flight within the separation window.

use skyplan_rules::{SchedulePolicy, check_separation, overlap_window};
use skyplan_types::{FlightError, Scheduled};
use tracing::debug;

use crate::store::{FlightFilter, FlightStore};

/// Fails with [`FlightError::SchedulingConflict`] if any stored flight other
/// than the candidate departs in `[date - separation, date + separation]`.
pub async fn validate<S, C>(
    store: &S,
    policy: &SchedulePolicy,
    candidate: &C,
) -> Result<(), FlightError>
where
    S: FlightStore + ?Sized,
    C: Scheduled + Sync + ?Sized,
{
    let window = overlap_window(candidate.date(), policy);
    let filter = FlightFilter::all()
        .between(window)
        .excluding(candidate.id());
    let neighbours = store.find(&filter).await?;

    check_separation(candidate, &neighbours, policy).map_err(|violation| {
        debug!(%violation, "overlap check rejected flight");
        FlightError::from(violation)
    })
}
