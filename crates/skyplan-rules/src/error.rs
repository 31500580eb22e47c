use chrono::{DateTime, Duration, NaiveDate, Utc};
use skyplan_types::{FlightError, FlightId, LocationId};

/// Describes a specific scheduling rule violation.
///
/// `flight` is the id of the offending flight when it has one; a candidate
/// that has not been saved yet reports `None`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScheduleViolation {
    /// A flight departs from and arrives at the same location.
    SameSourceAndDestination {
        flight: Option<FlightId>,
        location: LocationId,
    },
    /// Other flights depart within `separation` of this one (boundary included).
    TooClose {
        flight: Option<FlightId>,
        date: DateTime<Utc>,
        separation: Duration,
        conflicting: Vec<FlightId>,
    },
    /// The destination already receives another flight on the same calendar day.
    DestinationAlreadyServed {
        flight: Option<FlightId>,
        destination: LocationId,
        day: NaiveDate,
        existing: Vec<FlightId>,
    },
}

impl ScheduleViolation {
    pub fn flight(&self) -> Option<FlightId> {
        match self {
            Self::SameSourceAndDestination { flight, .. }
            | Self::TooClose { flight, .. }
            | Self::DestinationAlreadyServed { flight, .. } => *flight,
        }
    }
}

fn subject(flight: Option<FlightId>) -> String {
    match flight {
        Some(id) => format!("flight {id}"),
        None => "new flight".to_string(),
    }
}

fn id_list(ids: &[FlightId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl std::fmt::Display for ScheduleViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SameSourceAndDestination { flight, location } => write!(
                f,
                "{} departs from and arrives at {location}",
                subject(*flight)
            ),
            Self::TooClose {
                flight,
                date,
                separation,
                conflicting,
            } => write!(
                f,
                "{} at {date} is within {} minutes of [{}]",
                subject(*flight),
                separation.num_minutes(),
                id_list(conflicting)
            ),
            Self::DestinationAlreadyServed {
                flight,
                destination,
                day,
                existing,
            } => write!(
                f,
                "{} to {destination} on {day} collides with [{}]",
                subject(*flight),
                id_list(existing)
            ),
        }
    }
}

impl From<ScheduleViolation> for FlightError {
    fn from(violation: ScheduleViolation) -> Self {
        match violation {
            ScheduleViolation::SameSourceAndDestination { location, .. } => {
                FlightError::InvalidLocation { location }
            }
            ScheduleViolation::TooClose {
                date,
                separation,
                conflicting,
                ..
            } => FlightError::SchedulingConflict {
                date,
                separation_minutes: separation.num_minutes(),
                conflicting,
            },
            ScheduleViolation::DestinationAlreadyServed {
                destination,
                day,
                existing,
                ..
            } => FlightError::DuplicateDestination {
                destination,
                day,
                existing,
            },
        }
    }
}
