use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{FlightId, LocationId};

/// Failures raised by a flight store implementation.
///
/// These are passed through to the caller unchanged and never retried.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("store query failed: {0}")]
    Query(String),
    #[error("location {0} does not exist")]
    MissingLocation(LocationId),
}

/// Errors produced by flight operations.
///
/// The first three variants are business-rule rejections of a create
/// request. None of them leave anything behind in the store.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FlightError {
    #[error("source and destination must be different locations (both are {location})")]
    InvalidLocation { location: LocationId },
    #[error(
        "each flight must be at least {separation_minutes} minutes from every other flight: {date} conflicts with {} existing flight(s)",
        .conflicting.len()
    )]
    SchedulingConflict {
        date: DateTime<Utc>,
        separation_minutes: i64,
        conflicting: Vec<FlightId>,
    },
    #[error(
        "no more than one flight to the same destination per day: {destination} already has a flight on {day}"
    )]
    DuplicateDestination {
        destination: LocationId,
        day: NaiveDate,
        existing: Vec<FlightId>,
    },
    #[error("flight {id} not found")]
    NotFound { id: FlightId },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Coarse category of a [`FlightError`].
///
/// Outer layers (HTTP, CLI) map on this rather than on the full error so
/// that new detail fields do not ripple into response handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Source and destination are the same location.
    InvalidLocation,
    /// Another flight departs inside the separation window.
    SchedulingConflict,
    /// The destination already receives a flight that calendar day.
    DuplicateDestination,
    /// No flight with the requested id.
    NotFound,
    /// The store failed; the request itself may be fine.
    Store,
}

impl ErrorKind {
    /// Whether the request was refused by a scheduling rule.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::InvalidLocation | Self::SchedulingConflict | Self::DuplicateDestination
        )
    }
}

impl FlightError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidLocation { .. } => ErrorKind::InvalidLocation,
            Self::SchedulingConflict { .. } => ErrorKind::SchedulingConflict,
            Self::DuplicateDestination { .. } => ErrorKind::DuplicateDestination,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Store(_) => ErrorKind::Store,
        }
    }
}
