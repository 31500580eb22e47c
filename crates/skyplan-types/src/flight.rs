use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FlightError;
use crate::id::{FlightId, LocationId};
use crate::location::Location;

/// Common view over persisted and not-yet-persisted flights.
///
/// Scheduling rules only need a date, the two endpoints and, on update
/// paths, the flight's own id so it can be excluded from its own checks.
pub trait Scheduled {
    /// `None` until the flight has been saved.
    fn id(&self) -> Option<FlightId>;
    fn date(&self) -> DateTime<Utc>;
    fn source(&self) -> LocationId;
    fn destination(&self) -> LocationId;

    /// Reject a flight that departs from and arrives at the same location.
    ///
    /// Pure structural check; performs no I/O.
    fn validate_locations(&self) -> Result<(), FlightError> {
        if self.source() == self.destination() {
            return Err(FlightError::InvalidLocation {
                location: self.source(),
            });
        }
        Ok(())
    }
}

/// A flight request that has not been validated or saved yet.
///
/// The departure is kept at millisecond precision so calendar-day windows,
/// which end at `23:59:59.999`, cover every representable departure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "NewFlightFields")]
pub struct NewFlight {
    date: DateTime<Utc>,
    source: LocationId,
    destination: LocationId,
}

/// Wire shape of [`NewFlight`]; deserialization goes through [`NewFlight::new`].
#[derive(Deserialize)]
struct NewFlightFields {
    date: DateTime<Utc>,
    source: LocationId,
    destination: LocationId,
}

impl From<NewFlightFields> for NewFlight {
    fn from(fields: NewFlightFields) -> Self {
        Self::new(fields.date, fields.source, fields.destination)
    }
}

impl NewFlight {
    pub fn new(date: DateTime<Utc>, source: LocationId, destination: LocationId) -> Self {
        Self {
            date: date.trunc_subsecs(3),
            source,
            destination,
        }
    }

    /// Attach the id assigned by the store.
    pub fn into_flight(self, id: FlightId) -> Flight {
        Flight {
            id,
            date: self.date,
            source: self.source,
            destination: self.destination,
        }
    }
}

impl Scheduled for NewFlight {
    fn id(&self) -> Option<FlightId> {
        None
    }

    fn date(&self) -> DateTime<Utc> {
        self.date
    }

    fn source(&self) -> LocationId {
        self.source
    }

    fn destination(&self) -> LocationId {
        self.destination
    }
}

/// A persisted flight record. Never mutated after it is saved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flight {
    pub id: FlightId,
    pub date: DateTime<Utc>,
    pub source: LocationId,
    pub destination: LocationId,
}

impl Scheduled for Flight {
    fn id(&self) -> Option<FlightId> {
        Some(self.id)
    }

    fn date(&self) -> DateTime<Utc> {
        self.date
    }

    fn source(&self) -> LocationId {
        self.source
    }

    fn destination(&self) -> LocationId {
        self.destination
    }
}

/// A flight with both location references resolved. Returned by every read.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightDetails {
    pub id: FlightId,
    pub date: DateTime<Utc>,
    pub source: Location,
    pub destination: Location,
}
