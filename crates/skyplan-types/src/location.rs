use serde::{Deserialize, Serialize};
use std::fmt;

use crate::id::LocationId;

/// An airport-side place a flight departs from or arrives at.
///
/// Flights only reference locations by [`LocationId`]; the full value is
/// resolved on read.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: LocationId,
    pub postal_code: String,
    pub city: String,
    pub state: String,
}

impl Location {
    /// Create a location with a freshly generated id.
    pub fn new(
        postal_code: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
    ) -> Self {
        Self {
            id: LocationId::new(),
            postal_code: postal_code.into(),
            city: city.into(),
            state: state.into(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} ({})", self.city, self.state, self.postal_code)
    }
}
