pub mod error;
pub mod flight;
pub mod id;
pub mod location;

pub use error::{ErrorKind, FlightError, StoreError};
pub use flight::{Flight, FlightDetails, NewFlight, Scheduled};
pub use id::{FlightId, LocationId};
pub use location::Location;
