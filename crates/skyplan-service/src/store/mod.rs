//! Storage seams consumed by the service.
//!
//! Flights reference locations by id only. Reads are a two-step
//! fetch-then-resolve: [`FlightStore::find`] returns bare records and
//! [`LocationStore::find_locations`] resolves the referenced ids in one batch.

mod memory;

pub use memory::InMemoryStore;

use async_trait::async_trait;
use skyplan_rules::DateWindow;
use skyplan_types::{Flight, FlightId, Location, LocationId, NewFlight, StoreError};
use std::collections::HashMap;

pub type StoreResult<T> = Result<T, StoreError>;

/// Conjunction of optional predicates over flight records.
///
/// An empty filter matches every flight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlightFilter {
    pub date_range: Option<DateWindow>,
    pub source: Option<LocationId>,
    pub destination: Option<LocationId>,
    pub exclude: Option<FlightId>,
}

impl FlightFilter {
    pub fn all() -> Self {
        Self::default()
    }

    /// Departure within `window`, both ends inclusive.
    pub fn between(mut self, window: DateWindow) -> Self {
        self.date_range = Some(window);
        self
    }

    pub fn from_source(mut self, source: LocationId) -> Self {
        self.source = Some(source);
        self
    }

    pub fn to_destination(mut self, destination: LocationId) -> Self {
        self.destination = Some(destination);
        self
    }

    /// Skip the record with this id. `None` excludes nothing.
    pub fn excluding(mut self, id: Option<FlightId>) -> Self {
        self.exclude = id;
        self
    }

    pub fn matches(&self, flight: &Flight) -> bool {
        self.date_range.is_none_or(|w| w.contains(flight.date))
            && self.source.is_none_or(|s| s == flight.source)
            && self.destination.is_none_or(|d| d == flight.destination)
            && self.exclude.is_none_or(|id| id != flight.id)
    }
}

/// Persistence for flight records.
///
/// Implementations must be `Send + Sync`; the service queries them from
/// concurrently running validators.
#[async_trait]
pub trait FlightStore: Send + Sync {
    /// Flights matching every predicate in `filter`, ordered by departure.
    async fn find(&self, filter: &FlightFilter) -> StoreResult<Vec<Flight>>;

    async fn find_by_id(&self, id: FlightId) -> StoreResult<Option<Flight>>;

    /// Insert a new flight and return it with its assigned id.
    async fn save(&self, flight: NewFlight) -> StoreResult<Flight>;

    /// Delete by id. Deleting a missing id is not an error here; callers
    /// check existence first.
    async fn delete(&self, id: FlightId) -> StoreResult<()>;
}

/// Resolution of location references.
#[async_trait]
pub trait LocationStore: Send + Sync {
    /// Look up every id in `ids`. Unknown ids are simply absent from the map.
    async fn find_locations(&self, ids: &[LocationId]) -> StoreResult<HashMap<LocationId, Location>>;
}

/// Everything the service needs from a backing store.
///
/// Implemented automatically for any type implementing both store traits.
pub trait Repository: FlightStore + LocationStore {}

impl<T: FlightStore + LocationStore + ?Sized> Repository for T {}
