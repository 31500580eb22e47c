//! In-memory store.
//!
//! Keeps flights and locations in `HashMap`s behind a shared lock. Suitable
//! for tests, local development and embedding; nothing is persisted.

use async_trait::async_trait;
use skyplan_types::{Flight, FlightId, Location, LocationId, NewFlight, Scheduled, StoreError};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

use super::{FlightFilter, FlightStore, LocationStore, StoreResult};

/// Shared in-memory store. Clones share the same data.
#[derive(Clone, Debug, Default)]
pub struct InMemoryStore {
    data: Arc<RwLock<StoreData>>,
}

#[derive(Debug)]
struct StoreData {
    flights: HashMap<FlightId, Flight>,
    locations: HashMap<LocationId, Location>,
    healthy: bool,
}

impl Default for StoreData {
    fn default() -> Self {
        Self {
            flights: HashMap::new(),
            locations: HashMap::new(),
            healthy: true,
        }
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a location so flights can reference it.
    pub fn insert_location(&self, location: Location) -> StoreResult<LocationId> {
        let mut data = self.write()?;
        let id = location.id;
        data.locations.insert(id, location);
        Ok(id)
    }

    /// Insert a flight record as-is, bypassing every scheduling rule.
    ///
    /// Stands in for writers that do not go through the service, e.g. an
    /// import job. Use the service's audit to find what this let through.
    pub fn insert_flight(&self, flight: Flight) -> StoreResult<()> {
        let mut data = self.write()?;
        data.flights.insert(flight.id, flight);
        Ok(())
    }

    /// Simulate a connectivity failure: every operation errors while unhealthy.
    pub fn set_healthy(&self, healthy: bool) {
        let mut data = match self.data.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        data.healthy = healthy;
    }

    pub fn flight_count(&self) -> StoreResult<usize> {
        Ok(self.read()?.flights.len())
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, StoreData>> {
        let data = self
            .data
            .read()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))?;
        if !data.healthy {
            return Err(StoreError::Unavailable("store marked unhealthy".to_string()));
        }
        Ok(data)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, StoreData>> {
        let data = self
            .data
            .write()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))?;
        if !data.healthy {
            return Err(StoreError::Unavailable("store marked unhealthy".to_string()));
        }
        Ok(data)
    }
}

#[async_trait]
impl FlightStore for InMemoryStore {
    async fn find(&self, filter: &FlightFilter) -> StoreResult<Vec<Flight>> {
        let data = self.read()?;
        let mut flights: Vec<Flight> = data
            .flights
            .values()
            .filter(|f| filter.matches(f))
            .cloned()
            .collect();
        flights.sort_by_key(|f| (f.date, f.id));
        debug!(matched = flights.len(), ?filter, "flight query");
        Ok(flights)
    }

    async fn find_by_id(&self, id: FlightId) -> StoreResult<Option<Flight>> {
        Ok(self.read()?.flights.get(&id).cloned())
    }

    async fn save(&self, flight: NewFlight) -> StoreResult<Flight> {
        let mut data = self.write()?;
        for location in [flight.source(), flight.destination()] {
            if !data.locations.contains_key(&location) {
                return Err(StoreError::MissingLocation(location));
            }
        }
        let saved = flight.into_flight(FlightId::new());
        data.flights.insert(saved.id, saved.clone());
        Ok(saved)
    }

    async fn delete(&self, id: FlightId) -> StoreResult<()> {
        self.write()?.flights.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl LocationStore for InMemoryStore {
    async fn find_locations(&self, ids: &[LocationId]) -> StoreResult<HashMap<LocationId, Location>> {
        let data = self.read()?;
        Ok(ids
            .iter()
            .filter_map(|id| data.locations.get(id).map(|l| (*id, l.clone())))
            .collect())
    }
}
