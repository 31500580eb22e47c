use chrono::{DateTime, Duration, TimeZone, Utc};
use skyplan_service::{FlightQueryService, InMemoryStore};
use skyplan_types::{Location, LocationId};
use std::sync::Arc;

pub struct Harness {
    pub store: Arc<InMemoryStore>,
    pub service: FlightQueryService<InMemoryStore>,
    pub a: LocationId,
    pub b: LocationId,
    pub c: LocationId,
}

/// Service over a fresh in-memory store seeded with three locations.
pub fn harness() -> Harness {
    let store = Arc::new(InMemoryStore::new());
    let a = store
        .insert_location(Location::new("01000-000", "Sao Paulo", "SP"))
        .unwrap();
    let b = store
        .insert_location(Location::new("20000-000", "Rio de Janeiro", "RJ"))
        .unwrap();
    let c = store
        .insert_location(Location::new("70000-000", "Brasilia", "DF"))
        .unwrap();
    let service = FlightQueryService::new(Arc::clone(&store));
    Harness {
        store,
        service,
        a,
        b,
        c,
    }
}

pub fn at(day: u32, h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, h, m, 0).unwrap()
}

pub fn at_ms(day: u32, h: u32, m: u32, s: u32, ms: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, h, m, s).unwrap() + Duration::milliseconds(ms)
}
