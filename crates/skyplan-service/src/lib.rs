//! Flight scheduling service.
//!
//! [`FlightQueryService`] validates and persists flights against any store
//! implementing [`store::Repository`]. [`store::InMemoryStore`] is provided
//! for tests and embedding.

pub mod config;
pub mod service;
pub mod store;
pub mod validators;

pub use config::{ConfigError, ServiceConfig};
pub use service::FlightQueryService;
pub use store::{FlightFilter, FlightStore, InMemoryStore, LocationStore, Repository, StoreResult};
