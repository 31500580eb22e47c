use chrono::{DateTime, Utc};
use skyplan_rules::{DateWindow, SchedulePolicy, ScheduleViolation, audit_schedule};
use skyplan_types::{
    Flight, FlightDetails, FlightError, FlightId, LocationId, NewFlight, Scheduled, StoreError,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::config::{ConfigError, ServiceConfig};
use crate::store::{FlightFilter, Repository};
use crate::validators::{overlap, same_day};

/// Validates and persists flights, and serves resolved reads.
///
/// Every read returns [`FlightDetails`], with both locations resolved in a
/// single batched lookup after the flights are fetched.
///
/// Creates check the overlap and same-day-destination rules concurrently
/// and only write once both pass. Unless disabled in [`ServiceConfig`], a
/// service-wide guard is held from validation until the write completes, so
/// concurrent creates through the same service cannot both slip past the
/// rules. Writers that bypass the service are caught by [`Self::audit`].
pub struct FlightQueryService<S: ?Sized> {
    store: Arc<S>,
    policy: SchedulePolicy,
    create_guard: Option<Mutex<()>>,
}

impl<S: Repository + ?Sized> FlightQueryService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            policy: SchedulePolicy::default(),
            create_guard: Some(Mutex::new(())),
        }
    }

    pub fn with_config(store: Arc<S>, config: &ServiceConfig) -> Result<Self, ConfigError> {
        let policy = config.build_policy()?;
        Ok(Self {
            store,
            policy,
            create_guard: config.creates_serialized().then(|| Mutex::new(())),
        })
    }

    /// Use `policy` as-is, bypassing [`ServiceConfig`] validation.
    pub fn with_policy(store: Arc<S>, policy: SchedulePolicy) -> Self {
        Self {
            store,
            policy,
            create_guard: Some(Mutex::new(())),
        }
    }

    pub fn policy(&self) -> &SchedulePolicy {
        &self.policy
    }

    /// Every flight, ordered by departure.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<FlightDetails>, FlightError> {
        let flights = self.store.find(&FlightFilter::all()).await?;
        self.resolve(flights).await
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: FlightId) -> Result<FlightDetails, FlightError> {
        let flight = self.fetch(id).await?;
        let mut resolved = self.resolve(vec![flight]).await?;
        resolved.pop().ok_or(FlightError::NotFound { id })
    }

    /// Validate and persist a new flight.
    ///
    /// The location check runs first and touches no store. Both scheduling
    /// validators then run concurrently; the first rejection wins and
    /// nothing is written.
    #[instrument(skip(self, flight), fields(date = %flight.date(), destination = %flight.destination()))]
    pub async fn create(&self, flight: NewFlight) -> Result<FlightDetails, FlightError> {
        flight.validate_locations()?;

        let _guard = match &self.create_guard {
            Some(lock) => Some(lock.lock().await),
            None => None,
        };

        let store = self.store.as_ref();
        let checks = tokio::try_join!(
            overlap::validate(store, &self.policy, &flight),
            same_day::validate(store, &self.policy, &flight),
        );
        if let Err(err) = checks {
            info!(kind = ?err.kind(), "flight rejected");
            return Err(err);
        }

        let saved = store.save(flight).await?;
        info!(id = %saved.id, "flight scheduled");

        let mut resolved = self.resolve(vec![saved]).await?;
        resolved
            .pop()
            .ok_or_else(|| FlightError::Store(StoreError::Query("saved flight vanished".into())))
    }

    /// Delete a flight. A missing id is reported as [`FlightError::NotFound`]
    /// and leaves the store untouched.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: FlightId) -> Result<(), FlightError> {
        let flight = self.fetch(id).await?;
        self.store.delete(flight.id).await?;
        info!(%id, "flight removed");
        Ok(())
    }

    /// Flights departing in `[start, end]`, both ends inclusive, minus `exclude`.
    #[instrument(skip(self))]
    pub async fn find_between_dates(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude: Option<FlightId>,
    ) -> Result<Vec<FlightDetails>, FlightError> {
        let filter = FlightFilter::all()
            .between(DateWindow::new(start, end))
            .excluding(exclude);
        let flights = self.store.find(&filter).await?;
        self.resolve(flights).await
    }

    /// Sweep the whole store for rule violations. Read-only.
    #[instrument(skip(self))]
    pub async fn audit(&self) -> Result<Vec<ScheduleViolation>, FlightError> {
        let flights = self.store.find(&FlightFilter::all()).await?;
        let violations = audit_schedule(&flights, &self.policy);
        for violation in &violations {
            warn!(%violation, "schedule violation");
        }
        debug!(
            flights = flights.len(),
            violations = violations.len(),
            "audit finished"
        );
        Ok(violations)
    }

    async fn fetch(&self, id: FlightId) -> Result<Flight, FlightError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(FlightError::NotFound { id })
    }

    async fn resolve(&self, flights: Vec<Flight>) -> Result<Vec<FlightDetails>, FlightError> {
        if flights.is_empty() {
            return Ok(Vec::new());
        }

        let mut ids: Vec<LocationId> = flights
            .iter()
            .flat_map(|f| [f.source, f.destination])
            .collect();
        ids.sort_unstable();
        ids.dedup();

        let locations = self.store.find_locations(&ids).await?;
        let lookup = |id: LocationId| {
            locations
                .get(&id)
                .cloned()
                .ok_or(StoreError::MissingLocation(id))
        };

        flights
            .into_iter()
            .map(|f| -> Result<FlightDetails, FlightError> {
                Ok(FlightDetails {
                    id: f.id,
                    date: f.date,
                    source: lookup(f.source)?,
                    destination: lookup(f.destination)?,
                })
            })
            .collect()
    }
}
