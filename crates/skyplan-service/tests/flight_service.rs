mod support;

use similar_asserts::assert_eq;
use chrono::Duration;
use skyplan_rules::SchedulePolicy;
use skyplan_service::{FlightQueryService, ServiceConfig};
use skyplan_types::{ErrorKind, Flight, FlightError, FlightId, NewFlight, StoreError};
use std::sync::Arc;
use support::{at, at_ms, harness};

#[test_log::test(tokio::test)]
async fn end_to_end_schedule() {
    let h = harness();

    let f1 = h
        .service
        .create(NewFlight::new(at(1, 10, 0), h.a, h.b))
        .await
        .unwrap();
    assert_eq!(f1.source.city, "Sao Paulo");
    assert_eq!(f1.destination.city, "Rio de Janeiro");

    let f2 = h
        .service
        .create(NewFlight::new(at(1, 10, 15), h.a, h.c))
        .await
        .unwrap_err();
    assert_eq!(f2.kind(), ErrorKind::SchedulingConflict);

    let f3 = h
        .service
        .create(NewFlight::new(at(1, 14, 0), h.a, h.b))
        .await
        .unwrap_err();
    assert_eq!(f3.kind(), ErrorKind::DuplicateDestination);

    let f4 = h
        .service
        .create(NewFlight::new(at(2, 10, 0), h.a, h.b))
        .await
        .unwrap();

    let ids: Vec<FlightId> = h.service.list_all().await.unwrap().iter().map(|f| f.id).collect();
    assert_eq!(ids, vec![f1.id, f4.id]);
    assert!(h.service.audit().await.unwrap().is_empty());
}

#[test_log::test(tokio::test)]
async fn same_source_and_destination_fails_before_any_read() {
    let h = harness();
    h.store.set_healthy(false);

    let err = h
        .service
        .create(NewFlight::new(at(1, 10, 0), h.a, h.a))
        .await
        .unwrap_err();

    assert_eq!(err, FlightError::InvalidLocation { location: h.a });
}

#[test_log::test(tokio::test)]
async fn thirty_minute_boundary_is_inclusive() {
    let h = harness();
    h.service
        .create(NewFlight::new(at(1, 10, 0), h.a, h.b))
        .await
        .unwrap();

    let exact = h
        .service
        .create(NewFlight::new(at(1, 10, 30), h.b, h.c))
        .await
        .unwrap_err();
    assert_eq!(exact.kind(), ErrorKind::SchedulingConflict);

    h.service
        .create(NewFlight::new(at_ms(1, 10, 30, 0, 1), h.b, h.c))
        .await
        .unwrap();
}

#[test_log::test(tokio::test)]
async fn calendar_day_boundary() {
    let h = harness();
    h.service
        .create(NewFlight::new(at_ms(1, 23, 59, 59, 999), h.a, h.c))
        .await
        .unwrap();

    let same_day = h
        .service
        .create(NewFlight::new(at(1, 12, 0), h.b, h.c))
        .await
        .unwrap_err();
    assert_eq!(same_day.kind(), ErrorKind::DuplicateDestination);

    h.service
        .create(NewFlight::new(at_ms(2, 0, 30, 0, 1), h.b, h.c))
        .await
        .unwrap();
}

#[test_log::test(tokio::test)]
async fn last_milliseconds_of_day_collide_on_destination() {
    // Zero separation so only the calendar-day rule can fire.
    let h = harness();
    let policy = SchedulePolicy {
        min_separation: Duration::zero(),
        ..Default::default()
    };
    let service = FlightQueryService::with_policy(Arc::clone(&h.store), policy);
    service
        .create(NewFlight::new(at_ms(1, 23, 59, 59, 999), h.a, h.c))
        .await
        .unwrap();

    let err = service
        .create(NewFlight::new(at_ms(1, 23, 59, 59, 998), h.b, h.c))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicateDestination);
    assert_eq!(h.store.flight_count().unwrap(), 1);

    service
        .create(NewFlight::new(at_ms(2, 0, 0, 0, 0), h.b, h.c))
        .await
        .unwrap();
    assert_eq!(h.store.flight_count().unwrap(), 2);
}

#[test_log::test(tokio::test)]
async fn deserialized_request_cannot_slip_past_day_end() {
    let h = harness();
    let json = format!(
        r#"{{"date":"2024-01-01T23:59:59.999500Z","source":"{}","destination":"{}"}}"#,
        h.a, h.c
    );
    let late: NewFlight = serde_json::from_str(&json).unwrap();
    let stored = h.service.create(late).await.unwrap();
    assert_eq!(stored.date, at_ms(1, 23, 59, 59, 999));

    let err = h
        .service
        .create(NewFlight::new(at(1, 18, 0), h.b, h.c))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::DuplicateDestination);
    assert!(h.service.audit().await.unwrap().is_empty());
}

#[test_log::test(tokio::test)]
async fn rejected_create_writes_nothing() {
    let h = harness();
    h.service
        .create(NewFlight::new(at(1, 10, 0), h.a, h.b))
        .await
        .unwrap();

    let _ = h
        .service
        .create(NewFlight::new(at(1, 10, 5), h.a, h.c))
        .await
        .unwrap_err();

    assert_eq!(h.store.flight_count().unwrap(), 1);
}

#[test_log::test(tokio::test)]
async fn get_by_id_and_remove() {
    let h = harness();
    let created = h
        .service
        .create(NewFlight::new(at(1, 10, 0), h.a, h.b))
        .await
        .unwrap();

    assert_eq!(h.service.get_by_id(created.id).await.unwrap(), created);

    h.service.remove(created.id).await.unwrap();

    assert_eq!(
        h.service.get_by_id(created.id).await.unwrap_err(),
        FlightError::NotFound { id: created.id }
    );
    assert_eq!(
        h.service.remove(created.id).await.unwrap_err(),
        FlightError::NotFound { id: created.id }
    );
}

#[test_log::test(tokio::test)]
async fn remove_missing_id_leaves_store_unchanged() {
    let h = harness();
    h.service
        .create(NewFlight::new(at(1, 10, 0), h.a, h.b))
        .await
        .unwrap();
    let ghost = FlightId::new();

    let err = h.service.remove(ghost).await.unwrap_err();

    assert_eq!(err, FlightError::NotFound { id: ghost });
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(!err.kind().is_rejection());
    assert_eq!(h.store.flight_count().unwrap(), 1);
}

#[test_log::test(tokio::test)]
async fn find_between_dates_is_inclusive_and_excludes_id() {
    let h = harness();
    let morning = h
        .service
        .create(NewFlight::new(at(1, 8, 0), h.a, h.b))
        .await
        .unwrap();
    let noon = h
        .service
        .create(NewFlight::new(at(1, 12, 0), h.a, h.c))
        .await
        .unwrap();

    let both = h
        .service
        .find_between_dates(at(1, 8, 0), at(1, 12, 0), None)
        .await
        .unwrap();
    assert_eq!(both, vec![morning.clone(), noon.clone()]);

    let without_noon = h
        .service
        .find_between_dates(at(1, 8, 0), at(1, 12, 0), Some(noon.id))
        .await
        .unwrap();
    assert_eq!(without_noon, vec![morning]);
}

#[test_log::test(tokio::test)]
async fn store_failures_propagate_unchanged() {
    let h = harness();
    h.store.set_healthy(false);

    let err = h
        .service
        .create(NewFlight::new(at(1, 10, 0), h.a, h.b))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        FlightError::Store(StoreError::Unavailable("store marked unhealthy".into()))
    );
    assert_eq!(h.service.list_all().await.unwrap_err().kind(), ErrorKind::Store);
}

#[test_log::test(tokio::test)]
async fn unknown_location_is_a_store_error() {
    let h = harness();
    let ghost = skyplan_types::LocationId::new();

    let err = h
        .service
        .create(NewFlight::new(at(1, 10, 0), h.a, ghost))
        .await
        .unwrap_err();

    assert_eq!(err, FlightError::Store(StoreError::MissingLocation(ghost)));
}

#[test_log::test(tokio::test)]
async fn audit_reports_flights_written_around_the_service() {
    let h = harness();
    let first = Flight {
        id: FlightId::new(),
        date: at(1, 9, 0),
        source: h.a,
        destination: h.b,
    };
    let second = Flight {
        id: FlightId::new(),
        date: at(1, 9, 10),
        source: h.c,
        destination: h.b,
    };
    h.store.insert_flight(first.clone()).unwrap();
    h.store.insert_flight(second.clone()).unwrap();

    let violations = h.service.audit().await.unwrap();

    assert_eq!(violations.len(), 2);
    assert!(violations.iter().all(|v| v.flight().is_some()));
}

#[test_log::test(tokio::test(flavor = "multi_thread", worker_threads = 4))]
async fn concurrent_conflicting_creates_admit_one() {
    let h = harness();
    let service = Arc::new(h.service);

    let mut tasks = Vec::new();
    for minute in 0..8 {
        let service = Arc::clone(&service);
        let (a, b) = (h.a, h.b);
        tasks.push(tokio::spawn(async move {
            service.create(NewFlight::new(at(1, 10, minute), a, b)).await
        }));
    }

    let mut accepted = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(_) => accepted += 1,
            Err(err) => assert!(err.kind().is_rejection(), "unexpected error: {err}"),
        }
    }

    assert_eq!(accepted, 1);
    assert_eq!(h.store.flight_count().unwrap(), 1);
    assert!(service.audit().await.unwrap().is_empty());
}

#[test_log::test(tokio::test)]
async fn config_controls_separation() {
    let h = harness();
    let config = ServiceConfig::from_json(r#"{"min_separation_minutes": 60}"#).unwrap();
    let service = FlightQueryService::with_config(Arc::clone(&h.store), &config).unwrap();

    service
        .create(NewFlight::new(at(1, 10, 0), h.a, h.b))
        .await
        .unwrap();
    let err = service
        .create(NewFlight::new(at(1, 10, 45), h.a, h.c))
        .await
        .unwrap_err();

    match err {
        FlightError::SchedulingConflict {
            separation_minutes, ..
        } => assert_eq!(separation_minutes, 60),
        other => panic!("expected scheduling conflict, got {other}"),
    }
}
