//! Tests for the week-availability service over pluggable sources.

use std::cell::Cell;

use chrono::{DateTime, TimeZone, Utc};
use lavalo_engine::config::{BusinessHours, EngineConfig, MAX_DAYS_AHEAD};
use lavalo_engine::error::{EngineError, SourceError};
use lavalo_engine::model::{Reservation, ReservationStatus, Slot};
use lavalo_engine::service::AvailabilityService;
use lavalo_engine::source::{AvailabilitySource, InMemorySource};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 16, 13, 45, 12).unwrap()
}

fn at(day: u32, h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, day, h, m, 0).unwrap()
}

/// Source whose calls can be made to fail and whose range queries are recorded.
#[derive(Default)]
struct ScriptedSource {
    slots: Vec<Slot>,
    reservations: Vec<Reservation>,
    fail_slots: bool,
    fail_reservations: bool,
    reservation_calls: Cell<usize>,
    last_range: Cell<Option<(DateTime<Utc>, DateTime<Utc>)>>,
}

impl AvailabilitySource for ScriptedSource {
    fn find_all_slots(&self) -> Result<Vec<Slot>, SourceError> {
        if self.fail_slots {
            return Err("slots table unavailable".into());
        }
        Ok(self.slots.clone())
    }

    fn find_reservations_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Reservation>, SourceError> {
        self.reservation_calls.set(self.reservation_calls.get() + 1);
        self.last_range.set(Some((start, end)));
        if self.fail_reservations {
            return Err("reservations query timed out".into());
        }
        Ok(self.reservations.clone())
    }
}

// ── Error paths ─────────────────────────────────────────────────────────────

#[test]
fn empty_source_reports_no_resources() {
    let service = AvailabilityService::new(InMemorySource::default(), EngineConfig::default());
    let err = service.week_availability(now()).unwrap_err();

    assert!(matches!(err, EngineError::NoResourcesConfigured));
    assert_eq!(err.status_code(), 404);
}

#[test]
fn no_slots_skips_reservation_fetch() {
    let source = ScriptedSource::default();
    let service = AvailabilityService::new(&source, EngineConfig::default());

    assert!(service.week_availability(now()).is_err());
    assert_eq!(source.reservation_calls.get(), 0);
}

#[test]
fn slot_fetch_failure_is_infrastructure() {
    let source = ScriptedSource {
        fail_slots: true,
        ..Default::default()
    };
    let service = AvailabilityService::new(&source, EngineConfig::default());
    let err = service.week_availability(now()).unwrap_err();

    assert!(matches!(err, EngineError::Infrastructure(_)));
    assert_eq!(err.status_code(), 500);
    assert!(err.to_string().contains("slots table unavailable"));
}

#[test]
fn reservation_fetch_failure_is_infrastructure() {
    let source = ScriptedSource {
        slots: vec![Slot::new(1, "Espacio 1")],
        fail_reservations: true,
        ..Default::default()
    };
    let service = AvailabilityService::new(&source, EngineConfig::default());
    let err = service.week_availability(now()).unwrap_err();

    assert!(matches!(err, EngineError::Infrastructure(_)));
}

#[test]
fn invalid_hours_are_rejected_before_fetching() {
    let source = ScriptedSource {
        slots: vec![Slot::new(1, "Espacio 1")],
        ..Default::default()
    };
    let config = EngineConfig {
        business_hours: BusinessHours {
            start_hour: 22,
            end_hour: 8,
            step_minutes: 30,
        },
        ..Default::default()
    };
    let service = AvailabilityService::new(&source, config);
    let err = service.week_availability(now()).unwrap_err();

    assert!(matches!(err, EngineError::InvalidConfig(_)));
    assert_eq!(source.reservation_calls.get(), 0);
}

#[test]
fn oversized_window_is_rejected_before_fetching() {
    let source = ScriptedSource {
        slots: vec![Slot::new(1, "Espacio 1")],
        ..Default::default()
    };
    let service =
        AvailabilityService::new(&source, EngineConfig::default().with_days_ahead(u32::MAX));
    let err = service.week_availability(now()).unwrap_err();

    assert!(matches!(err, EngineError::InvalidConfig(_)));
    assert_eq!(err.status_code(), 400);
    assert_eq!(source.reservation_calls.get(), 0);
}

#[test]
fn year_long_window_is_accepted() {
    let service = AvailabilityService::new(
        InMemorySource::new(vec![Slot::new(1, "Espacio 1")], vec![]),
        EngineConfig::default().with_days_ahead(MAX_DAYS_AHEAD),
    );
    let projection = service.week_availability(now()).unwrap();

    assert_eq!(projection.len(), MAX_DAYS_AHEAD as usize + 1);
}

// ── Window ──────────────────────────────────────────────────────────────────

#[test]
fn reservations_are_requested_for_the_whole_window() {
    let source = ScriptedSource {
        slots: vec![Slot::new(1, "Espacio 1")],
        ..Default::default()
    };
    let service = AvailabilityService::new(&source, EngineConfig::default());
    service.week_availability(now()).unwrap();

    assert_eq!(source.last_range.get(), Some((at(16, 0, 0), at(24, 0, 0))));
}

#[test]
fn window_follows_configured_timezone() {
    let source = ScriptedSource {
        slots: vec![Slot::new(1, "Espacio 1")],
        ..Default::default()
    };
    let config = EngineConfig::default().with_timezone(chrono_tz::America::Santiago);
    let service = AvailabilityService::new(&source, config);
    let projection = service.week_availability(now()).unwrap();

    // Santiago is UTC-3 in mid-March, so local midnight is 03:00 UTC.
    assert_eq!(source.last_range.get(), Some((at(16, 3, 0), at(24, 3, 0))));
    assert!(projection.contains_key("2026-03-16"));
    assert!(projection.contains_key("2026-03-23"));
}

#[test]
fn today_is_the_local_day_of_now() {
    // 01:00 UTC on the 17th is still the evening of the 16th in Santiago.
    let service = AvailabilityService::new(
        InMemorySource::new(vec![Slot::new(1, "Espacio 1")], vec![]),
        EngineConfig::default().with_timezone(chrono_tz::America::Santiago),
    );
    let projection = service.week_availability(at(17, 1, 0)).unwrap();

    assert_eq!(projection.keys().next().map(String::as_str), Some("2026-03-16"));
}

// ── End to end over the in-memory source ────────────────────────────────────

#[test]
fn in_memory_source_end_to_end() {
    let mut closed = Slot::new(3, "Espacio 3");
    closed.is_available = false;
    let source = InMemorySource::new(
        vec![Slot::new(2, "Espacio 2"), closed, Slot::new(1, "Espacio 1")],
        vec![
            Reservation::new(1, 1, at(16, 8, 0), ReservationStatus::Confirmed),
            Reservation::new(2, 2, at(16, 8, 0), ReservationStatus::Pending),
            Reservation::new(3, 1, at(16, 8, 30), ReservationStatus::Cancelled),
            // Outside the window; the source drops it.
            Reservation::new(4, 1, at(30, 8, 0), ReservationStatus::Confirmed),
        ],
    );
    let service = AvailabilityService::new(source, EngineConfig::default());
    let projection = service.week_availability(now()).unwrap();

    assert_eq!(projection.len(), 8);
    let day = &projection["2026-03-16"];
    let ids: Vec<u64> = day.slots.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![1, 2], "offered slots only, ordered by id");
    assert!(!day.hours[0].is_available);
    assert!(day.hours[1].is_available);
}

#[test]
fn current_instant_projects_full_window() {
    let service = AvailabilityService::new(
        InMemorySource::new(vec![Slot::new(1, "Espacio 1")], vec![]),
        EngineConfig::default().with_days_ahead(2),
    );
    let projection = service.week_availability_now().unwrap();

    assert_eq!(projection.len(), 3);
    assert!(projection
        .values()
        .all(|day| day.hours.iter().all(|h| h.is_available)));
}

#[test]
fn service_exposes_its_config() {
    let config = EngineConfig::default().with_days_ahead(3);
    let service = AvailabilityService::new(InMemorySource::default(), config);
    assert_eq!(service.config().days_ahead, 3);
}
