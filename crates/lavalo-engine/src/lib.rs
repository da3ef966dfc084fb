//! # lavalo-engine
//!
//! Availability projection for a bay-based booking business (a car wash with a
//! handful of bays and fixed opening hours).
//!
//! Given the bookable slots and the reservations already on the books, the
//! engine derives a rolling, day-by-day view of which slots and which times of
//! day still have room. It is a pure computation over owned snapshots: no I/O,
//! no shared state, no process-wide configuration.
//!
//! ## Modules
//!
//! - [`grid`] -- business hours → ordered `HH:MM` time labels
//! - [`occupancy`] -- active reservations → `(date, slot, time)` lookup set
//! - [`availability`] -- slots + reservations → per-day slot/hour availability
//! - [`service`] -- fetch snapshots from a source, then project
//! - [`source`] -- the data-collaborator trait and an in-memory implementation
//! - [`model`] -- slots, reservations and reservation status
//! - [`config`] -- business hours, window length, timezone
//! - [`error`] -- Error types

pub mod availability;
pub mod config;
pub mod error;
pub mod grid;
pub mod model;
pub mod occupancy;
pub mod service;
pub mod source;

pub use availability::{
    project_availability, AvailabilityProjection, DayAvailability, HourAvailability,
    SlotAvailability,
};
pub use config::{BusinessHours, EngineConfig};
pub use error::{ApiError, EngineError};
pub use grid::{generate_time_grid, TimeGrid};
pub use model::{Reservation, ReservationStatus, Slot, SlotId};
pub use occupancy::OccupancyIndex;
pub use service::AvailabilityService;
pub use source::{AvailabilitySource, InMemorySource};
