//! Data collaborators that feed the projector.
//!
//! The engine never talks to storage directly. A [`AvailabilitySource`]
//! delivers owned snapshots, and any failure it reports is wrapped as
//! [`EngineError::Infrastructure`](crate::error::EngineError::Infrastructure).

use chrono::{DateTime, Utc};

use crate::error::SourceError;
use crate::model::{Reservation, Slot};

/// Read access to slots and reservations.
pub trait AvailabilitySource {
    /// All slots offered for booking, in a stable order.
    fn find_all_slots(&self) -> Result<Vec<Slot>, SourceError>;

    /// Reservations with `start <= start_time < end`.
    ///
    /// Implementations may pre-filter by status; the projector filters again.
    fn find_reservations_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Reservation>, SourceError>;
}

impl<S: AvailabilitySource + ?Sized> AvailabilitySource for &S {
    fn find_all_slots(&self) -> Result<Vec<Slot>, SourceError> {
        (**self).find_all_slots()
    }

    fn find_reservations_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Reservation>, SourceError> {
        (**self).find_reservations_in_range(start, end)
    }
}

/// Source backed by in-memory collections (fixtures, files, caches).
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    slots: Vec<Slot>,
    reservations: Vec<Reservation>,
}

impl InMemorySource {
    pub fn new(slots: Vec<Slot>, reservations: Vec<Reservation>) -> Self {
        Self {
            slots,
            reservations,
        }
    }
}

impl AvailabilitySource for InMemorySource {
    /// Offered slots only, ordered by id ascending.
    fn find_all_slots(&self) -> Result<Vec<Slot>, SourceError> {
        let mut slots: Vec<Slot> = self
            .slots
            .iter()
            .filter(|s| s.is_available)
            .cloned()
            .collect();
        slots.sort_by_key(|s| s.id);
        Ok(slots)
    }

    fn find_reservations_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Reservation>, SourceError> {
        Ok(self
            .reservations
            .iter()
            .filter(|r| r.start_time >= start && r.start_time < end)
            .cloned()
            .collect())
    }
}
