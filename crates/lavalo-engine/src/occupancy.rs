//! Reservation occupancy index.
//!
//! Flattens the active reservations of a snapshot into a single set of
//! `(local date, slot, local minute)` keys so the projector can answer
//! "is this slot taken at this time on this day?" with one hash lookup.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveTime};
use chrono_tz::Tz;
use tracing::warn;

use crate::grid::truncate_to_minute;
use crate::model::{Reservation, ReservationStatus, SlotId};

#[derive(Debug, Clone, Default)]
pub struct OccupancyIndex {
    occupied: HashSet<(NaiveDate, SlotId, NaiveTime)>,
}

impl OccupancyIndex {
    /// Index every pending or confirmed reservation.
    ///
    /// Start instants are converted to `tz` before the date and minute are
    /// taken. Times are matched by exact minute later on, so a reservation that
    /// does not start on a grid step never blocks a grid time.
    pub fn build(reservations: &[Reservation], tz: Tz) -> Self {
        let mut occupied = HashSet::with_capacity(reservations.len());
        for r in reservations {
            if !r.is_active() {
                if r.status == ReservationStatus::Unknown {
                    warn!(
                        reservation_id = r.id,
                        "reservation has unrecognized status, treating as free"
                    );
                }
                continue;
            }
            let local = r.start_time.with_timezone(&tz).naive_local();
            occupied.insert((local.date(), r.slot_id, truncate_to_minute(local.time())));
        }
        Self { occupied }
    }

    pub fn is_occupied(&self, date: NaiveDate, slot_id: SlotId, time: NaiveTime) -> bool {
        self.occupied.contains(&(date, slot_id, time))
    }

    /// Number of distinct occupied (date, slot, time) keys.
    pub fn len(&self) -> usize {
        self.occupied.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occupied.is_empty()
    }
}
