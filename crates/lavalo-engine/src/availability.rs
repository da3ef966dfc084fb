//! Day-by-day availability projection over slots and bookable times.
//!
//! Given a slot snapshot and a reservation snapshot, produces for each day of
//! the window two views of the same occupancy relation:
//!
//! - per slot: is there any grid time on that day when the slot is free?
//! - per time: is there any offered slot free at that time on that day?
//!
//! The first feeds "pick a bay, then a time" flows; the second feeds "pick a
//! time, then a bay".

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::grid::{time_label, TimeGrid};
use crate::model::{Reservation, Slot, SlotId};
use crate::occupancy::OccupancyIndex;

/// Availability of one slot for a whole day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotAvailability {
    pub id: SlotId,
    pub label: String,
    pub is_available: bool,
}

/// Availability of one grid time across all slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourAvailability {
    /// `HH:MM` label.
    pub value: String,
    pub is_available: bool,
}

/// Availability for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAvailability {
    /// One entry per input slot, in input order.
    pub slots: Vec<SlotAvailability>,
    /// One entry per grid time, in grid order.
    pub hours: Vec<HourAvailability>,
}

/// Projection keyed by `YYYY-MM-DD`. Ordered so JSON output lists dates
/// ascending.
pub type AvailabilityProjection = BTreeMap<String, DayAvailability>;

/// Format a date as a projection key.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// The calendar day `now` falls on in `tz`.
pub fn local_today(now: DateTime<Utc>, tz: Tz) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}

/// The instant a local calendar day begins in `tz`.
///
/// When midnight itself is skipped by a DST transition, the day begins at the
/// transition instant.
pub fn local_midnight(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        .or_else(|| {
            tz.from_local_datetime(&(midnight - Duration::hours(1)))
                .earliest()
                .map(|dt| dt + Duration::hours(1))
        })
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| midnight.and_utc())
}

/// Half-open instant range `[today 00:00, today + days_ahead + 1 00:00)` in
/// `tz`, expressed in UTC for reservation lookups.
///
/// # Errors
/// Returns `EngineError::InvalidConfig` if the end of the window falls past
/// the last representable date.
pub fn availability_window(
    today: NaiveDate,
    days_ahead: u32,
    tz: Tz,
) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let end_date = today
        .checked_add_signed(Duration::days(i64::from(days_ahead) + 1))
        .ok_or_else(|| {
            EngineError::InvalidConfig(format!(
                "{} days after {} is out of range",
                days_ahead, today
            ))
        })?;
    Ok((local_midnight(today, tz), local_midnight(end_date, tz)))
}

/// Compute slot and hour availability for `today` through
/// `today + config.days_ahead`, inclusive.
///
/// `reservations` should already be limited to the window; this function does
/// not re-check dates, but it does drop every reservation that is not pending
/// or confirmed. Reservations pointing at slots missing from `slots` are
/// ignored.
///
/// # Errors
/// Returns `EngineError::NoResourcesConfigured` if `slots` is empty.
pub fn project_availability(
    slots: &[Slot],
    reservations: &[Reservation],
    today: NaiveDate,
    config: &EngineConfig,
) -> Result<AvailabilityProjection> {
    if slots.is_empty() {
        return Err(EngineError::NoResourcesConfigured);
    }

    let index = OccupancyIndex::build(reservations, config.timezone);
    let grid = TimeGrid::new(&config.business_hours);
    let labels = grid.labels();

    debug!(
        slots = slots.len(),
        occupied = index.len(),
        grid = grid.len(),
        days = config.days_ahead + 1,
        %today,
        "projecting availability"
    );

    let mut projection = AvailabilityProjection::new();
    for date in today.iter_days().take(config.days_ahead as usize + 1) {
        let free = |slot: &Slot, time: NaiveTime| !index.is_occupied(date, slot.id, time);

        let slot_entries = slots
            .iter()
            .map(|slot| SlotAvailability {
                id: slot.id,
                label: slot.label.clone(),
                is_available: slot.is_available && grid.iter().any(|t| free(slot, t)),
            })
            .collect();

        let hour_entries = grid
            .iter()
            .zip(&labels)
            .map(|(time, label)| HourAvailability {
                value: label.clone(),
                is_available: slots.iter().any(|s| s.is_available && free(s, time)),
            })
            .collect();

        projection.insert(
            date_key(date),
            DayAvailability {
                slots: slot_entries,
                hours: hour_entries,
            },
        );
    }

    Ok(projection)
}

/// Serialize a projection as the JSON body served to clients.
pub fn to_json(projection: &AvailabilityProjection, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(projection)?
    } else {
        serde_json::to_string(projection)?
    };
    Ok(json)
}
