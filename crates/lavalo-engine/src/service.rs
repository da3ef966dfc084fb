//! The week-availability operation: fetch snapshots, then project.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::availability::{
    availability_window, local_today, project_availability, AvailabilityProjection,
};
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::source::AvailabilitySource;

/// Computes availability from whatever a source currently holds.
///
/// Holds no state between calls besides its source and configuration.
#[derive(Debug, Clone)]
pub struct AvailabilityService<S> {
    source: S,
    config: EngineConfig,
}

impl<S: AvailabilitySource> AvailabilityService<S> {
    pub fn new(source: S, config: EngineConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Availability for the local day of `now` and the following
    /// `config.days_ahead` days.
    ///
    /// # Errors
    /// - `InvalidConfig` if the business hours are malformed or `days_ahead`
    ///   exceeds [`MAX_DAYS_AHEAD`](crate::config::MAX_DAYS_AHEAD).
    /// - `Infrastructure` if the source fails to deliver either snapshot.
    /// - `NoResourcesConfigured` if the source offers no slots; reservations
    ///   are not fetched in that case.
    pub fn week_availability(&self, now: DateTime<Utc>) -> Result<AvailabilityProjection> {
        self.config.validate()?;

        let tz = self.config.timezone;
        let today = local_today(now, tz);
        let (start, end) = availability_window(today, self.config.days_ahead, tz)?;

        let slots = self
            .source
            .find_all_slots()
            .map_err(EngineError::Infrastructure)?;
        if slots.is_empty() {
            return Err(EngineError::NoResourcesConfigured);
        }

        let reservations = self
            .source
            .find_reservations_in_range(start, end)
            .map_err(EngineError::Infrastructure)?;
        debug!(
            reservations = reservations.len(),
            %start,
            %end,
            "fetched reservation snapshot"
        );

        project_availability(&slots, &reservations, today, &self.config)
    }

    /// [`week_availability`](Self::week_availability) at the current instant.
    pub fn week_availability_now(&self) -> Result<AvailabilityProjection> {
        self.week_availability(Utc::now())
    }
}
