//! Business-hours and projection-window configuration.
//!
//! Configuration is a plain value handed to the service or projector by the
//! caller. Nothing here is process-wide.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

pub const DEFAULT_START_HOUR: u32 = 8;
pub const DEFAULT_END_HOUR: u32 = 22;
pub const DEFAULT_STEP_MINUTES: u32 = 30;
pub const DEFAULT_DAYS_AHEAD: u32 = 7;
/// Longest window the engine will project, in days after today.
pub const MAX_DAYS_AHEAD: u32 = 366;

/// Opening hours of one business day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessHours {
    /// First bookable hour (inclusive).
    pub start_hour: u32,
    /// Closing hour (exclusive).
    pub end_hour: u32,
    pub step_minutes: u32,
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self {
            start_hour: DEFAULT_START_HOUR,
            end_hour: DEFAULT_END_HOUR,
            step_minutes: DEFAULT_STEP_MINUTES,
        }
    }
}

impl BusinessHours {
    /// Build validated business hours.
    ///
    /// # Errors
    /// Returns `EngineError::InvalidConfig` unless `start_hour < end_hour <= 24`
    /// and `1 <= step_minutes <= 60`.
    pub fn new(start_hour: u32, end_hour: u32, step_minutes: u32) -> Result<Self> {
        let hours = Self {
            start_hour,
            end_hour,
            step_minutes,
        };
        hours.validate()?;
        Ok(hours)
    }

    pub fn validate(&self) -> Result<()> {
        if self.end_hour > 24 {
            return Err(EngineError::InvalidConfig(format!(
                "end_hour must be at most 24, got {}",
                self.end_hour
            )));
        }
        if self.start_hour >= self.end_hour {
            return Err(EngineError::InvalidConfig(format!(
                "start_hour ({}) must be before end_hour ({})",
                self.start_hour, self.end_hour
            )));
        }
        if self.step_minutes == 0 || self.step_minutes > 60 {
            return Err(EngineError::InvalidConfig(format!(
                "step_minutes must be between 1 and 60, got {}",
                self.step_minutes
            )));
        }
        Ok(())
    }
}

/// Everything the projector needs besides the two snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub business_hours: BusinessHours,
    /// Days after today to project; the window holds `days_ahead + 1` days.
    pub days_ahead: u32,
    /// Zone whose calendar defines "today" and the local time of reservations.
    pub timezone: Tz,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            business_hours: BusinessHours::default(),
            days_ahead: DEFAULT_DAYS_AHEAD,
            timezone: chrono_tz::UTC,
        }
    }
}

impl EngineConfig {
    /// Check the business hours and that `days_ahead` is at most
    /// [`MAX_DAYS_AHEAD`].
    pub fn validate(&self) -> Result<()> {
        self.business_hours.validate()?;
        if self.days_ahead > MAX_DAYS_AHEAD {
            return Err(EngineError::InvalidConfig(format!(
                "days_ahead must be at most {}, got {}",
                MAX_DAYS_AHEAD, self.days_ahead
            )));
        }
        Ok(())
    }

    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn with_days_ahead(mut self, days_ahead: u32) -> Self {
        self.days_ahead = days_ahead;
        self
    }

    pub fn with_business_hours(mut self, business_hours: BusinessHours) -> Self {
        self.business_hours = business_hours;
        self
    }
}
