//! Domain records consumed by the projector: bookable slots and reservations.
//!
//! Both are read-only snapshots here. Creation, validation and conflict checks
//! happen in the booking write path, not in this crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type SlotId = u64;
pub type ReservationId = u64;

/// A physical bay that can be booked (e.g., "Espacio 1").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub id: SlotId,
    pub label: String,
    /// Whether the slot is offered for booking at all.
    #[serde(default = "default_true")]
    pub is_available: bool,
}

impl Slot {
    pub fn new(id: SlotId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            is_available: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Lifecycle state of a reservation.
///
/// Anything the deserializer does not recognize (including a missing field)
/// becomes [`ReservationStatus::Unknown`], which never occupies a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
    #[default]
    #[serde(other)]
    Unknown,
}

impl ReservationStatus {
    /// Pending and confirmed reservations block their slot; nothing else does.
    pub fn is_active(self) -> bool {
        matches!(self, ReservationStatus::Pending | ReservationStatus::Confirmed)
    }
}

/// A booking of one slot at one start instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub slot_id: SlotId,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub status: ReservationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Reservation {
    pub fn new(
        id: ReservationId,
        slot_id: SlotId,
        start_time: DateTime<Utc>,
        status: ReservationStatus,
    ) -> Self {
        Self {
            id,
            slot_id,
            start_time,
            status,
            user_id: None,
            address_id: None,
            notes: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}
