//! Room model
//!
//! This module contains the Room struct. A room's identity and geometry
//! (floor and position) are fixed when it is created; only its status changes.

use crate::hotel::store::StoreError;
use crate::types::{RoomId, RoomStatus};
use serde::{Deserialize, Serialize};

/// Highest position on any floor (positions count outward from the lift)
pub const MAX_POSITION: u32 = 10;

/// Represents one physical hotel room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Unique identifier for the room
    pub id: RoomId,
    /// Display number, `floor * 100 + position`
    pub room_no: u32,
    /// Floor the room is on (1-based)
    pub floor: u32,
    /// Ordinal distance from the lift on this floor (1 = closest)
    pub position: u32,
    /// Current booking status
    pub status: RoomStatus,
}

impl Room {
    /// Create a new available room at the given floor and position
    pub fn new(floor: u32, position: u32) -> Result<Self, StoreError> {
        Ok(Self {
            id: RoomId::new(),
            room_no: Self::room_number(floor, position)?,
            floor,
            position,
            status: RoomStatus::Available,
        })
    }

    /// Derive the display room number for a floor and position
    ///
    /// Fails when the geometry is out of range or the number does not fit in
    /// a `u32`.
    pub fn room_number(floor: u32, position: u32) -> Result<u32, StoreError> {
        if floor == 0 || position == 0 || position > MAX_POSITION {
            return Err(StoreError::InvalidGeometry { floor, position });
        }
        floor
            .checked_mul(100)
            .and_then(|base| base.checked_add(position))
            .ok_or(StoreError::InvalidGeometry { floor, position })
    }

    /// Check if the room can be allocated
    pub fn is_available(&self) -> bool {
        self.status.is_available()
    }

    /// Check if the room is taken
    pub fn is_booked(&self) -> bool {
        self.status == RoomStatus::Booked
    }

    /// Return a copy of this room carrying a different status
    pub fn with_status(&self, status: RoomStatus) -> Self {
        Self { status, ..self.clone() }
    }

    /// Key used to order rooms by closeness to the ground-floor lift
    pub fn lift_order_key(&self) -> (u32, u32) {
        (self.floor, self.position)
    }

    /// Check that the stored room number matches the room's geometry
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.room_no != Self::room_number(self.floor, self.position)? {
            return Err(StoreError::RoomNumberMismatch {
                room_no: self.room_no,
                floor: self.floor,
                position: self.position,
            });
        }
        Ok(())
    }
}
