//! Structured results handed to the outward-facing layer

use crate::booking::allocator::AllocationStrategy;
use crate::booking::error::BookingError;
use crate::hotel::Room;
use serde::{Deserialize, Serialize};

/// Result of a booking request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingOutcome {
    /// Whether the rooms were booked
    pub success: bool,
    /// Human-readable explanation
    pub message: String,
    /// Booked rooms in selection order; present only on success
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub booked_rooms: Option<Vec<Room>>,
    /// Phase that chose the rooms; present only on success
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub strategy: Option<AllocationStrategy>,
}

impl BookingOutcome {
    /// Successful booking of `rooms`
    pub fn booked(rooms: Vec<Room>, strategy: AllocationStrategy) -> Self {
        Self {
            success: true,
            message: format!("Successfully booked {} rooms", rooms.len()),
            booked_rooms: Some(rooms),
            strategy: Some(strategy),
        }
    }

    /// Refused booking
    pub fn rejected(message: impl Into<String>) -> Self {
        Self { success: false, message: message.into(), booked_rooms: None, strategy: None }
    }

    /// Room numbers booked by this outcome, empty on failure
    pub fn room_numbers(&self) -> Vec<u32> {
        self.booked_rooms
            .as_deref()
            .map(|rooms| rooms.iter().map(|room| room.room_no).collect())
            .unwrap_or_default()
    }
}

impl From<&BookingError> for BookingOutcome {
    fn from(error: &BookingError) -> Self {
        Self::rejected(error.to_string())
    }
}

/// Listing of every room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomListResponse {
    /// Whether the listing could be produced
    pub success: bool,
    /// Rooms ordered by room number
    pub rooms: Vec<Room>,
}
