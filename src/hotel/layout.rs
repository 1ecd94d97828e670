//! Hotel layout and seeding
//!
//! The canonical hotel has floors 1 to 9 with 10 rooms each and a top floor
//! with 7 rooms, 97 rooms in total. The layout is created once; bookings only
//! ever change room status.

use crate::hotel::room::{Room, MAX_POSITION};
use crate::hotel::store::{RoomStore, StoreError, StoreResult};
use tracing::info;

/// Number of rooms on every floor below the top floor
pub const ROOMS_PER_STANDARD_FLOOR: u32 = MAX_POSITION;

/// Number of floors with a full set of rooms
pub const STANDARD_FLOORS: u32 = 9;

/// Number of rooms on the top floor
pub const TOP_FLOOR_ROOMS: u32 = 7;

/// Floor plan: how many rooms each floor holds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotelLayout {
    /// Room count per floor; index 0 is floor 1
    floors: Vec<u32>,
}

impl HotelLayout {
    /// The canonical 97-room layout
    pub fn canonical() -> Self {
        let mut floors = vec![ROOMS_PER_STANDARD_FLOOR; STANDARD_FLOORS as usize];
        floors.push(TOP_FLOOR_ROOMS);
        Self { floors }
    }

    /// Number of floors
    pub fn floor_count(&self) -> u32 {
        self.floors.len() as u32
    }

    /// Number of rooms on a floor, if the floor exists
    pub fn rooms_on_floor(&self, floor: u32) -> Option<u32> {
        let idx = floor.checked_sub(1)? as usize;
        self.floors.get(idx).copied()
    }

    /// Total number of rooms
    pub fn total_rooms(&self) -> usize {
        self.floors.iter().map(|&n| n as usize).sum()
    }

    /// Build every room of the layout, all available, ordered by floor then position
    pub fn build_rooms(&self) -> StoreResult<Vec<Room>> {
        let mut rooms = Vec::with_capacity(self.total_rooms());
        for (idx, &room_count) in self.floors.iter().enumerate() {
            let floor = idx as u32 + 1;
            for position in 1..=room_count {
                rooms.push(Room::new(floor, position)?);
            }
        }
        Ok(rooms)
    }

    /// Populate `store` with this layout if it holds no rooms yet
    ///
    /// Returns `true` when rooms were written.
    pub fn seed_if_empty<S: RoomStore>(&self, store: &S) -> StoreResult<bool> {
        let existing = store.count()?;
        if existing > 0 {
            info!("Store already contains {} rooms, skipping seed", existing);
            return Ok(false);
        }

        let rooms = self.build_rooms()?;
        let seeded = rooms.len();
        store.transaction(|table| {
            for room in rooms {
                table.insert(room)?;
            }
            Ok::<_, StoreError>(())
        })?;

        info!("Seeded {} rooms across {} floors", seeded, self.floor_count());
        Ok(true)
    }
}

impl Default for HotelLayout {
    fn default() -> Self {
        Self::canonical()
    }
}
