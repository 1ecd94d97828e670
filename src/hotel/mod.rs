//! Hotel rooms and room storage
//!
//! This module manages the physical side of the hotel: rooms, the floor
//! layout used to seed them, and the store that owns their status.
//!
//! # Overview
//!
//! - **Room**: one physical room with floor, position and status
//! - **HotelLayout**: the canonical floor plan and the seeding step
//! - **RoomStore**: storage trait with atomic transactions
//! - **InMemoryRoomStore**: mutex-guarded store with JSON snapshots
//!
//! # Usage Example
//!
//! ```rust
//! use hotel_room_allocator::hotel::*;
//!
//! let store = InMemoryRoomStore::new();
//! HotelLayout::canonical().seed_if_empty(&store).unwrap();
//!
//! assert_eq!(store.count().unwrap(), 97);
//! assert_eq!(store.list_available().unwrap().len(), 97);
//! ```

pub mod layout;
pub mod room;
pub mod store;

// Re-export all public types for convenience
pub use layout::HotelLayout;
pub use room::Room;
pub use store::{InMemoryRoomStore, RoomStore, RoomTable, StoreError, StoreResult, StoreSnapshot};
