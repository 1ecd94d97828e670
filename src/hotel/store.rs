//! Room store and room table
//!
//! The [`RoomTable`] is the indexed collection of rooms with quick lookup maps.
//! The [`RoomStore`] trait is the seam the booking service talks to;
//! [`InMemoryRoomStore`] guards a table with a mutex and gives every
//! [`RoomStore::transaction`] exclusive, all-or-nothing access.

use crate::hotel::room::Room;
use crate::types::{RoomId, RoomStatus};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised by room storage
#[derive(Debug, Error)]
pub enum StoreError {
    /// No room with this identifier exists
    #[error("Room not found: {0}")]
    RoomNotFound(RoomId),

    /// A room with this identifier is already stored
    #[error("Duplicate room id: {0}")]
    DuplicateRoomId(RoomId),

    /// A room with this display number is already stored
    #[error("Duplicate room number: {0}")]
    DuplicateRoomNumber(u32),

    /// Floor or position out of range
    #[error("Invalid room geometry: floor {floor}, position {position}")]
    InvalidGeometry {
        /// Requested floor
        floor: u32,
        /// Requested position
        position: u32,
    },

    /// Room number does not match floor and position
    #[error("Room number {room_no} does not match floor {floor}, position {position}")]
    RoomNumberMismatch {
        /// Stored room number
        room_no: u32,
        /// Stored floor
        floor: u32,
        /// Stored position
        position: u32,
    },

    /// An update tried to move a room or renumber it
    #[error("Room {0} cannot change floor, position or number after creation")]
    GeometryChanged(RoomId),

    /// I/O error while reading or writing a snapshot
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Indexed collection of rooms
#[derive(Debug, Clone, Default)]
pub struct RoomTable {
    /// Rooms in insertion order
    rooms: Vec<Room>,
    /// Quick lookup map from room ID to index
    id_index: HashMap<RoomId, usize>,
    /// Quick lookup map from room number to index
    number_index: HashMap<u32, usize>,
}

impl RoomTable {
    /// Create a new empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from a list of rooms, validating every entry
    pub fn from_rooms(rooms: impl IntoIterator<Item = Room>) -> StoreResult<Self> {
        let mut table = Self::new();
        for room in rooms {
            table.insert(room)?;
        }
        Ok(table)
    }

    /// Add a new room to the table
    pub fn insert(&mut self, room: Room) -> StoreResult<Room> {
        room.validate()?;

        if self.id_index.contains_key(&room.id) {
            return Err(StoreError::DuplicateRoomId(room.id));
        }
        // Room numbers are derived from (floor, position), so this also
        // guards the pair
        if self.number_index.contains_key(&room.room_no) {
            return Err(StoreError::DuplicateRoomNumber(room.room_no));
        }

        let idx = self.rooms.len();
        self.id_index.insert(room.id, idx);
        self.number_index.insert(room.room_no, idx);
        self.rooms.push(room.clone());
        Ok(room)
    }

    /// Insert a new room or update the status of an existing one
    pub fn save(&mut self, room: Room) -> StoreResult<Room> {
        let Some(&idx) = self.id_index.get(&room.id) else {
            return self.insert(room);
        };

        let existing = &mut self.rooms[idx];
        if existing.floor != room.floor
            || existing.position != room.position
            || existing.room_no != room.room_no
        {
            return Err(StoreError::GeometryChanged(room.id));
        }

        existing.status = room.status;
        Ok(existing.clone())
    }

    /// Set the status of a room
    pub fn set_status(&mut self, room_id: RoomId, status: RoomStatus) -> StoreResult<Room> {
        let idx = *self.id_index.get(&room_id).ok_or(StoreError::RoomNotFound(room_id))?;
        let room = &mut self.rooms[idx];
        room.status = status;
        Ok(room.clone())
    }

    /// Overwrite every room's status with the value chosen by `choose`
    pub fn overwrite_statuses<F>(&mut self, mut choose: F)
    where
        F: FnMut(&Room) -> RoomStatus,
    {
        for room in &mut self.rooms {
            room.status = choose(room);
        }
    }

    /// Get a room by ID
    pub fn get(&self, room_id: RoomId) -> Option<&Room> {
        self.id_index.get(&room_id).and_then(|&idx| self.rooms.get(idx))
    }

    /// Get a room by display number
    pub fn get_by_number(&self, room_no: u32) -> Option<&Room> {
        self.number_index.get(&room_no).and_then(|&idx| self.rooms.get(idx))
    }

    /// All rooms in insertion order
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Copy of every room
    pub fn list_all(&self) -> Vec<Room> {
        self.rooms.clone()
    }

    /// Copy of every available room
    pub fn list_available(&self) -> Vec<Room> {
        self.rooms.iter().filter(|room| room.is_available()).cloned().collect()
    }

    /// Number of rooms
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Check whether the table holds no rooms
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

/// Storage for hotel rooms
///
/// The store is the sole owner of room identity and status. Every write made
/// inside [`RoomStore::transaction`] becomes visible at once when the closure
/// returns `Ok`, and none of them do when it returns `Err`. Transactions are
/// serialized against each other and against the single-call methods.
pub trait RoomStore: Send + Sync {
    /// Every room in the store
    fn list_all(&self) -> StoreResult<Vec<Room>>;

    /// Every room whose status is available
    fn list_available(&self) -> StoreResult<Vec<Room>>;

    /// Change a single room's status
    fn set_status(&self, room_id: RoomId, status: RoomStatus) -> StoreResult<Room>;

    /// Insert a room, or persist a status change for an existing one
    fn save(&self, room: Room) -> StoreResult<Room>;

    /// Number of rooms in the store
    fn count(&self) -> StoreResult<usize>;

    /// Run `work` as one unit against an exclusive view of the room table
    fn transaction<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&mut RoomTable) -> Result<T, E>,
        E: From<StoreError>;
}

/// On-disk snapshot of the room table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    /// When the snapshot was written
    pub saved_at: DateTime<Utc>,
    /// Every room with its status
    pub rooms: Vec<Room>,
}

/// Room store holding its table in memory behind a mutex
#[derive(Debug, Default)]
pub struct InMemoryRoomStore {
    table: Mutex<RoomTable>,
}

impl InMemoryRoomStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given rooms
    pub fn with_rooms(rooms: impl IntoIterator<Item = Room>) -> StoreResult<Self> {
        Ok(Self { table: Mutex::new(RoomTable::from_rooms(rooms)?) })
    }

    /// Load a store from a JSON snapshot written by [`InMemoryRoomStore::save_to_file`]
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let snapshot: StoreSnapshot = serde_json::from_str(&content)?;

        info!(
            "Loaded {} rooms from {} (saved at {})",
            snapshot.rooms.len(),
            path.display(),
            snapshot.saved_at
        );
        Self::with_rooms(snapshot.rooms)
    }

    /// Write the current table to a JSON snapshot
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> StoreResult<()> {
        let snapshot = StoreSnapshot { saved_at: Utc::now(), rooms: self.table.lock().list_all() };
        let content = serde_json::to_string_pretty(&snapshot)?;
        fs::write(path.as_ref(), content)?;

        debug!("Saved {} rooms to {}", snapshot.rooms.len(), path.as_ref().display());
        Ok(())
    }
}

impl RoomStore for InMemoryRoomStore {
    fn list_all(&self) -> StoreResult<Vec<Room>> {
        Ok(self.table.lock().list_all())
    }

    fn list_available(&self) -> StoreResult<Vec<Room>> {
        Ok(self.table.lock().list_available())
    }

    fn set_status(&self, room_id: RoomId, status: RoomStatus) -> StoreResult<Room> {
        self.table.lock().set_status(room_id, status)
    }

    fn save(&self, room: Room) -> StoreResult<Room> {
        self.table.lock().save(room)
    }

    fn count(&self) -> StoreResult<usize> {
        Ok(self.table.lock().len())
    }

    fn transaction<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&mut RoomTable) -> Result<T, E>,
        E: From<StoreError>,
    {
        let mut guard = self.table.lock();

        // Work on a copy so a failing closure leaves the table untouched
        let mut working = guard.clone();
        let value = work(&mut working)?;
        *guard = working;

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor_rooms(floor: u32, positions: impl IntoIterator<Item = u32>) -> Vec<Room> {
        positions.into_iter().map(|p| Room::new(floor, p).unwrap()).collect()
    }

    #[test]
    fn test_table_insert_and_lookup() {
        let mut table = RoomTable::new();
        let room = table.insert(Room::new(2, 3).unwrap()).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.get(room.id), Some(&room));
        assert_eq!(table.get_by_number(203), Some(&room));
        assert!(table.get_by_number(204).is_none());
    }

    #[test]
    fn test_table_rejects_duplicate_position() {
        let mut table = RoomTable::new();
        table.insert(Room::new(1, 1).unwrap()).unwrap();

        match table.insert(Room::new(1, 1).unwrap()) {
            Err(StoreError::DuplicateRoomNumber(101)) => {}
            other => panic!("Expected DuplicateRoomNumber error, got {:?}", other),
        }
    }

    #[test]
    fn test_table_rejects_duplicate_id() {
        let mut table = RoomTable::new();
        let room = table.insert(Room::new(1, 1).unwrap()).unwrap();

        let mut clash = Room::new(1, 2).unwrap();
        clash.id = room.id;
        assert!(matches!(table.insert(clash), Err(StoreError::DuplicateRoomId(_))));
    }

    #[test]
    fn test_save_updates_status_only() {
        let mut table = RoomTable::new();
        let room = table.insert(Room::new(5, 5).unwrap()).unwrap();

        let saved = table.save(room.with_status(RoomStatus::Booked)).unwrap();
        assert!(saved.is_booked());
        assert_eq!(table.len(), 1);

        let mut moved = room.clone();
        moved.floor = 6;
        moved.room_no = 605;
        assert!(matches!(table.save(moved), Err(StoreError::GeometryChanged(_))));
    }

    #[test]
    fn test_set_status_unknown_room() {
        let mut table = RoomTable::new();
        let result = table.set_status(RoomId::new(), RoomStatus::Booked);
        assert!(matches!(result, Err(StoreError::RoomNotFound(_))));
    }

    #[test]
    fn test_list_available_filters_booked() {
        let store = InMemoryRoomStore::with_rooms(floor_rooms(1, 1..=4)).unwrap();
        let rooms = store.list_all().unwrap();

        store.set_status(rooms[1].id, RoomStatus::Booked).unwrap();

        let available = store.list_available().unwrap();
        assert_eq!(available.len(), 3);
        assert!(available.iter().all(|r| r.id != rooms[1].id));
        assert_eq!(store.count().unwrap(), 4);
    }

    #[test]
    fn test_transaction_commits_on_success() {
        let store = InMemoryRoomStore::with_rooms(floor_rooms(1, 1..=3)).unwrap();

        let booked: StoreResult<usize> = store.transaction(|table| {
            let ids: Vec<RoomId> = table.rooms().iter().map(|r| r.id).collect();
            for id in &ids {
                table.set_status(*id, RoomStatus::Booked)?;
            }
            Ok(ids.len())
        });

        assert_eq!(booked.unwrap(), 3);
        assert!(store.list_available().unwrap().is_empty());
    }

    #[test]
    fn test_transaction_rolls_back_on_error() {
        let store = InMemoryRoomStore::with_rooms(floor_rooms(1, 1..=3)).unwrap();
        let first = store.list_all().unwrap()[0].id;

        let result: StoreResult<()> = store.transaction(|table| {
            table.set_status(first, RoomStatus::Booked)?;
            // Unknown room fails the whole unit
            table.set_status(RoomId::new(), RoomStatus::Booked)?;
            Ok(())
        });

        assert!(matches!(result, Err(StoreError::RoomNotFound(_))));
        assert_eq!(store.list_available().unwrap().len(), 3);
    }

    #[test]
    fn test_snapshot_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rooms.json");

        let store = InMemoryRoomStore::with_rooms(floor_rooms(3, 1..=5)).unwrap();
        let target = store.list_all().unwrap()[2].id;
        store.set_status(target, RoomStatus::Booked).unwrap();
        store.save_to_file(&path).unwrap();

        let loaded = InMemoryRoomStore::load_from_file(&path).unwrap();
        assert_eq!(loaded.count().unwrap(), 5);
        assert_eq!(loaded.list_all().unwrap(), store.list_all().unwrap());
    }

    #[test]
    fn test_load_rejects_corrupt_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rooms.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            InMemoryRoomStore::load_from_file(&path),
            Err(StoreError::Serialization(_))
        ));
    }

    #[test]
    fn test_load_rejects_out_of_range_floor() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rooms.json");

        let store = InMemoryRoomStore::with_rooms(floor_rooms(1, 1..=2)).unwrap();
        let snapshot = StoreSnapshot { saved_at: Utc::now(), rooms: store.list_all().unwrap() };
        let mut json = serde_json::to_value(&snapshot).unwrap();
        json["rooms"][0]["floor"] = serde_json::json!(50_000_000);
        fs::write(&path, json.to_string()).unwrap();

        assert!(matches!(
            InMemoryRoomStore::load_from_file(&path),
            Err(StoreError::InvalidGeometry { floor: 50_000_000, .. })
        ));
    }
}
