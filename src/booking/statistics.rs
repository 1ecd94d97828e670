//! Occupancy statistics and the floor grid
//!
//! Statistics are computed from a room snapshot, so they never hold the store
//! lock. The grid renders the hotel top floor first, the way guests see the
//! building from outside.

use crate::hotel::Room;
use crate::types::RoomId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Availability on a single floor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorOccupancy {
    /// Floor number
    pub floor: u32,
    /// Rooms on this floor
    pub total_rooms: usize,
    /// Rooms on this floor still available
    pub available_rooms: usize,
}

impl FloorOccupancy {
    /// Rooms on this floor that are booked
    pub fn booked_rooms(&self) -> usize {
        self.total_rooms - self.available_rooms
    }
}

/// Occupancy summary for the whole hotel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OccupancyStatistics {
    /// When the snapshot was taken
    pub captured_at: DateTime<Utc>,
    /// Number of rooms
    pub total_rooms: usize,
    /// Number of booked rooms
    pub booked_rooms: usize,
    /// Number of available rooms
    pub available_rooms: usize,
    /// Per-floor breakdown, lowest floor first
    pub floors: Vec<FloorOccupancy>,
}

impl OccupancyStatistics {
    /// Compute statistics from a room snapshot
    pub fn from_rooms(rooms: &[Room]) -> Self {
        let mut floors: BTreeMap<u32, FloorOccupancy> = BTreeMap::new();
        for room in rooms {
            let entry = floors.entry(room.floor).or_insert_with(|| FloorOccupancy {
                floor: room.floor,
                total_rooms: 0,
                available_rooms: 0,
            });
            entry.total_rooms += 1;
            if room.is_available() {
                entry.available_rooms += 1;
            }
        }

        let available_rooms = rooms.iter().filter(|room| room.is_available()).count();
        Self {
            captured_at: Utc::now(),
            total_rooms: rooms.len(),
            booked_rooms: rooms.len() - available_rooms,
            available_rooms,
            floors: floors.into_values().collect(),
        }
    }

    /// Percentage of rooms booked
    pub fn occupancy_percentage(&self) -> f64 {
        if self.total_rooms == 0 {
            0.0
        } else {
            (self.booked_rooms as f64 / self.total_rooms as f64) * 100.0
        }
    }

    /// Floors that could take a request for `count` rooms on their own
    pub fn floors_fitting(&self, count: usize) -> Vec<u32> {
        self.floors
            .iter()
            .filter(|floor| floor.available_rooms >= count)
            .map(|floor| floor.floor)
            .collect()
    }

    /// One-line summary
    pub fn summary(&self) -> String {
        format!(
            "Occupancy: {} rooms | Booked: {} ({:.1}%) | Available: {}",
            self.total_rooms,
            self.booked_rooms,
            self.occupancy_percentage(),
            self.available_rooms
        )
    }
}

/// Render the hotel floor by floor, top floor first
///
/// Each room prints as its number followed by a marker: `.` available,
/// `#` booked, `*` booked by the latest request (listed in `fresh`).
pub fn render_floor_grid(rooms: &[Room], fresh: &HashSet<RoomId>) -> String {
    let mut floors: BTreeMap<u32, Vec<&Room>> = BTreeMap::new();
    for room in rooms {
        floors.entry(room.floor).or_default().push(room);
    }

    let mut grid = String::new();
    for (floor, mut floor_rooms) in floors.into_iter().rev() {
        floor_rooms.sort_by_key(|room| room.position);

        grid.push_str(&format!("Floor {:>2} |", floor));
        for room in floor_rooms {
            let marker = if fresh.contains(&room.id) {
                '*'
            } else if room.is_booked() {
                '#'
            } else {
                '.'
            };
            grid.push_str(&format!(" {:>4}{}", room.room_no, marker));
        }
        grid.push('\n');
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RoomStatus;

    fn sample_rooms() -> Vec<Room> {
        vec![
            Room::new(1, 1).unwrap().with_status(RoomStatus::Booked),
            Room::new(1, 2).unwrap(),
            Room::new(2, 1).unwrap(),
            Room::new(2, 2).unwrap(),
        ]
    }

    #[test]
    fn test_statistics_counts() {
        let stats = OccupancyStatistics::from_rooms(&sample_rooms());

        assert_eq!(stats.total_rooms, 4);
        assert_eq!(stats.booked_rooms, 1);
        assert_eq!(stats.available_rooms, 3);
        assert_eq!(stats.occupancy_percentage(), 25.0);
        assert_eq!(stats.floors.len(), 2);
        assert_eq!(stats.floors[0].booked_rooms(), 1);
        assert_eq!(stats.floors_fitting(2), vec![2]);
        assert!(stats.summary().contains("Booked: 1 (25.0%)"));
    }

    #[test]
    fn test_statistics_empty() {
        let stats = OccupancyStatistics::from_rooms(&[]);
        assert_eq!(stats.occupancy_percentage(), 0.0);
        assert!(stats.floors.is_empty());
    }

    #[test]
    fn test_grid_marks_rooms() {
        let rooms = sample_rooms();
        let fresh: HashSet<RoomId> = [rooms[3].id].into_iter().collect();
        let grid = render_floor_grid(&rooms, &fresh);

        let lines: Vec<&str> = grid.lines().collect();
        assert_eq!(lines, vec!["Floor  2 |  201.  202*", "Floor  1 |  101#  102."]);
    }

    #[test]
    fn test_grid_of_canonical_hotel() {
        let rooms = crate::hotel::HotelLayout::canonical().build_rooms().unwrap();
        let grid = render_floor_grid(&rooms, &HashSet::new());

        let lines: Vec<&str> = grid.lines().collect();
        assert_eq!(lines.len(), 10);
        assert!(lines[0].starts_with("Floor 10 | 1001."));
        assert!(lines[0].ends_with(" 1007."));
        assert!(lines[9].ends_with("  110."));
        assert!(render_floor_grid(&[], &HashSet::new()).is_empty());
    }
}
