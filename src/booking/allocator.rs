//! Room selection
//!
//! Given a snapshot of available rooms and a requested count, [`allocate`]
//! picks the rooms to book. It is a pure function: it never touches the store
//! and never mutates its input.
//!
//! Selection runs in two phases:
//!
//! 1. **Same floor**: floors are examined from the lowest floor number up. The
//!    first floor with at least `count` available rooms supplies the rooms
//!    nearest its lift.
//! 2. **Greedy**: if no floor can hold the whole request, every available room
//!    is ordered by `(floor, position)` and the first `count` are taken.
//!
//! The result may be shorter than `count` only when fewer than `count`
//! distinct rooms were supplied; callers treat that as a failed booking.

use crate::hotel::Room;
use crate::types::RoomId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use tracing::debug;

/// How an allocation was satisfied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "strategy")]
pub enum AllocationStrategy {
    /// The whole request fits on one floor
    SameFloor {
        /// Floor the rooms were taken from
        floor: u32,
    },
    /// Rooms nearest the lift across floors
    Greedy,
}

impl fmt::Display for AllocationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocationStrategy::SameFloor { floor } => write!(f, "same floor ({})", floor),
            AllocationStrategy::Greedy => write!(f, "greedy"),
        }
    }
}

/// Rooms chosen for a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    /// Chosen rooms, in selection order
    pub rooms: Vec<Room>,
    /// Phase that produced the rooms
    pub strategy: AllocationStrategy,
}

impl Allocation {
    /// Number of rooms chosen
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Check whether no rooms were chosen
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Check whether the allocation covers `count` rooms
    pub fn satisfies(&self, count: usize) -> bool {
        self.rooms.len() >= count
    }

    /// Sum of positions across the chosen rooms
    pub fn total_lift_distance(&self) -> u32 {
        self.rooms.iter().map(|room| room.position).sum()
    }

    /// Identifiers of the chosen rooms, in selection order
    pub fn room_ids(&self) -> Vec<RoomId> {
        self.rooms.iter().map(|room| room.id).collect()
    }

    /// Distinct floors touched by the allocation
    pub fn floors(&self) -> Vec<u32> {
        let mut floors: Vec<u32> = self.rooms.iter().map(|room| room.floor).collect();
        floors.sort_unstable();
        floors.dedup();
        floors
    }
}

/// Pick `count` rooms from `available`
pub fn allocate(available: &[Room], count: usize) -> Allocation {
    let candidates = distinct_rooms(available);

    if let Some((floor, rooms)) = same_floor(&candidates, count) {
        debug!(floor, count, "Allocated rooms on a single floor");
        return Allocation { rooms, strategy: AllocationStrategy::SameFloor { floor } };
    }

    let rooms = greedy(candidates, count);
    debug!(count, allocated = rooms.len(), "Allocated rooms greedily across floors");
    Allocation { rooms, strategy: AllocationStrategy::Greedy }
}

/// Drop repeated room ids, keeping the first occurrence
fn distinct_rooms(available: &[Room]) -> Vec<&Room> {
    let mut seen = HashSet::with_capacity(available.len());
    available.iter().filter(|room| seen.insert(room.id)).collect()
}

/// First floor, lowest number first, that can take the whole request
fn same_floor(candidates: &[&Room], count: usize) -> Option<(u32, Vec<Room>)> {
    let mut by_floor: BTreeMap<u32, Vec<&Room>> = BTreeMap::new();
    for &room in candidates {
        by_floor.entry(room.floor).or_default().push(room);
    }

    by_floor.into_iter().find(|(_, rooms)| rooms.len() >= count).map(|(floor, mut rooms)| {
        rooms.sort_by_key(|room| room.position);
        (floor, rooms.into_iter().take(count).cloned().collect())
    })
}

/// Rooms nearest the lift across all floors
fn greedy(mut candidates: Vec<&Room>, count: usize) -> Vec<Room> {
    candidates.sort_by_key(|room| room.lift_order_key());
    candidates.into_iter().take(count).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rooms_at(pairs: &[(u32, u32)]) -> Vec<Room> {
        pairs.iter().map(|&(floor, position)| Room::new(floor, position).unwrap()).collect()
    }

    fn numbers(allocation: &Allocation) -> Vec<u32> {
        allocation.rooms.iter().map(|r| r.room_no).collect()
    }

    #[test]
    fn test_same_floor_takes_closest_positions() {
        let available = rooms_at(&[(3, 7), (3, 2), (3, 9), (3, 1), (3, 5)]);
        let allocation = allocate(&available, 3);

        assert_eq!(allocation.strategy, AllocationStrategy::SameFloor { floor: 3 });
        assert_eq!(numbers(&allocation), vec![301, 302, 305]);
        assert_eq!(allocation.total_lift_distance(), 8);
    }

    #[test]
    fn test_same_floor_prefers_lowest_qualifying_floor() {
        // Input order lists floor 7 first; floor 4 still wins
        let available = rooms_at(&[(7, 1), (7, 2), (4, 6), (4, 8), (1, 1)]);
        let allocation = allocate(&available, 2);

        assert_eq!(allocation.strategy, AllocationStrategy::SameFloor { floor: 4 });
        assert_eq!(numbers(&allocation), vec![406, 408]);
    }

    #[test]
    fn test_same_floor_beats_closer_mixed_floors() {
        // Floor 1 and 2 each hold one room close to the lift, but floor 5 fits all
        let available = rooms_at(&[(1, 1), (2, 1), (5, 8), (5, 9), (5, 10)]);
        let allocation = allocate(&available, 3);

        assert_eq!(allocation.strategy, AllocationStrategy::SameFloor { floor: 5 });
        assert_eq!(allocation.floors(), vec![5]);
    }

    #[test]
    fn test_greedy_fallback_orders_by_floor_then_position() {
        let available = rooms_at(&[(2, 5), (1, 10), (3, 1), (2, 1), (1, 9), (2, 2)]);
        // No floor has 4 rooms
        let allocation = allocate(&available, 4);

        assert_eq!(allocation.strategy, AllocationStrategy::Greedy);
        assert_eq!(numbers(&allocation), vec![109, 110, 201, 202]);
    }

    #[test]
    fn test_empty_input_yields_empty_greedy_allocation() {
        let allocation = allocate(&[], 2);

        assert!(allocation.is_empty());
        assert_eq!(allocation.strategy, AllocationStrategy::Greedy);
        assert!(!allocation.satisfies(2));
    }

    #[test]
    fn test_short_input_returns_everything_available() {
        let available = rooms_at(&[(6, 3), (2, 4)]);
        let allocation = allocate(&available, 5);

        assert_eq!(numbers(&allocation), vec![204, 603]);
        assert!(!allocation.satisfies(5));
    }

    #[test]
    fn test_duplicate_input_rooms_counted_once() {
        let room = Room::new(1, 1).unwrap();
        let available = vec![room.clone(), room.clone(), room];
        let allocation = allocate(&available, 2);

        assert_eq!(allocation.len(), 1);
        assert!(!allocation.satisfies(2));
    }

    #[test]
    fn test_allocation_never_invents_rooms() {
        let available = rooms_at(&[(1, 3), (2, 3), (3, 3), (4, 3), (5, 3)]);
        let allocation = allocate(&available, 4);

        let input_ids: HashSet<RoomId> = available.iter().map(|r| r.id).collect();
        let output_ids: HashSet<RoomId> = allocation.room_ids().into_iter().collect();

        assert_eq!(output_ids.len(), allocation.len());
        assert!(output_ids.is_subset(&input_ids));
    }

    #[test]
    fn test_strategy_serialization() {
        let json = serde_json::to_string(&AllocationStrategy::SameFloor { floor: 2 }).unwrap();
        assert_eq!(json, r#"{"strategy":"sameFloor","floor":2}"#);

        let json = serde_json::to_string(&AllocationStrategy::Greedy).unwrap();
        assert_eq!(json, r#"{"strategy":"greedy"}"#);
    }
}
