//! Booking service
//!
//! This module contains the BookingService, which validates requests, takes a
//! snapshot of available rooms, runs the allocator and commits the chosen
//! rooms. Each operation is one store transaction, so two concurrent requests
//! can never book the same room.

use crate::booking::allocator::{allocate, Allocation};
use crate::booking::error::{BookingError, BookingResult};
use crate::booking::outcome::{BookingOutcome, RoomListResponse};
use crate::hotel::{Room, RoomStore};
use crate::types::{booking_limits, HotelConfig, RoomStatus};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, instrument, warn};

/// Orchestrates booking requests against a room store
#[derive(Debug)]
pub struct BookingService<S> {
    /// Room storage
    store: S,
    /// Probability that random occupancy books a room
    occupancy_rate: f64,
    /// Random number generator for random occupancy
    rng: Mutex<StdRng>,
}

impl<S: RoomStore> BookingService<S> {
    /// Create a service with an entropy-seeded random generator
    pub fn new(store: S) -> Self {
        Self {
            store,
            occupancy_rate: booking_limits::DEFAULT_OCCUPANCY_RATE,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Create a service whose random occupancy is reproducible
    pub fn with_seed(store: S, seed: u64) -> Self {
        Self { rng: Mutex::new(StdRng::seed_from_u64(seed)), ..Self::new(store) }
    }

    /// Create a service from session configuration
    pub fn from_config(store: S, config: &HotelConfig) -> Self {
        let service = match config.seed {
            Some(seed) => {
                info!("Using deterministic seed: {}", seed);
                Self::with_seed(store, seed)
            }
            None => {
                debug!("Using entropy-based random seed");
                Self::new(store)
            }
        };
        service.with_occupancy_rate(config.occupancy_rate)
    }

    /// Set the probability that random occupancy books a room
    pub fn with_occupancy_rate(mut self, rate: f64) -> Self {
        self.occupancy_rate = rate;
        self
    }

    /// Probability that random occupancy books a room
    pub fn occupancy_rate(&self) -> f64 {
        self.occupancy_rate
    }

    /// The underlying room store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Book `count` rooms
    ///
    /// On success every returned room is already marked booked in the store.
    /// On failure no room status changes.
    #[instrument(skip(self))]
    pub fn book(&self, count: i64) -> BookingResult<Allocation> {
        let requested = validate_count(count)?;

        let allocation = self.store.transaction(|table| {
            let available = table.list_available();
            if available.len() < requested {
                return Err(BookingError::InsufficientAvailability {
                    requested,
                    available: available.len(),
                });
            }

            let mut allocation = allocate(&available, requested);
            if !allocation.satisfies(requested) {
                warn!(
                    requested,
                    allocated = allocation.len(),
                    "Allocator returned fewer rooms than requested"
                );
                return Err(BookingError::InsufficientAvailability {
                    requested,
                    available: available.len(),
                });
            }

            for room in &mut allocation.rooms {
                *room = table.set_status(room.id, RoomStatus::Booked)?;
            }
            Ok(allocation)
        })?;

        info!(
            requested,
            strategy = %allocation.strategy,
            lift_distance = allocation.total_lift_distance(),
            "Booked rooms {:?}",
            allocation.rooms.iter().map(|room| room.room_no).collect::<Vec<_>>()
        );
        Ok(allocation)
    }

    /// Book `count` rooms, reporting every failure as an unsuccessful outcome
    pub fn book_rooms(&self, count: i64) -> BookingOutcome {
        match self.book(count) {
            Ok(allocation) => BookingOutcome::booked(allocation.rooms, allocation.strategy),
            Err(error) => {
                if error.is_client_error() {
                    info!(count, kind = error.kind(), "Booking rejected: {}", error);
                } else {
                    warn!(count, kind = error.kind(), "Booking failed: {}", error);
                }
                BookingOutcome::from(&error)
            }
        }
    }

    /// Overwrite every room's status at random
    ///
    /// Each room is independently booked with probability
    /// [`BookingService::occupancy_rate`] and made available otherwise.
    /// Returns the number of rooms now booked.
    #[instrument(skip(self), fields(rate = self.occupancy_rate))]
    pub fn random_occupy(&self) -> BookingResult<usize> {
        let rate = self.occupancy_rate;
        let booked = self.store.transaction(|table| {
            let mut rng = self.rng.lock();
            let mut booked = 0;
            table.overwrite_statuses(|_| {
                if rng.gen::<f64>() < rate {
                    booked += 1;
                    RoomStatus::Booked
                } else {
                    RoomStatus::Available
                }
            });
            Ok::<_, BookingError>(booked)
        })?;

        info!("Random occupancy booked {} rooms", booked);
        Ok(booked)
    }

    /// Alias of [`BookingService::random_occupy`] for the outward interface
    pub fn random_booking(&self) -> BookingResult<usize> {
        self.random_occupy()
    }

    /// Make every room available. Returns the number of rooms reset.
    #[instrument(skip(self))]
    pub fn reset_all(&self) -> BookingResult<usize> {
        let total = self.store.transaction(|table| {
            table.overwrite_statuses(|_| RoomStatus::Available);
            Ok::<_, BookingError>(table.len())
        })?;

        info!("Reset {} rooms to available", total);
        Ok(total)
    }

    /// Every room, ordered by room number
    pub fn get_all_rooms(&self) -> BookingResult<Vec<Room>> {
        let mut rooms = self.store.list_all()?;
        rooms.sort_by_key(|room| room.room_no);
        Ok(rooms)
    }

    /// Every room wrapped for the outward-facing layer
    pub fn room_list(&self) -> RoomListResponse {
        match self.get_all_rooms() {
            Ok(rooms) => RoomListResponse { success: true, rooms },
            Err(error) => {
                warn!("Failed to list rooms: {}", error);
                RoomListResponse { success: false, rooms: Vec::new() }
            }
        }
    }
}

/// Check a requested count against the allowed range
fn validate_count(count: i64) -> BookingResult<usize> {
    let allowed =
        booking_limits::MIN_ROOMS_PER_REQUEST..=booking_limits::MAX_ROOMS_PER_REQUEST;
    if !allowed.contains(&count) {
        return Err(BookingError::InvalidRequest { requested: count });
    }
    Ok(count as usize)
}
