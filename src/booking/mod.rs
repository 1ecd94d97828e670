//! Room allocation and booking orchestration
//!
//! This module contains the allocator, the booking service that drives it,
//! the booking error kinds, occupancy statistics and logging setup.
//!
//! # Overview
//!
//! - **allocate**: pure same-floor-first, greedy-fallback room selection
//! - **BookingService**: validates requests and commits bookings atomically
//! - **BookingOutcome**: structured result for the outward-facing layer
//! - **OccupancyStatistics**: occupancy totals and per-floor availability
//! - **LoggingConfig**: tracing subscriber setup
//!
//! # Usage Example
//!
//! ```rust
//! use hotel_room_allocator::booking::*;
//! use hotel_room_allocator::hotel::*;
//!
//! let store = InMemoryRoomStore::new();
//! HotelLayout::canonical().seed_if_empty(&store).unwrap();
//!
//! let service = BookingService::with_seed(store, 42);
//! let outcome = service.book_rooms(3);
//! assert!(outcome.success);
//! assert_eq!(outcome.room_numbers(), vec![101, 102, 103]);
//!
//! let rejected = service.book_rooms(6);
//! assert!(!rejected.success);
//! ```

pub mod allocator;
pub mod error;
pub mod logging;
pub mod outcome;
pub mod service;
pub mod statistics;

// Re-export all public types for convenience
pub use allocator::{allocate, Allocation, AllocationStrategy};
pub use error::{BookingError, BookingResult, ServiceError};
pub use logging::{ConsoleFormat, LoggingConfig, LoggingError, LoggingGuard};
pub use outcome::{BookingOutcome, RoomListResponse};
pub use service::BookingService;
pub use statistics::{render_floor_grid, FloorOccupancy, OccupancyStatistics};
