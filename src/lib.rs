//! Hotel Room Allocator
//!
//! Allocates hotel rooms to booking requests, choosing rooms that keep guests
//! close to the lift.
//!
//! # Overview
//!
//! A request asks for 1 to 5 rooms. The allocator first tries to place the
//! whole request on one floor, taking the rooms nearest that floor's lift. If
//! no floor has enough free rooms it falls back to the rooms nearest the lift
//! across the whole building, ordered by floor and then by position.
//!
//! ## Key Features
//!
//! - **Pure allocation**: selection works on a snapshot and never mutates state
//! - **Atomic bookings**: each request is one store transaction, so concurrent
//!   requests never share a room
//! - **Seeded occupancy**: random occupancy for demos and tests, reproducible
//!   with a seed
//! - **Configurable sessions**: CLI and JSON configuration for scripted runs
//!
//! ## Quick Start
//!
//! ```rust
//! use hotel_room_allocator::*;
//!
//! let store = InMemoryRoomStore::new();
//! HotelLayout::canonical().seed_if_empty(&store)?;
//!
//! let service = BookingService::new(store);
//! let allocation = service.book(5)?;
//! assert_eq!(allocation.strategy, AllocationStrategy::SameFloor { floor: 1 });
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: Identifiers, room status and configuration
//! - [`hotel`]: Rooms, the floor layout and room storage
//! - [`booking`]: Allocation, the booking service, statistics and logging
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Types     │    │   Hotel     │    │  Booking    │
//! │             │    │             │    │             │
//! │ RoomId      │◄───┤ Room        │◄───┤ Allocator   │
//! │ RoomStatus  │    │ Layout      │    │ Service     │
//! │ Config      │    │ RoomStore   │    │ Statistics  │
//! └─────────────┘    └─────────────┘    └─────────────┘
//! ```
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

pub mod booking;
pub mod hotel;
pub mod types;

// Core types and identifiers
pub use types::{
    ConfigError, ConfigValidationError, HotelConfig, OutputFormat, RoomId, RoomStatus,
};

// Rooms and storage
pub use hotel::{HotelLayout, InMemoryRoomStore, Room, RoomStore, RoomTable, StoreError};

// Allocation and booking
pub use booking::{
    allocate, Allocation, AllocationStrategy, BookingError, BookingOutcome, BookingService,
    OccupancyStatistics, RoomListResponse, ServiceError,
};
