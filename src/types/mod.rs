//! Core types and identifiers for the room allocator
//!
//! This module contains fundamental types, identifiers, and configuration structures
//! used throughout the allocator.
//!
//! # Overview
//!
//! - **Identifiers**: UUID-based unique identifiers for rooms
//! - **Enums**: Room status and output formats
//! - **Configuration**: Session configuration with validation and CLI support
//!
//! # Usage Example
//!
//! ```rust
//! use hotel_room_allocator::types::*;
//!
//! let room_id = RoomId::new();
//! assert!(room_id.to_string().starts_with("ROOM_"));
//!
//! let status: RoomStatus = "booked".parse().unwrap();
//! assert!(!status.is_available());
//!
//! let config = HotelConfig { bookings: vec![3], ..Default::default() };
//! assert!(config.validate().is_ok());
//! ```

pub mod config;
pub mod enums;
pub mod identifiers;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;
pub use identifiers::*;
