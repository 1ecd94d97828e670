//! Error types and handling
//!
//! This module contains the booking error kinds and the service-level error
//! used by the command line front end.

use crate::hotel::StoreError;
use crate::types::{booking_limits, ConfigError, ConfigValidationError};
use thiserror::Error;

/// Reasons a booking request is refused
#[derive(Debug, Error)]
pub enum BookingError {
    /// Requested count outside the allowed range
    #[error(
        "Room count must be between {} and {}",
        booking_limits::MIN_ROOMS_PER_REQUEST,
        booking_limits::MAX_ROOMS_PER_REQUEST
    )]
    InvalidRequest {
        /// Count that was asked for
        requested: i64,
    },

    /// Not enough rooms left to satisfy the request
    #[error("Not enough rooms available. Only {available} rooms available.")]
    InsufficientAvailability {
        /// Count that was asked for
        requested: usize,
        /// Rooms available when the request was checked
        available: usize,
    },

    /// The room store failed while reading or writing
    #[error("Room store failure: {0}")]
    StoreFailure(#[from] StoreError),
}

impl BookingError {
    /// Short name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            BookingError::InvalidRequest { .. } => "InvalidRequest",
            BookingError::InsufficientAvailability { .. } => "InsufficientAvailability",
            BookingError::StoreFailure(_) => "StoreFailure",
        }
    }

    /// Check whether the request itself was at fault, as opposed to the store
    pub fn is_client_error(&self) -> bool {
        !matches!(self, BookingError::StoreFailure(_))
    }
}

/// Result type for booking operations
pub type BookingResult<T> = Result<T, BookingError>;

/// Errors that can stop a session run by the command line front end
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Configuration failed validation
    #[error("Configuration validation failed: {0}")]
    Validation(#[from] ConfigValidationError),

    /// Room store failed
    #[error("Room store error: {0}")]
    Store(#[from] StoreError),

    /// Reset or random occupancy could not be applied
    #[error("Booking error: {0}")]
    Booking(#[from] BookingError),

    /// Output could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ServiceError {
    /// Check if this is a recoverable error
    pub fn is_recoverable(&self) -> bool {
        match self {
            ServiceError::Config(_) => false,
            ServiceError::Validation(_) => false,
            ServiceError::Store(StoreError::Io(_)) => true,
            ServiceError::Store(_) => false,
            ServiceError::Booking(BookingError::StoreFailure(StoreError::Io(_))) => true,
            ServiceError::Booking(_) => false,
            ServiceError::Serialization(_) => true,
        }
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            ServiceError::Config(_) => "Configuration",
            ServiceError::Validation(_) => "Validation",
            ServiceError::Store(_) => "Store",
            ServiceError::Booking(_) => "Booking",
            ServiceError::Serialization(_) => "Serialization",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RoomId;

    #[test]
    fn test_invalid_request_message() {
        let error = BookingError::InvalidRequest { requested: 6 };
        assert_eq!(error.to_string(), "Room count must be between 1 and 5");
        assert_eq!(error.kind(), "InvalidRequest");
        assert!(error.is_client_error());
    }

    #[test]
    fn test_insufficient_availability_reports_count() {
        let error = BookingError::InsufficientAvailability { requested: 4, available: 2 };
        assert_eq!(error.to_string(), "Not enough rooms available. Only 2 rooms available.");
        assert!(error.is_client_error());
    }

    #[test]
    fn test_store_failure_wraps_store_error() {
        let error: BookingError = StoreError::RoomNotFound(RoomId::new()).into();
        assert_eq!(error.kind(), "StoreFailure");
        assert!(!error.is_client_error());
        assert!(error.to_string().starts_with("Room store failure: Room not found: ROOM_"));
    }

    #[test]
    fn test_service_error_categories() {
        let error: ServiceError = ConfigError::FileNotFound("x.json".to_string()).into();
        assert_eq!(error.category(), "Configuration");
        assert!(!error.is_recoverable());

        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk");
        let error: ServiceError = StoreError::Io(io).into();
        assert_eq!(error.category(), "Store");
        assert!(error.is_recoverable());
    }

    #[test]
    fn test_service_error_wraps_booking_failures() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk");
        let error: ServiceError = BookingError::StoreFailure(StoreError::Io(io)).into();
        assert_eq!(error.category(), "Booking");
        assert!(error.is_recoverable());

        let error: ServiceError =
            BookingError::StoreFailure(StoreError::RoomNotFound(RoomId::new())).into();
        assert!(!error.is_recoverable());
    }

    #[test]
    fn test_service_error_serialization_category() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: ServiceError = json_error.into();
        assert_eq!(error.category(), "Serialization");
        assert!(error.is_recoverable());
    }
}
