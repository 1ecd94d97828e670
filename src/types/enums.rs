//! Enumeration types for the room allocator
//!
//! This module contains the room status and the output formats supported by
//! the command line front end.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Booking status of a single room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    /// Free to be allocated
    Available,
    /// Taken by a booking or by random occupancy
    Booked,
}

impl RoomStatus {
    /// Check whether the room can be allocated
    pub fn is_available(self) -> bool {
        self == RoomStatus::Available
    }
}

impl Default for RoomStatus {
    fn default() -> Self {
        RoomStatus::Available
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomStatus::Available => write!(f, "available"),
            RoomStatus::Booked => write!(f, "booked"),
        }
    }
}

impl FromStr for RoomStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "available" => Ok(RoomStatus::Available),
            "booked" => Ok(RoomStatus::Booked),
            _ => Err(format!("Unknown room status: {}", s)),
        }
    }
}

/// Output formats for booking outcomes and room listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Pretty-printed JSON documents
    Json,
    /// Human-readable text with a floor grid
    Text,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Text => write!(f, "Text"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" | "txt" => Ok(OutputFormat::Text),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_status_display() {
        assert_eq!(format!("{}", RoomStatus::Available), "available");
        assert_eq!(format!("{}", RoomStatus::Booked), "booked");
    }

    #[test]
    fn test_room_status_from_str() {
        assert_eq!("available".parse::<RoomStatus>().unwrap(), RoomStatus::Available);
        assert_eq!("BOOKED".parse::<RoomStatus>().unwrap(), RoomStatus::Booked);

        // There is no "held" or "maintenance" state
        assert!("held".parse::<RoomStatus>().is_err());
        assert!("maintenance".parse::<RoomStatus>().is_err());
    }

    #[test]
    fn test_room_status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&RoomStatus::Available).unwrap(), "\"available\"");
        assert_eq!(serde_json::to_string(&RoomStatus::Booked).unwrap(), "\"booked\"");

        let status: RoomStatus = serde_json::from_str("\"booked\"").unwrap();
        assert_eq!(status, RoomStatus::Booked);
    }

    #[test]
    fn test_room_status_default_is_available() {
        assert_eq!(RoomStatus::default(), RoomStatus::Available);
        assert!(RoomStatus::default().is_available());
        assert!(!RoomStatus::Booked.is_available());
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("TXT".parse::<OutputFormat>().unwrap(), OutputFormat::Text);

        assert!("csv".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(format!("{}", OutputFormat::Json), "JSON");
        assert_eq!(format!("{}", OutputFormat::Text), "Text");
    }
}
