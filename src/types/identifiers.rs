//! Unique identifier types for the room allocator
//!
//! Rooms are identified by a UUID-backed [`RoomId`] that is assigned once when
//! the room is created and never reused, independent of the display room number.
//! The text form is `ROOM_` followed by the UUID in simple (unhyphenated) form;
//! parsing also accepts a bare UUID.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

const ROOM_ID_PREFIX: &str = "ROOM_";

/// Text that is not a room identifier
#[derive(Debug, Error)]
#[error("Invalid room id '{input}': {source}")]
pub struct ParseRoomIdError {
    input: String,
    #[source]
    source: uuid::Error,
}

/// Unique identifier for a hotel room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(pub Uuid);

impl RoomId {
    /// Assign a fresh identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RoomId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for RoomId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl FromStr for RoomId {
    type Err = ParseRoomIdError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let raw = input.strip_prefix(ROOM_ID_PREFIX).unwrap_or(input);
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|source| ParseRoomIdError { input: input.to_string(), source })
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(ROOM_ID_PREFIX)?;
        fmt::Display::fmt(&self.0.simple(), f)
    }
}

impl Serialize for RoomId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RoomId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_fresh_ids_differ() {
        let ids: BTreeSet<RoomId> = (0..50).map(|_| RoomId::new()).collect();
        assert_eq!(ids.len(), 50);
        assert_ne!(RoomId::default(), RoomId::default());
    }

    #[test]
    fn test_text_form() {
        let uuid = Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        let id = RoomId::from(uuid);

        assert_eq!(id.to_string(), "ROOM_67e5504410b1426f9247bb680e5fe0c8");
        assert_eq!(id.as_uuid(), &uuid);
    }

    #[test]
    fn test_parse_prefixed_and_bare() {
        let id = RoomId::new();

        assert_eq!(id.to_string().parse::<RoomId>().unwrap(), id);
        assert_eq!(id.0.to_string().parse::<RoomId>().unwrap(), id);
    }

    #[test]
    fn test_parse_error_names_the_input() {
        let error = "ROOM_not-a-uuid".parse::<RoomId>().unwrap_err();
        assert!(error.to_string().starts_with("Invalid room id 'ROOM_not-a-uuid'"));
    }

    #[test]
    fn test_json_form() {
        let id = RoomId::new();

        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
        assert_eq!(serde_json::from_str::<RoomId>(&json).unwrap(), id);

        let bare = format!("\"{}\"", id.0);
        assert_eq!(serde_json::from_str::<RoomId>(&bare).unwrap(), id);
        assert!(serde_json::from_str::<RoomId>("\"ROOM_xyz\"").is_err());
    }
}
