//! Rooms and the allow-list of rooms that may be booked.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Store-assigned room identifier.
///
/// # Examples
///
/// ```
/// use roombook::RoomId;
///
/// let id: RoomId = "3".parse().unwrap();
/// assert_eq!(id.value(), 3);
/// assert!("0".parse::<RoomId>().is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RoomId(i64);

impl RoomId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// The raw identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RoomId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<i64>() {
            Ok(value) if value > 0 => Ok(Self(value)),
            _ => Err(ValidationError::new(
                "room_id",
                format!("'{s}' is not a positive room identifier"),
            )),
        }
    }
}

/// A room as read from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Room {
    /// Store-assigned identifier.
    pub id: RoomId,
    /// Unique human-readable name.
    pub name: String,
    /// Category label such as "meeting" or "lab".
    pub category: String,
    /// Seating capacity, when known.
    pub capacity: Option<u32>,
    /// Whether the room may be reserved for an entire day.
    pub full_day_allowed: bool,
}

/// A room definition waiting to be stored.
///
/// Also the shape of entries in a batch room file.
///
/// # Examples
///
/// ```
/// use roombook::NewRoom;
///
/// let room = NewRoom::new("Aurora", "meeting")
///     .with_capacity(Some(8))
///     .with_full_day_allowed(true);
/// assert!(room.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewRoom {
    /// Unique human-readable name.
    pub name: String,
    /// Category label.
    #[serde(alias = "type")]
    pub category: String,
    /// Seating capacity, when known.
    #[serde(default)]
    pub capacity: Option<u32>,
    /// Whether the room may be reserved for an entire day.
    #[serde(default)]
    pub full_day_allowed: bool,
}

impl NewRoom {
    /// Creates a room definition with no capacity that disallows full-day bookings.
    #[must_use]
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            capacity: None,
            full_day_allowed: false,
        }
    }

    /// Sets the capacity.
    #[must_use]
    pub fn with_capacity(mut self, capacity: Option<u32>) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets whether full-day bookings are allowed.
    #[must_use]
    pub fn with_full_day_allowed(mut self, allowed: bool) -> Self {
        self.full_day_allowed = allowed;
        self
    }

    /// Checks the definition and returns a trimmed copy.
    ///
    /// # Errors
    ///
    /// Returns an error if the name or category is blank or the capacity is zero.
    pub fn validate(&self) -> Result<Self, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::new(
                "name",
                "must be non-empty after trimming whitespace",
            ));
        }
        let category = self.category.trim();
        if category.is_empty() {
            return Err(ValidationError::new(
                "category",
                "must be non-empty after trimming whitespace",
            ));
        }
        if self.capacity == Some(0) {
            return Err(ValidationError::new("capacity", "must be greater than 0"));
        }

        Ok(Self {
            name: name.to_string(),
            category: category.to_string(),
            capacity: self.capacity,
            full_day_allowed: self.full_day_allowed,
        })
    }
}

/// The fixed set of room identifiers that are eligible for booking.
///
/// Rooms outside this set are never booked, whatever the store contains.
///
/// # Examples
///
/// ```
/// use roombook::{KnownRooms, RoomId};
///
/// let known = KnownRooms::new([RoomId::new(2), RoomId::new(1)]);
/// assert!(known.contains(RoomId::new(1)));
/// assert!(!known.contains(RoomId::new(5)));
/// assert_eq!(known.iter().next(), Some(RoomId::new(1)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownRooms(BTreeSet<RoomId>);

impl KnownRooms {
    /// Builds the allow-list from any collection of identifiers.
    pub fn new(ids: impl IntoIterator<Item = RoomId>) -> Self {
        Self(ids.into_iter().collect())
    }

    /// Returns true if `id` is on the allow-list.
    #[must_use]
    pub fn contains(&self, id: RoomId) -> bool {
        self.0.contains(&id)
    }

    /// Iterates identifiers in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = RoomId> + '_ {
        self.0.iter().copied()
    }

    /// The identifiers as an ordered set.
    #[must_use]
    pub fn ids(&self) -> &BTreeSet<RoomId> {
        &self.0
    }

    /// Number of known rooms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no room is bookable.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<RoomId> for KnownRooms {
    fn from_iter<I: IntoIterator<Item = RoomId>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_id_parse() {
        assert_eq!(" 12 ".parse::<RoomId>().unwrap(), RoomId::new(12));
        assert!("-1".parse::<RoomId>().is_err());
        assert!("abc".parse::<RoomId>().is_err());
    }

    #[test]
    fn test_new_room_validate_trims() {
        let room = NewRoom::new("  Aurora ", " meeting ").validate().unwrap();
        assert_eq!(room.name, "Aurora");
        assert_eq!(room.category, "meeting");
    }

    #[test]
    fn test_new_room_validate_rejects() {
        assert_eq!(NewRoom::new("", "x").validate().unwrap_err().field, "name");
        assert_eq!(
            NewRoom::new("A", " ").validate().unwrap_err().field,
            "category"
        );
        assert_eq!(
            NewRoom::new("A", "x")
                .with_capacity(Some(0))
                .validate()
                .unwrap_err()
                .field,
            "capacity"
        );
    }

    #[test]
    fn test_new_room_deserializes_type_alias() {
        let room: NewRoom =
            serde_yaml::from_str("name: Lab\ntype: lab\ncapacity: 4\nfull_day_allowed: true\n")
                .unwrap();
        assert_eq!(room.category, "lab");
        assert_eq!(room.capacity, Some(4));
        assert!(room.full_day_allowed);
    }

    #[test]
    fn test_known_rooms_deduplicates_and_orders() {
        let known: KnownRooms = [3, 1, 3, 2].into_iter().map(RoomId::new).collect();
        assert_eq!(known.len(), 3);
        assert_eq!(
            known.iter().collect::<Vec<_>>(),
            vec![RoomId::new(1), RoomId::new(2), RoomId::new(3)]
        );
        assert!(KnownRooms::default().is_empty());
    }
}
