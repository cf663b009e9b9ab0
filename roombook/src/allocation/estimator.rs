//! Next-availability estimator.
//!
//! Answers "when does some room free up?" for a refused request. Among the
//! bookings ending after a reference time it takes each room's earliest end,
//! then the smallest of those, breaking ties on the lowest room id.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDateTime;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::database::Database;
use crate::error::Result;
use crate::interval::TIMESTAMP_FORMAT;
use crate::room::RoomId;

/// Which bookings the estimator looks at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimatorScope {
    /// Every booking in the store, eligible room or not.
    #[default]
    AllRooms,
    /// Only bookings on the caller's eligible rooms.
    EligibleOnly,
}

impl EstimatorScope {
    /// Scope selected by the `estimator.respect_eligibility` setting.
    #[must_use]
    pub const fn from_respect_eligibility(respect: bool) -> Self {
        if respect {
            Self::EligibleOnly
        } else {
            Self::AllRooms
        }
    }
}

/// The room that frees up soonest and when.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use roombook::allocation::NextAvailability;
/// use roombook::RoomId;
///
/// let next = NextAvailability {
///     room_id: RoomId::new(3),
///     free_at: NaiveDate::from_ymd_opt(2030, 6, 3).unwrap().and_hms_opt(11, 0, 0).unwrap(),
/// };
/// assert_eq!(next.to_string(), "room 3 frees at 2030-06-03 11:00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NextAvailability {
    /// Room that frees up first.
    pub room_id: RoomId,
    /// End of that room's earliest booking after the reference time.
    pub free_at: NaiveDateTime,
}

impl fmt::Display for NextAvailability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "room {} frees at {}",
            self.room_id,
            self.free_at.format(TIMESTAMP_FORMAT)
        )
    }
}

/// Finds the room whose earliest booking ending after `after` ends first.
///
/// Returns `None` when no booking in scope ends strictly after `after`.
/// With [`EstimatorScope::EligibleOnly`], rooms outside `eligible` are
/// ignored; with [`EstimatorScope::AllRooms`], `eligible` is unused.
///
/// # Errors
///
/// Returns an error if the store query fails.
pub fn next_available(
    conn: &Connection,
    after: NaiveDateTime,
    scope: EstimatorScope,
    eligible: &BTreeSet<RoomId>,
) -> Result<Option<NextAvailability>> {
    let next = Database::min_end_by_room(conn, after)?
        .into_iter()
        .find(|(room_id, _)| match scope {
            EstimatorScope::AllRooms => true,
            EstimatorScope::EligibleOnly => eligible.contains(room_id),
        })
        .map(|(room_id, free_at)| NextAvailability { room_id, free_at });

    if let Some(next) = &next {
        log::debug!("next availability after {after}: {next}");
    }
    Ok(next)
}
