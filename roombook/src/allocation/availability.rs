//! Availability finder: which candidate rooms are free for a window.

use std::collections::BTreeSet;

use rusqlite::Connection;

use crate::database::Database;
use crate::error::Result;
use crate::interval::Interval;
use crate::room::RoomId;

/// Returns the rooms in `candidates` with no booking overlapping `window`.
///
/// Bookings that merely touch the window (ending exactly at its start or
/// starting exactly at its end) do not make a room busy. An empty result is
/// a normal outcome, not an error.
///
/// # Errors
///
/// Returns an error if the store query fails.
///
/// # Examples
///
/// ```no_run
/// use std::collections::BTreeSet;
/// use chrono::NaiveDate;
/// use roombook::allocation::find_available_rooms;
/// use roombook::database::{Database, DatabaseConfig};
/// use roombook::{Interval, RoomId};
///
/// let db = Database::open(DatabaseConfig::new("/tmp/roombook.db")).unwrap();
/// let day = NaiveDate::from_ymd_opt(2030, 6, 3).unwrap();
/// let window = Interval::new(
///     day.and_hms_opt(9, 0, 0).unwrap(),
///     day.and_hms_opt(10, 0, 0).unwrap(),
/// )
/// .unwrap();
/// let candidates: BTreeSet<RoomId> = [RoomId::new(1), RoomId::new(2)].into_iter().collect();
///
/// let free = find_available_rooms(db.connection(), &window, &candidates).unwrap();
/// ```
pub fn find_available_rooms(
    conn: &Connection,
    window: &Interval,
    candidates: &BTreeSet<RoomId>,
) -> Result<BTreeSet<RoomId>> {
    let booked = Database::find_booked_rooms(conn, candidates, window)?;
    Ok(candidates.difference(&booked).copied().collect())
}
