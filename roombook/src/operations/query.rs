//! Read-only availability queries.

use std::collections::BTreeSet;

use chrono::NaiveDateTime;

use crate::allocation::{find_available_rooms, next_available as estimate_next, EstimatorScope, NextAvailability};
use crate::booking::Booking;
use crate::database::Database;
use crate::error::Result;
use crate::interval::Interval;
use crate::room::{KnownRooms, RoomId};

/// Known rooms that exist in the store and are free for `[start, end)`.
///
/// # Errors
///
/// Returns a validation error if `start >= end`, or a database error.
///
/// # Examples
///
/// ```no_run
/// use chrono::NaiveDate;
/// use roombook::database::{Database, DatabaseConfig};
/// use roombook::operations::available_rooms;
/// use roombook::{KnownRooms, RoomId};
///
/// let db = Database::open(DatabaseConfig::new("/tmp/roombook.db")).unwrap();
/// let known = KnownRooms::new([RoomId::new(1), RoomId::new(2)]);
/// let day = NaiveDate::from_ymd_opt(2030, 6, 3).unwrap();
///
/// let free = available_rooms(
///     &db,
///     &known,
///     day.and_hms_opt(9, 0, 0).unwrap(),
///     day.and_hms_opt(10, 0, 0).unwrap(),
/// )
/// .unwrap();
/// ```
pub fn available_rooms(
    db: &Database,
    known: &KnownRooms,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Result<BTreeSet<RoomId>> {
    let window = Interval::new(start, end)?;
    let stored = stored_known_rooms(db, known)?;
    find_available_rooms(db.connection(), &window, &stored)
}

/// The room that frees up soonest after `after`.
///
/// `known` limits the search only under [`EstimatorScope::EligibleOnly`].
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn next_available(
    db: &Database,
    known: &KnownRooms,
    after: NaiveDateTime,
    scope: EstimatorScope,
) -> Result<Option<NextAvailability>> {
    estimate_next(db.connection(), after, scope, known.ids())
}

/// Lists all bookings ordered by start, then identifier.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_bookings(db: &Database) -> Result<Vec<Booking>> {
    Database::list_bookings(db.connection())
}

fn stored_known_rooms(db: &Database, known: &KnownRooms) -> Result<BTreeSet<RoomId>> {
    Ok(Database::list_rooms_by_ids(db.connection(), known.ids())?
        .into_iter()
        .map(|room| room.id)
        .collect())
}
