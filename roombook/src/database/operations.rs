//! Entity store queries for users, rooms, and bookings.
//!
//! Every query is an associated function taking a `&Connection` so it runs
//! equally on a plain connection or inside a transaction (a
//! `rusqlite::Transaction` derefs to `Connection`).

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDateTime, SubsecRound};
use rusqlite::types::Type;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

use crate::booking::{Booking, BookingId, NewBooking};
use crate::error::Result;
use crate::interval::{Interval, SUBSEC_DIGITS};
use crate::room::{NewRoom, Room, RoomId};
use crate::user::{email_key, NewUser, User, UserId};

use super::connection::Database;
use super::schema::{INSERT_ROOM, SELECT_ROOM_BY_NAME};

const INSERT_USER: &str = r"
    INSERT INTO users (name, email, email_key, credential, created_at)
    VALUES (?1, ?2, ?3, ?4, ?5)
";

const SELECT_USER_BY_ID: &str = r"
    SELECT id, name, email, created_at FROM users WHERE id = ?1
";

const SELECT_USER_BY_EMAIL: &str = r"
    SELECT id, name, email, created_at FROM users WHERE email_key = ?1
";

const LIST_USERS: &str = r"
    SELECT id, name, email, created_at FROM users ORDER BY id
";

const LIST_ROOMS: &str = r"
    SELECT id, name, category, capacity, full_day_allowed FROM rooms ORDER BY id
";

const SELECT_BOOKING_COLUMNS: &str = r"
    SELECT id, user_id, room_id, start_at, end_at, full_day, created_at FROM bookings
";

const INSERT_BOOKING: &str = r"
    INSERT INTO bookings (user_id, room_id, start_at, end_at, full_day, created_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
";

const SELECT_MIN_END_BY_ROOM: &str = r"
    SELECT room_id, MIN(end_at) AS min_end
    FROM bookings
    WHERE end_at > ?1
    GROUP BY room_id
    ORDER BY min_end, room_id
";

/// Encodes a local timestamp as integer milliseconds for storage.
pub(crate) fn to_millis(ts: NaiveDateTime) -> i64 {
    ts.and_utc().timestamp_millis()
}

/// Decodes a stored millisecond timestamp from column `idx`.
pub(crate) fn from_millis(idx: usize, millis: i64) -> rusqlite::Result<NaiveDateTime> {
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.naive_utc())
        .ok_or(rusqlite::Error::IntegralValueOutOfRange(idx, millis))
}

/// Room identifiers bound per `IN (...)` query, well below SQLite's
/// host-parameter limit.
const IDS_PER_QUERY: usize = 500;

fn id_chunks(ids: &BTreeSet<RoomId>) -> Vec<Vec<i64>> {
    let values: Vec<i64> = ids.iter().map(|id| id.value()).collect();
    values.chunks(IDS_PER_QUERY).map(<[i64]>::to_vec).collect()
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

/// Expects columns: id, name, email, `created_at`.
fn row_to_user(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: UserId::new(row.get(0)?),
        name: row.get(1)?,
        email: row.get(2)?,
        created_at: from_millis(3, row.get(3)?)?,
    })
}

/// Expects columns: id, name, category, capacity, `full_day_allowed`.
pub(super) fn row_to_room(row: &Row<'_>) -> rusqlite::Result<Room> {
    let capacity = row
        .get::<_, Option<i64>>(3)?
        .map(|value| u32::try_from(value).map_err(|_| rusqlite::Error::IntegralValueOutOfRange(3, value)))
        .transpose()?;

    Ok(Room {
        id: RoomId::new(row.get(0)?),
        name: row.get(1)?,
        category: row.get(2)?,
        capacity,
        full_day_allowed: row.get(4)?,
    })
}

/// Expects columns: id, `user_id`, `room_id`, `start_at`, `end_at`, `full_day`, `created_at`.
fn row_to_booking(row: &Row<'_>) -> rusqlite::Result<Booking> {
    let start = from_millis(3, row.get(3)?)?;
    let end = from_millis(4, row.get(4)?)?;
    let interval = Interval::new(start, end)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Integer, Box::new(e)))?;

    Ok(Booking {
        id: BookingId::new(row.get(0)?),
        user_id: UserId::new(row.get(1)?),
        room_id: RoomId::new(row.get(2)?),
        interval,
        full_day: row.get(5)?,
        created_at: from_millis(6, row.get(6)?)?,
    })
}

impl Database {
    /// Inserts a validated user.
    ///
    /// Callers check for duplicate emails first; the unique `email_key`
    /// column is the backstop.
    ///
    /// # Errors
    ///
    /// Returns a database error, including a constraint violation for a
    /// duplicate email.
    pub fn insert_user(
        conn: &Connection,
        user: &NewUser,
        created_at: NaiveDateTime,
    ) -> Result<User> {
        conn.execute(
            INSERT_USER,
            params![
                user.name(),
                user.email(),
                user.email_key(),
                user.credential().as_str(),
                to_millis(created_at)
            ],
        )?;

        Ok(User {
            id: UserId::new(conn.last_insert_rowid()),
            name: user.name().to_string(),
            email: user.email().to_string(),
            created_at: created_at.trunc_subsecs(SUBSEC_DIGITS),
        })
    }

    /// Looks up a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use roombook::database::{Database, DatabaseConfig};
    /// use roombook::UserId;
    ///
    /// let db = Database::open(DatabaseConfig::new("/tmp/roombook.db")).unwrap();
    /// let user = Database::find_user_by_id(db.connection(), UserId::new(1)).unwrap();
    /// ```
    pub fn find_user_by_id(conn: &Connection, id: UserId) -> Result<Option<User>> {
        Ok(conn
            .query_row(SELECT_USER_BY_ID, [id.value()], row_to_user)
            .optional()?)
    }

    /// Looks up a user by email, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_user_by_email(conn: &Connection, email: &str) -> Result<Option<User>> {
        Ok(conn
            .query_row(SELECT_USER_BY_EMAIL, [email_key(email)], row_to_user)
            .optional()?)
    }

    /// Lists all users in registration order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_users(conn: &Connection) -> Result<Vec<User>> {
        let mut stmt = conn.prepare(LIST_USERS)?;
        let users = stmt
            .query_map([], row_to_user)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(users)
    }

    /// Inserts a room that has already passed [`NewRoom::validate`].
    ///
    /// # Errors
    ///
    /// Returns a database error, including a constraint violation for a
    /// duplicate name.
    pub fn insert_room(conn: &Connection, room: &NewRoom) -> Result<Room> {
        conn.execute(
            INSERT_ROOM,
            params![
                room.name,
                room.category,
                room.capacity,
                room.full_day_allowed
            ],
        )?;

        Ok(Room {
            id: RoomId::new(conn.last_insert_rowid()),
            name: room.name.clone(),
            category: room.category.clone(),
            capacity: room.capacity,
            full_day_allowed: room.full_day_allowed,
        })
    }

    /// Looks up a room by its exact name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_room_by_name(conn: &Connection, name: &str) -> Result<Option<Room>> {
        Ok(conn
            .query_row(SELECT_ROOM_BY_NAME, [name], row_to_room)
            .optional()?)
    }

    /// Lists every room ordered by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_rooms(conn: &Connection) -> Result<Vec<Room>> {
        let mut stmt = conn.prepare(LIST_ROOMS)?;
        let rooms = stmt
            .query_map([], row_to_room)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(rooms)
    }

    /// Loads the rooms whose identifiers are in `ids`, ordered by identifier.
    ///
    /// Identifiers with no stored room are silently absent from the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_rooms_by_ids(conn: &Connection, ids: &BTreeSet<RoomId>) -> Result<Vec<Room>> {
        let mut rooms = Vec::new();
        // Chunks come from an ordered set, so concatenating them keeps id order.
        for chunk in id_chunks(ids) {
            let sql = format!(
                "SELECT id, name, category, capacity, full_day_allowed FROM rooms \
                 WHERE id IN ({}) ORDER BY id",
                placeholders(chunk.len())
            );
            let mut stmt = conn.prepare(&sql)?;
            for room in stmt.query_map(params_from_iter(chunk), row_to_room)? {
                rooms.push(room?);
            }
        }
        Ok(rooms)
    }

    /// Bookings on `room_id` that overlap `window`, earliest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_overlapping_bookings(
        conn: &Connection,
        room_id: RoomId,
        window: &Interval,
    ) -> Result<Vec<Booking>> {
        let sql = format!(
            "{SELECT_BOOKING_COLUMNS} WHERE room_id = ?1 AND start_at < ?2 AND ?3 < end_at \
             ORDER BY start_at, id"
        );
        let mut stmt = conn.prepare(&sql)?;
        let bookings = stmt
            .query_map(
                params![
                    room_id.value(),
                    to_millis(window.end()),
                    to_millis(window.start())
                ],
                row_to_booking,
            )?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(bookings)
    }

    /// Identifiers from `ids` that have at least one booking overlapping `window`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_booked_rooms(
        conn: &Connection,
        ids: &BTreeSet<RoomId>,
        window: &Interval,
    ) -> Result<BTreeSet<RoomId>> {
        let mut booked = BTreeSet::new();
        for chunk in id_chunks(ids) {
            let sql = format!(
                "SELECT DISTINCT room_id FROM bookings \
                 WHERE start_at < ? AND ? < end_at AND room_id IN ({})",
                placeholders(chunk.len())
            );
            let values: Vec<i64> = [to_millis(window.end()), to_millis(window.start())]
                .into_iter()
                .chain(chunk)
                .collect();

            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params_from_iter(values), |row| Ok(RoomId::new(row.get(0)?)))?;
            for room_id in rows {
                booked.insert(room_id?);
            }
        }
        Ok(booked)
    }

    /// For every room with a booking ending strictly after `after`, the
    /// earliest such end.
    ///
    /// Ordered by that end, then by room identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn min_end_by_room(
        conn: &Connection,
        after: NaiveDateTime,
    ) -> Result<Vec<(RoomId, NaiveDateTime)>> {
        let mut stmt = conn.prepare(SELECT_MIN_END_BY_ROOM)?;
        let rows = stmt
            .query_map([to_millis(after)], |row| {
                Ok((RoomId::new(row.get(0)?), from_millis(1, row.get(1)?)?))
            })?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(rows)
    }

    /// Inserts a booking and returns it with its assigned identifier.
    ///
    /// The store rejects the insert if it overlaps an existing booking on
    /// the same room.
    ///
    /// # Errors
    ///
    /// Returns a database error, including a trigger abort on overlap or a
    /// foreign-key violation for an unknown user or room.
    pub fn insert_booking(conn: &Connection, booking: &NewBooking) -> Result<Booking> {
        conn.execute(
            INSERT_BOOKING,
            params![
                booking.user_id.value(),
                booking.room_id.value(),
                to_millis(booking.interval.start()),
                to_millis(booking.interval.end()),
                booking.full_day,
                to_millis(booking.created_at)
            ],
        )?;

        Ok(Booking {
            id: BookingId::new(conn.last_insert_rowid()),
            user_id: booking.user_id,
            room_id: booking.room_id,
            interval: booking.interval,
            full_day: booking.full_day,
            created_at: booking.created_at.trunc_subsecs(SUBSEC_DIGITS),
        })
    }

    /// Lists all bookings ordered by start, then identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_bookings(conn: &Connection) -> Result<Vec<Booking>> {
        let sql = format!("{SELECT_BOOKING_COLUMNS} ORDER BY start_at, id");
        let mut stmt = conn.prepare(&sql)?;
        let bookings = stmt
            .query_map([], row_to_booking)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(bookings)
    }
}
