//! Booking allocation: validate a request, choose a room, persist the booking.

use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use rusqlite::Connection;

use crate::booking::{Booking, BookingRequest, NewBooking};
use crate::clock::{Clock, SystemClock};
use crate::database::{map_busy, Database, OVERLAP_TRIGGER_MESSAGE};
use crate::error::{Error, Result};
use crate::interval::Interval;
use crate::room::{KnownRooms, RoomId};
use crate::user::UserId;

use super::availability::find_available_rooms;
use super::estimator::{next_available, EstimatorScope};

/// Turns booking requests into stored bookings.
///
/// The allocator holds only configuration: the known room set, the
/// estimator scope, and a clock. All state lives in the [`Database`].
///
/// # Type Parameters
///
/// * `C` - Source of "now" (defaults to [`SystemClock`])
///
/// # Examples
///
/// ```no_run
/// use chrono::NaiveDate;
/// use roombook::allocation::BookingAllocator;
/// use roombook::database::{Database, DatabaseConfig};
/// use roombook::{BookingRequest, KnownRooms, RoomId, UserId};
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/roombook.db")).unwrap();
/// let allocator = BookingAllocator::new(KnownRooms::new([RoomId::new(1), RoomId::new(2)]));
///
/// let day = NaiveDate::from_ymd_opt(2030, 6, 3).unwrap();
/// let request = BookingRequest::new(UserId::new(1))
///     .with_start(day.and_hms_opt(9, 0, 0))
///     .with_end(day.and_hms_opt(10, 0, 0));
///
/// let booking = allocator.allocate(&mut db, &request).unwrap();
/// println!("booked room {}", booking.room_id);
/// ```
#[derive(Debug, Clone)]
pub struct BookingAllocator<C: Clock = SystemClock> {
    clock: C,
    known_rooms: KnownRooms,
    scope: EstimatorScope,
}

impl BookingAllocator<SystemClock> {
    /// Creates an allocator reading the local wall clock.
    #[must_use]
    pub fn new(known_rooms: KnownRooms) -> Self {
        Self::with_clock(SystemClock, known_rooms)
    }
}

impl<C: Clock> BookingAllocator<C> {
    /// Creates an allocator with an explicit clock.
    #[must_use]
    pub fn with_clock(clock: C, known_rooms: KnownRooms) -> Self {
        Self {
            clock,
            known_rooms,
            scope: EstimatorScope::default(),
        }
    }

    /// Sets which bookings the next-availability hint considers.
    #[must_use]
    pub fn with_estimator_scope(mut self, scope: EstimatorScope) -> Self {
        self.scope = scope;
        self
    }

    /// The rooms this allocator may book.
    #[must_use]
    pub fn known_rooms(&self) -> &KnownRooms {
        &self.known_rooms
    }

    /// The estimator scope in effect.
    #[must_use]
    pub fn estimator_scope(&self) -> EstimatorScope {
        self.scope
    }

    /// Allocates a booking for `request`.
    ///
    /// The checks run in this order, and the first failure wins:
    /// 1. The user must exist
    /// 2. The interval is derived (a full-day request spans the calendar day
    ///    of `start` and ignores `end`)
    /// 3. The interval must be non-empty and end after now
    /// 4. With an explicit room, that room must be known, stored, and free
    /// 5. Without one, the lowest-numbered free eligible room is chosen
    ///
    /// Everything runs inside one immediate transaction, so a concurrent
    /// allocation on the same file cannot slip a booking in between the
    /// conflict check and the insert. Nothing is written on failure.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The user or the explicit room does not exist, or no eligible room
    ///   exists at all ([`ErrorKind::NotFound`](crate::ErrorKind::NotFound))
    /// - The request is malformed or lies in the past
    ///   ([`ErrorKind::InvalidInput`](crate::ErrorKind::InvalidInput))
    /// - The explicit room is taken ([`Error::BookingConflict`]) or every
    ///   eligible room is taken ([`Error::NoRoomAvailable`])
    /// - The write lock is not acquired in time ([`Error::LockTimeout`])
    pub fn allocate(&self, db: &mut Database, request: &BookingRequest) -> Result<Booking> {
        let seconds = db.config().busy_timeout.as_secs();
        let tx = db.begin_immediate()?;
        let booking = self.allocate_in(&tx, request)?;
        tx.commit().map_err(|e| map_busy(e, seconds))?;

        log::info!(
            "booked room {} for {} (booking {})",
            booking.room_id,
            booking.interval,
            booking.id
        );
        Ok(booking)
    }

    fn allocate_in(&self, conn: &Connection, request: &BookingRequest) -> Result<Booking> {
        if Database::find_user_by_id(conn, request.user_id)?.is_none() {
            return Err(Error::not_found(format!("user {}", request.user_id)));
        }

        let interval = derive_interval(request)?;

        let now = self.clock.now();
        if interval.end() <= now {
            return Err(Error::validation(
                "end",
                format!("booking for {interval} has already ended"),
            ));
        }

        let pending = Pending {
            user_id: request.user_id,
            interval,
            full_day: request.full_day,
            requested_at: now,
        };

        match request.room_id {
            Some(room_id) => self.book_explicit(conn, room_id, &pending),
            None => self.book_any(conn, &pending),
        }
    }

    fn book_explicit(&self, conn: &Connection, room_id: RoomId, pending: &Pending) -> Result<Booking> {
        if !self.known_rooms.contains(room_id) {
            return Err(Error::not_found(format!("room {room_id}")));
        }

        let ids: BTreeSet<RoomId> = [room_id].into_iter().collect();
        let room = Database::list_rooms_by_ids(conn, &ids)?
            .into_iter()
            .next()
            .ok_or_else(|| Error::not_found(format!("room {room_id}")))?;

        if pending.full_day && !room.full_day_allowed {
            return Err(Error::validation(
                "full_day",
                format!("room {room_id} does not allow full-day bookings"),
            ));
        }

        if let Some(existing) = Database::find_overlapping_bookings(conn, room_id, &pending.interval)?
            .into_iter()
            .next()
        {
            log::debug!("room {room_id} conflicts with booking {}", existing.id);
            return Err(Error::BookingConflict {
                room_id,
                booking_id: existing.id,
                existing: existing.interval,
            });
        }

        insert(conn, &pending.on(room_id))
    }

    fn book_any(&self, conn: &Connection, pending: &Pending) -> Result<Booking> {
        let candidates: BTreeSet<RoomId> = Database::list_rooms_by_ids(conn, self.known_rooms.ids())?
            .into_iter()
            .filter(|room| !pending.full_day || room.full_day_allowed)
            .map(|room| room.id)
            .collect();

        if candidates.is_empty() {
            let what = if pending.full_day {
                "eligible room allowing full-day bookings"
            } else {
                "eligible room"
            };
            return Err(Error::not_found(what));
        }

        let free = find_available_rooms(conn, &pending.interval, &candidates)?;
        log::debug!(
            "{} of {} candidate room(s) free for {}",
            free.len(),
            candidates.len(),
            pending.interval
        );

        match free.first() {
            Some(&room_id) => insert(conn, &pending.on(room_id)),
            None => {
                let next =
                    next_available(conn, pending.interval.start(), self.scope, &candidates)?;
                Err(Error::NoRoomAvailable {
                    requested: pending.interval,
                    next,
                })
            }
        }
    }
}

/// A validated request still waiting for a room.
struct Pending {
    user_id: UserId,
    interval: Interval,
    full_day: bool,
    requested_at: NaiveDateTime,
}

impl Pending {
    fn on(&self, room_id: RoomId) -> NewBooking {
        NewBooking {
            user_id: self.user_id,
            room_id,
            interval: self.interval,
            full_day: self.full_day,
            created_at: self.requested_at,
        }
    }
}

fn derive_interval(request: &BookingRequest) -> Result<Interval> {
    let start = request
        .start
        .ok_or_else(|| Error::validation("start", "start time is required"))?;

    if request.full_day {
        return Ok(Interval::full_day(start.date())?);
    }

    let end = request.end.ok_or_else(|| {
        Error::validation("end", "end time is required unless booking a full day")
    })?;
    Ok(Interval::new(start, end)?)
}

/// Inserts `booking`, reporting a store-level overlap abort as a conflict.
fn insert(conn: &Connection, booking: &NewBooking) -> Result<Booking> {
    match Database::insert_booking(conn, booking) {
        Err(Error::Database(err)) if is_overlap_abort(&err) => {
            let existing =
                Database::find_overlapping_bookings(conn, booking.room_id, &booking.interval)?;
            match existing.into_iter().next() {
                Some(existing) => Err(Error::BookingConflict {
                    room_id: booking.room_id,
                    booking_id: existing.id,
                    existing: existing.interval,
                }),
                None => Err(Error::Database(err)),
            }
        }
        other => other,
    }
}

fn is_overlap_abort(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(_, Some(message)) if message.contains(OVERLAP_TRIGGER_MESSAGE)
    )
}
