//! Bookings and booking requests.

use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::interval::Interval;
use crate::room::RoomId;
use crate::user::UserId;

/// Store-assigned booking identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct BookingId(i64);

impl BookingId {
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

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Booking {
    /// Store-assigned identifier.
    pub id: BookingId,
    /// The user who made the booking.
    pub user_id: UserId,
    /// The booked room.
    pub room_id: RoomId,
    /// The reserved `[start, end)` window.
    pub interval: Interval,
    /// Whether this booking covers a whole calendar day.
    pub full_day: bool,
    /// When the booking was recorded.
    pub created_at: NaiveDateTime,
}

/// A booking that has passed validation and is ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    /// The user making the booking.
    pub user_id: UserId,
    /// The room being booked.
    pub room_id: RoomId,
    /// The reserved window.
    pub interval: Interval,
    /// Whether this booking covers a whole calendar day.
    pub full_day: bool,
    /// When the booking is recorded.
    pub created_at: NaiveDateTime,
}

/// An incoming booking request, before validation.
///
/// `start` and `end` are optional because the allocator reports missing
/// bounds as invalid input rather than rejecting the request shape.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use roombook::{BookingRequest, RoomId, UserId};
///
/// let day = NaiveDate::from_ymd_opt(2030, 1, 7).unwrap();
/// let request = BookingRequest::new(UserId::new(1))
///     .with_room(Some(RoomId::new(2)))
///     .with_start(day.and_hms_opt(9, 0, 0))
///     .with_end(day.and_hms_opt(10, 0, 0));
/// assert_eq!(request.room_id, Some(RoomId::new(2)));
///
/// let whole_day = BookingRequest::new(UserId::new(1))
///     .with_start(day.and_hms_opt(0, 0, 0))
///     .with_full_day(true);
/// assert!(whole_day.full_day);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    /// The requesting user.
    pub user_id: UserId,
    /// A specific room, or `None` to auto-assign.
    pub room_id: Option<RoomId>,
    /// Requested start.
    pub start: Option<NaiveDateTime>,
    /// Requested end. Ignored for full-day requests.
    pub end: Option<NaiveDateTime>,
    /// Book the entire calendar day of `start`.
    pub full_day: bool,
}

impl BookingRequest {
    /// Creates an empty request for `user_id`.
    #[must_use]
    pub const fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            room_id: None,
            start: None,
            end: None,
            full_day: false,
        }
    }

    /// Sets the explicit room.
    #[must_use]
    pub fn with_room(mut self, room_id: Option<RoomId>) -> Self {
        self.room_id = room_id;
        self
    }

    /// Sets the start.
    #[must_use]
    pub fn with_start(mut self, start: Option<NaiveDateTime>) -> Self {
        self.start = start;
        self
    }

    /// Sets the end.
    #[must_use]
    pub fn with_end(mut self, end: Option<NaiveDateTime>) -> Self {
        self.end = end;
        self
    }

    /// Sets the full-day flag.
    #[must_use]
    pub fn with_full_day(mut self, full_day: bool) -> Self {
        self.full_day = full_day;
        self
    }
}
