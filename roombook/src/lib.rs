#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # roombook
//!
//! A library for registering users and rooms and booking rooms without
//! double-booking.
//!
//! Bookings are half-open `[start, end)` intervals on a room. The
//! [`BookingAllocator`](allocation::BookingAllocator) validates a request,
//! either books the requested room or picks the lowest-numbered free room
//! from the configured known set, and persists the result in a `SQLite`
//! store. Check and insert happen in one immediate transaction and the
//! store itself rejects overlapping rows, so concurrent processes cannot
//! double-book a room.
//!
//! ## Core Types
//!
//! - [`Interval`] and [`overlaps`]: Half-open time intervals
//! - [`User`], [`Room`] and [`Booking`]: Stored entities
//! - [`BookingRequest`] and [`KnownRooms`]: Allocation inputs
//! - [`Error`], [`ErrorKind`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use roombook::Interval;
//!
//! let day = NaiveDate::from_ymd_opt(2030, 6, 3).unwrap();
//! let morning = Interval::new(
//!     day.and_hms_opt(9, 0, 0).unwrap(),
//!     day.and_hms_opt(10, 0, 0).unwrap(),
//! )
//! .unwrap();
//! let next = Interval::new(
//!     day.and_hms_opt(10, 0, 0).unwrap(),
//!     day.and_hms_opt(11, 0, 0).unwrap(),
//! )
//! .unwrap();
//!
//! // touching intervals do not overlap
//! assert!(!morning.overlaps(&next));
//! ```

pub mod allocation;
pub mod booking;
pub mod clock;
pub mod config;
pub mod database;
pub mod error;
pub mod interval;
pub mod logging;
pub mod operations;
pub mod room;
pub mod user;

// Re-export key types at crate root for convenience
pub use allocation::{BookingAllocator, EstimatorScope, NextAvailability};
pub use booking::{Booking, BookingId, BookingRequest, NewBooking};
pub use config::{Config, ConfigBuilder};
pub use database::{Database, DatabaseConfig};
pub use error::{Error, ErrorKind, Result, ValidationError};
pub use interval::{overlaps, Interval};
pub use logging::{init_logger, LogLevel, Logger};
pub use room::{KnownRooms, NewRoom, Room, RoomId};
pub use user::{Credential, NewUser, User, UserId};
