//! Wall-clock abstraction.
//!
//! Booking validation rejects intervals that have already ended, so the
//! allocator needs "now". Production code reads the local clock; tests pin it
//! with [`FixedClock`].

use chrono::{Local, NaiveDateTime};

/// Source of the current local date-time.
pub trait Clock: Send + Sync {
    /// Returns the current local wall-clock time.
    fn now(&self) -> NaiveDateTime;
}

/// Reads the host's local clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock frozen at a single instant.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use roombook::clock::{Clock, FixedClock};
///
/// let at = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap().and_hms_opt(8, 0, 0).unwrap();
/// assert_eq!(FixedClock::new(at).now(), at);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    at: NaiveDateTime,
}

impl FixedClock {
    /// Creates a clock that always reports `at`.
    #[must_use]
    pub const fn new(at: NaiveDateTime) -> Self {
        Self { at }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.at
    }
}
