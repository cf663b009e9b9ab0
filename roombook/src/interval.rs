//! Half-open time intervals and the overlap predicate.
//!
//! All booking windows are `[start, end)`: the start instant is included and
//! the end instant is not, so a booking ending at 10:00 and another starting
//! at 10:00 never collide.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, SubsecRound, TimeDelta};
use serde::Serialize;

use crate::error::ValidationError;

/// Display format used for interval bounds.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Fractional-second digits kept on interval bounds. Matches the store's
/// millisecond encoding.
pub const SUBSEC_DIGITS: u16 = 3;

/// Returns true iff `[start_a, end_a)` and `[start_b, end_b)` intersect.
///
/// # Examples
///
/// ```
/// use roombook::interval::overlaps;
///
/// assert!(overlaps(&0, &10, &5, &15));
/// assert!(!overlaps(&0, &10, &10, &20));
/// ```
pub fn overlaps<T: PartialOrd>(start_a: &T, end_a: &T, start_b: &T, end_b: &T) -> bool {
    start_a < end_b && start_b < end_a
}

/// A non-empty half-open `[start, end)` interval of local date-times.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use roombook::Interval;
///
/// let day = NaiveDate::from_ymd_opt(2030, 5, 1).unwrap();
/// let morning = Interval::new(
///     day.and_hms_opt(9, 0, 0).unwrap(),
///     day.and_hms_opt(10, 0, 0).unwrap(),
/// ).unwrap();
/// let late_morning = Interval::new(
///     day.and_hms_opt(10, 0, 0).unwrap(),
///     day.and_hms_opt(11, 0, 0).unwrap(),
/// ).unwrap();
///
/// assert!(!morning.overlaps(&late_morning));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Interval {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl Interval {
    /// Creates an interval.
    ///
    /// Both bounds are truncated to whole milliseconds first, so the interval
    /// compares the same way in memory as it does once stored.
    ///
    /// # Errors
    ///
    /// Returns an error if `start` is not strictly before `end` after
    /// truncation.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, ValidationError> {
        let start = start.trunc_subsecs(SUBSEC_DIGITS);
        let end = end.trunc_subsecs(SUBSEC_DIGITS);
        if start >= end {
            return Err(ValidationError::new(
                "end",
                format!(
                    "end ({}) must be after start ({})",
                    end.format(TIMESTAMP_FORMAT),
                    start.format(TIMESTAMP_FORMAT)
                ),
            ));
        }
        Ok(Self { start, end })
    }

    /// The whole calendar day `[date 00:00, date+1 00:00)`.
    ///
    /// # Errors
    ///
    /// Returns an error for the last representable date.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use roombook::Interval;
    ///
    /// let day = NaiveDate::from_ymd_opt(2030, 5, 1).unwrap();
    /// let whole = Interval::full_day(day).unwrap();
    /// assert_eq!(whole.start(), day.and_hms_opt(0, 0, 0).unwrap());
    /// assert_eq!(whole.end(), NaiveDate::from_ymd_opt(2030, 5, 2).unwrap().and_hms_opt(0, 0, 0).unwrap());
    /// ```
    pub fn full_day(date: NaiveDate) -> Result<Self, ValidationError> {
        let start = date.and_time(NaiveTime::MIN);
        let end = start
            .checked_add_signed(TimeDelta::days(1))
            .ok_or_else(|| ValidationError::new("start", "date is out of range"))?;
        Self::new(start, end)
    }

    /// Inclusive lower bound.
    #[must_use]
    pub const fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Exclusive upper bound.
    #[must_use]
    pub const fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Length of the interval.
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Returns true if the two intervals share at least one instant.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        overlaps(&self.start, &self.end, &other.start, &other.end)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {})",
            self.start.format(TIMESTAMP_FORMAT),
            self.end.format(TIMESTAMP_FORMAT)
        )
    }
}
