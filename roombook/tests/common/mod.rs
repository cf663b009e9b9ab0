//! Common test utilities for integration tests.

pub mod database;

use chrono::{NaiveDate, NaiveDateTime};

/// The day every scenario is scheduled on.
#[allow(dead_code)]
pub fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 6, 3).unwrap()
}

/// `hour:minute` on [`day`].
#[allow(dead_code)]
pub fn at(hour: u32, minute: u32) -> NaiveDateTime {
    day().and_hms_opt(hour, minute, 0).unwrap()
}
