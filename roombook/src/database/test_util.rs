//! Shared fixtures for database unit tests.

use chrono::{NaiveDate, NaiveDateTime};
use tempfile::tempdir;

use crate::database::{Database, DatabaseConfig};
use crate::room::{NewRoom, Room};
use crate::user::{NewUser, User};

/// Creates a temporary test database that outlives the test body.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let db = Database::open(DatabaseConfig::new(path)).unwrap();

    // Keep the directory alive for the lifetime of the connection
    std::mem::forget(dir);

    db
}

/// The day all fixtures live on.
#[must_use]
pub fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 6, 3).unwrap()
}

/// `hour:minute` on [`day`].
#[must_use]
pub fn at(hour: u32, minute: u32) -> NaiveDateTime {
    day().and_hms_opt(hour, minute, 0).unwrap()
}

/// Inserts a user with password `pw`.
///
/// # Panics
///
/// Panics if the insert fails.
pub fn seed_user(db: &Database, email: &str) -> User {
    let user = NewUser::new("Test User", email, "pw").unwrap();
    Database::insert_user(db.connection(), &user, at(6, 0)).unwrap()
}

/// Inserts a room in the `meeting` category.
///
/// # Panics
///
/// Panics if the insert fails.
pub fn seed_room(db: &Database, name: &str, full_day_allowed: bool) -> Room {
    let room = NewRoom::new(name, "meeting").with_full_day_allowed(full_day_allowed);
    Database::insert_room(db.connection(), &room).unwrap()
}
