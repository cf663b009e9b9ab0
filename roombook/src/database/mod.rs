//! `SQLite` entity store for users, rooms, and bookings.
//!
//! This module owns connection setup, schema versioning, and every query the
//! allocator and registry run. Queries are associated functions on
//! [`Database`] taking a `&Connection`, so they work both on a plain
//! connection and inside an immediate transaction.
//!
//! # Examples
//!
//! ```no_run
//! use roombook::database::{Database, DatabaseConfig};
//! use roombook::NewRoom;
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/roombook.db")).unwrap();
//! db.batch_create_rooms(&[NewRoom::new("Atlas", "meeting")]).unwrap();
//!
//! for room in Database::list_rooms(db.connection()).unwrap() {
//!     println!("{} {}", room.id, room.name);
//! }
//! ```

mod config;
mod connection;
pub mod migrations;
mod operations;
mod schema;
mod transaction;

#[cfg(test)]
pub(crate) mod test_util;

pub use config::{
    default_data_dir, resolve_data_dir, resolve_database_path, DatabaseConfig,
    DATABASE_FILE_NAME, DATA_DIR_ENV, DEFAULT_BUSY_TIMEOUT,
};
pub use connection::Database;
pub(crate) use connection::map_busy;
pub(crate) use schema::OVERLAP_TRIGGER_MESSAGE;

pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
