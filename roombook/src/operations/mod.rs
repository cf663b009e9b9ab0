//! Registry and query operations over an open [`Database`](crate::Database).
//!
//! Booking itself goes through [`BookingAllocator`](crate::allocation::BookingAllocator);
//! everything else a client does (registering users, creating rooms,
//! listing, asking what is free) lives here.
//!
//! # Examples
//!
//! ```no_run
//! use roombook::clock::SystemClock;
//! use roombook::database::{Database, DatabaseConfig};
//! use roombook::operations::{create_room, register_user};
//! use roombook::{NewRoom, NewUser};
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/roombook.db")).unwrap();
//! let user = NewUser::new("Ada", "ada@example.com", "s3cret").unwrap();
//! register_user(&mut db, &user, &SystemClock).unwrap();
//! create_room(&mut db, &NewRoom::new("Atlas", "meeting")).unwrap();
//! ```

pub mod init;
pub mod query;
pub mod rooms;
pub mod users;

pub use init::{init_database, InitOptions, InitResult};
pub use query::{available_rooms, list_bookings, next_available};
pub use rooms::{create_room, create_rooms, list_rooms, load_rooms_file};
pub use users::{list_users, register_user};
