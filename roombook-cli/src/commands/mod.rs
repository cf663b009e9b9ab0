//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `init`: Create the data directory, database, and optional config
//! - `add_user` / `list_users`: Register and list users
//! - `add_room` / `add_rooms` / `list_rooms`: Register and list rooms
//! - `book`: Book a named room or the lowest free known room
//! - `list_bookings`: List stored bookings
//! - `available`: Known rooms free for an interval
//! - `next_available`: The room that frees up soonest

pub mod add_room;
pub mod add_rooms;
pub mod add_user;
pub mod available;
pub mod book;
pub mod init;
pub mod list_bookings;
pub mod list_rooms;
pub mod list_users;
pub mod next_available;

pub use add_room::AddRoomCommand;
pub use add_rooms::AddRoomsCommand;
pub use add_user::AddUserCommand;
pub use available::AvailableCommand;
pub use book::BookCommand;
pub use init::InitCommand;
pub use list_bookings::ListBookingsCommand;
pub use list_rooms::ListRoomsCommand;
pub use list_users::ListUsersCommand;
pub use next_available::NextAvailableCommand;
