//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    AddRoomCommand, AddRoomsCommand, AddUserCommand, AvailableCommand, BookCommand, InitCommand,
    ListBookingsCommand, ListRoomsCommand, ListUsersCommand, NextAvailableCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for booking rooms without double-booking.
#[derive(Parser)]
#[command(name = "roombook")]
#[command(version, about = "Register rooms and users and book rooms", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "ROOMBOOK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the database lock wait (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "ROOMBOOK_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u32>,

    /// Fail instead of creating a missing database
    #[arg(long, global = true, env = "ROOMBOOK_DISABLE_AUTOINIT")]
    pub disable_autoinit: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize the data directory and database
    Init(InitCommand),

    /// Register a user
    AddUser(AddUserCommand),

    /// List registered users
    ListUsers(ListUsersCommand),

    /// Register a room
    AddRoom(AddRoomCommand),

    /// Register every room listed in a YAML or JSON file
    AddRooms(AddRoomsCommand),

    /// List registered rooms
    ListRooms(ListRoomsCommand),

    /// Book a room
    Book(BookCommand),

    /// List bookings
    ListBookings(ListBookingsCommand),

    /// Show known rooms free for an interval
    Available(AvailableCommand),

    /// Show the room that frees up soonest
    NextAvailable(NextAvailableCommand),
}
