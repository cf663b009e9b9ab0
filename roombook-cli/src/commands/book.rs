//! Book command implementation.
//!
//! This module implements the `book` command, which books either the room
//! given with `--room` or the lowest-numbered free room from `known_rooms`.

use crate::error::CliError;
use crate::utils::{
    format_timestamp, load_configuration, open_database, parse_datetime, GlobalOptions,
};
use chrono::NaiveDateTime;
use clap::Args;
use roombook::{BookingAllocator, BookingRequest, RoomId, UserId};

/// Book a room.
#[derive(Args)]
pub struct BookCommand {
    /// User making the booking
    #[arg(long, value_name = "ID")]
    pub user: UserId,

    /// Room to book; omit to take the lowest free known room
    #[arg(long, value_name = "ID")]
    pub room: Option<RoomId>,

    /// Start time (`YYYY-MM-DD HH:MM`, local)
    #[arg(long, value_parser = parse_datetime)]
    pub start: Option<NaiveDateTime>,

    /// End time (`YYYY-MM-DD HH:MM`, local); ignored with --full-day
    #[arg(long, value_parser = parse_datetime)]
    pub end: Option<NaiveDateTime>,

    /// Book the whole day containing --start
    #[arg(long)]
    pub full_day: bool,
}

impl BookCommand {
    /// Execute the book command.
    ///
    /// Prints the booked room's id on stdout.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let allocator = BookingAllocator::new(config.known_rooms())
            .with_estimator_scope(config.estimator_scope());
        let request = BookingRequest::new(self.user)
            .with_room(self.room)
            .with_start(self.start)
            .with_end(self.end)
            .with_full_day(self.full_day);

        let booking = allocator.allocate(&mut db, &request)?;

        log::info!(
            "booking {}: room {} from {} to {}",
            booking.id,
            booking.room_id,
            format_timestamp(booking.interval.start()),
            format_timestamp(booking.interval.end())
        );
        println!("{}", booking.room_id);

        Ok(())
    }
}
