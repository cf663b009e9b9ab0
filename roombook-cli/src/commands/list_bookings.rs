//! List-bookings command implementation.

use crate::error::CliError;
use crate::utils::{
    format_timestamp, load_configuration, open_database, output_format, print_listing, FormatArg,
    GlobalOptions,
};
use clap::Args;
use roombook::operations::list_bookings;
use roombook::RoomId;

/// Column headers for table/CSV output.
const COLUMN_HEADERS: [&str; 6] = ["id", "room", "user", "start", "end", "full_day"];

/// List bookings ordered by start time.
#[derive(Args)]
pub struct ListBookingsCommand {
    /// Output format (defaults to the configured `output_format`)
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<FormatArg>,

    /// Show only bookings of this room
    #[arg(long, value_name = "ID")]
    pub room: Option<RoomId>,
}

impl ListBookingsCommand {
    /// Execute the list-bookings command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let mut bookings = list_bookings(&db)?;
        if let Some(room) = self.room {
            bookings.retain(|b| b.room_id == room);
        }

        print_listing(
            output_format(self.format, &config),
            &COLUMN_HEADERS,
            &bookings,
            |b| {
                vec![
                    b.id.to_string(),
                    b.room_id.to_string(),
                    b.user_id.to_string(),
                    format_timestamp(b.interval.start()),
                    format_timestamp(b.interval.end()),
                    b.full_day.to_string(),
                ]
            },
        )
    }
}
