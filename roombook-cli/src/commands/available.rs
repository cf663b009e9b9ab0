//! Available command implementation.

use super::list_rooms::{room_row, ROOM_HEADERS};
use crate::error::CliError;
use crate::utils::{
    load_configuration, open_database, output_format, parse_datetime, print_listing, FormatArg,
    GlobalOptions,
};
use chrono::NaiveDateTime;
use clap::Args;
use roombook::operations::available_rooms;
use roombook::Database;

/// Show known rooms with no booking overlapping `[start, end)`.
#[derive(Args)]
pub struct AvailableCommand {
    /// Start time (`YYYY-MM-DD HH:MM`, local)
    #[arg(long, value_parser = parse_datetime)]
    pub start: NaiveDateTime,

    /// End time (`YYYY-MM-DD HH:MM`, local)
    #[arg(long, value_parser = parse_datetime)]
    pub end: NaiveDateTime,

    /// Output format (defaults to the configured `output_format`)
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<FormatArg>,
}

impl AvailableCommand {
    /// Execute the available command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let free = available_rooms(&db, &config.known_rooms(), self.start, self.end)?;
        let rooms = Database::list_rooms_by_ids(db.connection(), &free)?;

        print_listing(
            output_format(self.format, &config),
            &ROOM_HEADERS,
            &rooms,
            room_row,
        )
    }
}
