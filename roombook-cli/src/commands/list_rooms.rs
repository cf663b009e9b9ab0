//! List-rooms command implementation.

use crate::error::CliError;
use crate::utils::{
    load_configuration, open_database, output_format, print_listing, FormatArg, GlobalOptions,
};
use clap::Args;
use roombook::operations::list_rooms;
use roombook::Room;

/// Column headers for table/CSV output.
pub(crate) const ROOM_HEADERS: [&str; 5] = ["id", "name", "type", "capacity", "full_day_allowed"];

/// One table/CSV row for a room.
pub(crate) fn room_row(room: &Room) -> Vec<String> {
    vec![
        room.id.to_string(),
        room.name.clone(),
        room.category.clone(),
        room.capacity.map_or_else(|| "-".to_string(), |c| c.to_string()),
        room.full_day_allowed.to_string(),
    ]
}

/// List registered rooms.
#[derive(Args)]
pub struct ListRoomsCommand {
    /// Output format (defaults to the configured `output_format`)
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<FormatArg>,

    /// Show only rooms listed in `known_rooms`
    #[arg(long)]
    pub known_only: bool,
}

impl ListRoomsCommand {
    /// Execute the list-rooms command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let mut rooms = list_rooms(&db)?;
        if self.known_only {
            let known = config.known_rooms();
            rooms.retain(|room| known.contains(room.id));
        }

        print_listing(
            output_format(self.format, &config),
            &ROOM_HEADERS,
            &rooms,
            room_row,
        )
    }
}
