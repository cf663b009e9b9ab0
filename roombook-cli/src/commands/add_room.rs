//! Add-room command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;
use roombook::operations::create_room;
use roombook::NewRoom;

/// Register a room.
#[derive(Args)]
pub struct AddRoomCommand {
    /// Unique room name
    #[arg(long)]
    pub name: String,

    /// Category label (e.g. meeting, focus)
    #[arg(long = "type", value_name = "CATEGORY")]
    pub category: String,

    /// Seating capacity
    #[arg(long)]
    pub capacity: Option<u32>,

    /// Allow whole-day bookings of this room
    #[arg(long)]
    pub full_day_allowed: bool,
}

impl AddRoomCommand {
    /// Execute the add-room command.
    ///
    /// Prints the new room's id. The room is bookable only once its id is
    /// listed in `known_rooms`.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let new_room = NewRoom::new(self.name, self.category)
            .with_capacity(self.capacity)
            .with_full_day_allowed(self.full_day_allowed);
        let room = create_room(&mut db, &new_room)?;

        if !config.known_rooms().contains(room.id) {
            log::info!(
                "room {} is not in known_rooms and will not be offered for booking",
                room.id
            );
        }
        println!("{}", room.id);

        Ok(())
    }
}
