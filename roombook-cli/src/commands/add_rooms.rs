//! Add-rooms command implementation.
//!
//! Registers every room in a YAML or JSON file in one transaction.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;
use roombook::operations::{create_rooms, load_rooms_file};
use std::path::PathBuf;

/// Register every room listed in a file.
#[derive(Args)]
pub struct AddRoomsCommand {
    /// File holding a list of rooms (`.json`, otherwise YAML)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

impl AddRoomsCommand {
    /// Execute the add-rooms command.
    ///
    /// Either every room is created or none is. Prints one id per line.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let rooms = load_rooms_file(&self.file)?;

        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let created = create_rooms(&mut db, &rooms)?;
        for room in &created {
            println!("{}", room.id);
        }
        log::info!(
            "created {} room(s) from {}",
            created.len(),
            self.file.display()
        );

        Ok(())
    }
}
