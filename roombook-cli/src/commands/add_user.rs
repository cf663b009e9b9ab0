//! Add-user command implementation.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use clap::Args;
use roombook::clock::SystemClock;
use roombook::operations::register_user;
use roombook::NewUser;

/// Register a user.
#[derive(Args)]
pub struct AddUserCommand {
    /// Display name
    #[arg(long)]
    pub name: String,

    /// Email address (unique, case-insensitive)
    #[arg(long)]
    pub email: String,

    /// Password; only a salted digest is stored
    #[arg(long, env = "ROOMBOOK_PASSWORD", hide_env_values = true)]
    pub password: String,
}

impl AddUserCommand {
    /// Execute the add-user command.
    ///
    /// Prints the new user's id.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let new_user = NewUser::new(&self.name, &self.email, &self.password)
            .map_err(|e| CliError::from(roombook::Error::from(e)))?;

        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let user = register_user(&mut db, &new_user, &SystemClock)?;
        println!("{}", user.id);

        Ok(())
    }
}
