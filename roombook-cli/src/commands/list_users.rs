//! List-users command implementation.

use crate::error::CliError;
use crate::utils::{
    format_timestamp, load_configuration, open_database, output_format, print_listing, FormatArg,
    GlobalOptions,
};
use clap::Args;
use roombook::operations::list_users;

/// Column headers for table/CSV output.
const COLUMN_HEADERS: [&str; 4] = ["id", "name", "email", "created_at"];

/// List registered users.
#[derive(Args)]
pub struct ListUsersCommand {
    /// Output format (defaults to the configured `output_format`)
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<FormatArg>,
}

impl ListUsersCommand {
    /// Execute the list-users command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;
        let users = list_users(&db)?;

        print_listing(
            output_format(self.format, &config),
            &COLUMN_HEADERS,
            &users,
            |user| {
                vec![
                    user.id.to_string(),
                    user.name.clone(),
                    user.email.clone(),
                    format_timestamp(user.created_at),
                ]
            },
        )
    }
}
