//! Next-available command implementation.
//!
//! Reports the room whose earliest booking ending after a point in time
//! ends soonest.

use crate::error::CliError;
use crate::utils::{
    format_timestamp, load_configuration, open_database, output_format, parse_datetime,
    FormatArg, GlobalOptions,
};
use chrono::NaiveDateTime;
use clap::Args;
use roombook::clock::{Clock, SystemClock};
use roombook::config::OutputFormat;
use roombook::operations::next_available;

/// Show the room that frees up soonest.
#[derive(Args)]
pub struct NextAvailableCommand {
    /// Reference time (`YYYY-MM-DD HH:MM`, local); defaults to now
    #[arg(long, value_parser = parse_datetime)]
    pub after: Option<NaiveDateTime>,

    /// Output format (defaults to the configured `output_format`)
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<FormatArg>,
}

impl NextAvailableCommand {
    /// Execute the next-available command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let db = open_database(global, &config)?;

        let after = self.after.unwrap_or_else(|| SystemClock.now());
        let next = next_available(
            &db,
            &config.known_rooms(),
            after,
            config.estimator_scope(),
        )?;

        match output_format(self.format, &config) {
            OutputFormat::Json => {
                let rendered = serde_json::to_string_pretty(&next)
                    .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
                println!("{rendered}");
            }
            OutputFormat::Csv => {
                println!("room,free_at");
                if let Some(next) = next {
                    println!("{},{}", next.room_id, format_timestamp(next.free_at));
                }
            }
            OutputFormat::Table => match next {
                Some(next) => println!("{next}"),
                None => println!("No booking ends after {}", format_timestamp(after)),
            },
        }

        Ok(())
    }
}
