//! Main entry point for the roombook CLI.
//!
//! This is the command-line interface for the roombook reservation core.
//! It provides commands for managing users, rooms, and bookings:
//! - `add-user` / `list-users`: Register and list users
//! - `add-room` / `add-rooms` / `list-rooms`: Register and list rooms
//! - `book`: Book a named room or let roombook pick one
//! - `available` / `next-available`: Query free rooms

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use error::CliError;
use utils::GlobalOptions;

fn main() {
    // Usage errors share the invalid-arguments exit code
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() {
                CliError::InvalidArguments(String::new()).exit_code()
            } else {
                0
            };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    let _logger = roombook::init_logger(cli.verbose, cli.quiet);

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        data_dir: cli.data_dir,
        busy_timeout: cli.busy_timeout,
        disable_autoinit: cli.disable_autoinit,
    };

    let result = match cli.command {
        cli::Command::Init(cmd) => cmd.execute(&global),
        cli::Command::AddUser(cmd) => cmd.execute(&global),
        cli::Command::ListUsers(cmd) => cmd.execute(&global),
        cli::Command::AddRoom(cmd) => cmd.execute(&global),
        cli::Command::AddRooms(cmd) => cmd.execute(&global),
        cli::Command::ListRooms(cmd) => cmd.execute(&global),
        cli::Command::Book(cmd) => cmd.execute(&global),
        cli::Command::ListBookings(cmd) => cmd.execute(&global),
        cli::Command::Available(cmd) => cmd.execute(&global),
        cli::Command::NextAvailable(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
