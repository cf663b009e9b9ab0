//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including configuration loading, database management, timestamp parsing,
//! and output formatting.

use crate::error::CliError;
use chrono::{NaiveDate, NaiveDateTime};
use clap::ValueEnum;
use roombook::config::OutputFormat;
use roombook::database::resolve_data_dir;
use roombook::{Config, ConfigBuilder, Database, DatabaseConfig};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

/// Timestamp layouts accepted on the command line.
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

/// Layout used when printing timestamps.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
#[allow(dead_code)] // Fields used via pattern matching in main.rs
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the database lock wait (in seconds).
    pub busy_timeout: Option<u32>,

    /// Fail instead of creating a missing database.
    pub disable_autoinit: bool,
}

/// `--format` values for listing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum FormatArg {
    /// Tab-separated table format (human-readable)
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Table => OutputFormat::Table,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Csv => OutputFormat::Csv,
        }
    }
}

/// The format a listing should use: the flag when given, else the
/// configured default.
pub fn output_format(flag: Option<FormatArg>, config: &Config) -> OutputFormat {
    flag.map_or_else(
        || config.output_format.unwrap_or(OutputFormat::Table),
        OutputFormat::from,
    )
}

/// Resolve the data directory: `--data-dir`, then `ROOMBOOK_DATA_DIR`, then
/// `~/.roombook`.
pub fn data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    match global.data_dir {
        Some(ref dir) => Ok(dir.clone()),
        None => resolve_data_dir().map_err(|e| CliError::Config(e.to_string())),
    }
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Environment variables
/// 2. `config.yaml` in the data directory
/// 3. Built-in defaults
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let data_dir = data_dir(global)?;

    ConfigBuilder::new()
        .with_data_dir(&data_dir)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Open database with configuration.
///
/// The lock wait comes from `--busy-timeout` when given, else from the
/// configuration.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database doesn't exist and auto-init is disabled.
pub fn open_database(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    let mut db_config = DatabaseConfig::in_data_dir(data_dir(global)?);

    let busy_timeout = global
        .busy_timeout
        .map_or_else(|| config.lock_wait(), |s| Duration::from_secs(s.into()));
    db_config = db_config.with_busy_timeout(busy_timeout);

    if global.disable_autoinit {
        db_config = db_config.without_auto_create();
    }

    Database::open(db_config).map_err(CliError::from)
}

/// Parse a local timestamp such as `2030-06-03 09:00`.
///
/// A bare date means midnight.
pub fn parse_datetime(value: &str) -> Result<NaiveDateTime, String> {
    let value = value.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| format!("'{value}' is not a timestamp (expected YYYY-MM-DD HH:MM)"))
}

/// Format a timestamp for display.
pub fn format_timestamp(ts: NaiveDateTime) -> String {
    ts.format(DISPLAY_FORMAT).to_string()
}

/// Convert csv::Error to CliError.
fn csv_error(e: csv::Error) -> CliError {
    CliError::Io(std::io::Error::other(e))
}

/// Print `items` in the requested format.
///
/// Table and CSV output use `headers` and `row`; JSON output serializes the
/// items themselves.
pub fn print_listing<T, F>(
    format: OutputFormat,
    headers: &[&str],
    items: &[T],
    row: F,
) -> Result<(), CliError>
where
    T: Serialize,
    F: Fn(&T) -> Vec<String>,
{
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    match format {
        OutputFormat::Table => {
            let header_line = headers
                .iter()
                .map(|s| s.to_uppercase())
                .collect::<Vec<_>>()
                .join("\t");
            writeln!(handle, "{header_line}")?;
            for item in items {
                writeln!(handle, "{}", row(item).join("\t"))?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut handle, items)
                .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
            writeln!(handle)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::WriterBuilder::new().from_writer(handle);
            writer.write_record(headers).map_err(csv_error)?;
            for item in items {
                writer.write_record(row(item)).map_err(csv_error)?;
            }
            writer.flush()?;
        }
    }

    Ok(())
}
