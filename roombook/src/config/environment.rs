//! Environment variable handling for configuration overrides.
//!
//! `ROOMBOOK_*` variables override values from `config.yaml`.

use std::env;

use crate::config::schema::{Config, EstimatorConfig, OutputFormat};
use crate::error::{Error, Result};
use crate::room::RoomId;

/// Comma-separated known room identifiers, e.g. `1,2,3`.
pub const KNOWN_ROOMS_ENV: &str = "ROOMBOOK_KNOWN_ROOMS";

/// Lock wait in seconds.
pub const LOCK_WAIT_ENV: &str = "ROOMBOOK_MAXIMUM_LOCK_WAIT_SECONDS";

/// Boolean selecting the eligible-only estimator scope.
pub const RESPECT_ELIGIBILITY_ENV: &str = "ROOMBOOK_ESTIMATOR_RESPECT_ELIGIBILITY";

/// `table`, `json` or `csv`.
pub const OUTPUT_FORMAT_ENV: &str = "ROOMBOOK_OUTPUT_FORMAT";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use roombook::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable holds an invalid value
    /// (a non-numeric room id, an unknown boolean spelling, and so on).
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(rooms) = env::var(KNOWN_ROOMS_ENV) {
            config.known_rooms = Some(Self::parse_known_rooms(&rooms)?);
        }

        if let Ok(seconds) = env::var(LOCK_WAIT_ENV) {
            config.maximum_lock_wait_seconds =
                Some(seconds.trim().parse().map_err(|_| Error::Validation {
                    field: LOCK_WAIT_ENV.into(),
                    message: "Must be a positive integer".into(),
                })?);
        }

        if let Ok(val) = env::var(RESPECT_ELIGIBILITY_ENV) {
            let estimator = config.estimator.get_or_insert_with(EstimatorConfig::default);
            estimator.respect_eligibility = Some(Self::parse_bool(RESPECT_ELIGIBILITY_ENV, &val)?);
        }

        if let Ok(val) = env::var(OUTPUT_FORMAT_ENV) {
            config.output_format = Some(Self::parse_output_format(&val)?);
        }

        Ok(())
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }

    /// Parse known rooms from a comma-separated string. Blank entries are skipped.
    fn parse_known_rooms(s: &str) -> Result<Vec<RoomId>> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<RoomId>().map_err(|_| Error::Validation {
                    field: KNOWN_ROOMS_ENV.into(),
                    message: format!("Invalid room id: {part}"),
                })
            })
            .collect()
    }

    fn parse_output_format(s: &str) -> Result<OutputFormat> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(Error::Validation {
                field: OUTPUT_FORMAT_ENV.into(),
                message: format!("Invalid output format: '{s}' (expected table/json/csv)"),
            }),
        }
    }
}
