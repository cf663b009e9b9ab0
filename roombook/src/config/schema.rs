//! Configuration schema definitions.
//!
//! Every field is optional so that partial files and environment overrides
//! can be layered; [`Config::with_defaults`] supplies the base layer.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::allocation::EstimatorScope;
use crate::room::{KnownRooms, RoomId};

/// Default lock wait when nothing is configured.
pub const DEFAULT_LOCK_WAIT_SECONDS: u64 = 5;

/// Complete roombook configuration.
///
/// # Examples
///
/// ```
/// use roombook::config::Config;
/// use roombook::RoomId;
///
/// let config: Config = serde_yaml::from_str("known_rooms: [1, 2, 3]\n").unwrap();
/// assert_eq!(config.known_rooms, Some(vec![RoomId::new(1), RoomId::new(2), RoomId::new(3)]));
/// assert!(config.known_rooms().contains(RoomId::new(2)));
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Room identifiers eligible for booking.
    pub known_rooms: Option<Vec<RoomId>>,

    /// Maximum time to wait for the database write lock, in seconds.
    pub maximum_lock_wait_seconds: Option<u64>,

    /// Next-availability estimator settings.
    pub estimator: Option<EstimatorConfig>,

    /// Output format for list commands.
    pub output_format: Option<OutputFormat>,
}

impl Config {
    /// The built-in defaults: no known rooms, a 5 second lock wait, the
    /// estimator looking at every room, and table output.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            known_rooms: Some(Vec::new()),
            maximum_lock_wait_seconds: Some(DEFAULT_LOCK_WAIT_SECONDS),
            estimator: Some(EstimatorConfig {
                respect_eligibility: Some(false),
            }),
            output_format: Some(OutputFormat::Table),
        }
    }

    /// The configured known rooms as a set. Unset means empty.
    #[must_use]
    pub fn known_rooms(&self) -> KnownRooms {
        self.known_rooms
            .as_deref()
            .unwrap_or_default()
            .iter()
            .copied()
            .collect()
    }

    /// The estimator scope selected by `estimator.respect_eligibility`.
    #[must_use]
    pub fn estimator_scope(&self) -> EstimatorScope {
        let respect = self
            .estimator
            .as_ref()
            .and_then(|e| e.respect_eligibility)
            .unwrap_or(false);
        EstimatorScope::from_respect_eligibility(respect)
    }

    /// The lock wait as a [`Duration`].
    #[must_use]
    pub fn lock_wait(&self) -> Duration {
        Duration::from_secs(
            self.maximum_lock_wait_seconds
                .unwrap_or(DEFAULT_LOCK_WAIT_SECONDS),
        )
    }
}

/// Next-availability estimator settings.
///
/// # Examples
///
/// ```
/// use roombook::config::Config;
/// use roombook::allocation::EstimatorScope;
///
/// let config: Config = serde_yaml::from_str("estimator:\n  respect_eligibility: true\n").unwrap();
/// assert_eq!(config.estimator_scope(), EstimatorScope::EligibleOnly);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct EstimatorConfig {
    /// Limit the hint to rooms the refused request was eligible for.
    pub respect_eligibility: Option<bool>,
}

/// Output format for list commands.
///
/// # Examples
///
/// ```
/// use roombook::config::OutputFormat;
///
/// let format = OutputFormat::Json;
/// assert_eq!(format.to_string(), "json");
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON output format.
    Json,
    /// CSV output format.
    Csv,
    /// Human-readable table format.
    Table,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Table => write!(f, "table"),
        }
    }
}
