//! Layered configuration assembly.

use std::path::{Path, PathBuf};

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::ConfigLoader;
use crate::config::merger::ConfigMerger;
use crate::config::schema::Config;
use crate::config::validator::ConfigValidator;
use crate::database::resolve_data_dir;
use crate::error::Result;

/// Builds a [`Config`] from defaults, `config.yaml`, environment variables,
/// and programmatic overrides, in that order of increasing precedence.
///
/// # Examples
///
/// ```
/// use roombook::config::{Config, ConfigBuilder};
/// use roombook::RoomId;
///
/// let config = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_config(Config {
///         known_rooms: Some(vec![RoomId::new(1), RoomId::new(2)]),
///         ..Default::default()
///     })
///     .build()
///     .unwrap();
///
/// assert_eq!(config.known_rooms().len(), 2);
/// assert_eq!(config.maximum_lock_wait_seconds, Some(5));
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    data_dir: Option<PathBuf>,
    skip_files: bool,
    skip_env: bool,
    overrides: Vec<Config>,
}

impl ConfigBuilder {
    /// Creates a builder that reads the resolved data directory and the
    /// environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `config.yaml` from `data_dir` instead of the resolved default.
    #[must_use]
    pub fn with_data_dir(mut self, data_dir: &Path) -> Self {
        self.data_dir = Some(data_dir.to_path_buf());
        self
    }

    /// Ignores configuration files.
    #[must_use]
    pub fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Ignores `ROOMBOOK_*` environment variables.
    #[must_use]
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Adds a programmatic layer above files and environment. Later calls win.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides.push(config);
        self
    }

    /// Assembles and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file cannot be read or parsed, an
    /// environment variable is malformed, or the result fails validation.
    pub fn build(self) -> Result<Config> {
        let mut config = Config::with_defaults();

        if !self.skip_files {
            let data_dir = match self.data_dir {
                Some(dir) => dir,
                None => resolve_data_dir()?,
            };
            let sources: Vec<_> = ConfigLoader::load_from_data_dir(&data_dir)?
                .into_iter()
                .collect();
            config = ConfigMerger::merge(config, &sources);
        }

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }

        for layer in &self.overrides {
            ConfigMerger::merge_into(&mut config, layer);
        }

        ConfigValidator::validate(&config)?;
        Ok(config)
    }
}
