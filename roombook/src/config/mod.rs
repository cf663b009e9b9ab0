//! Configuration system for roombook.
//!
//! Configuration is layered, highest precedence first:
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`ROOMBOOK_*`)
//! 3. `config.yaml` in the data directory
//! 4. Built-in defaults
//!
//! # Examples
//!
//! ```no_run
//! use roombook::config::ConfigBuilder;
//! use std::path::Path;
//!
//! let config = ConfigBuilder::new()
//!     .with_data_dir(Path::new("/srv/roombook"))
//!     .build()
//!     .unwrap();
//!
//! println!("{} known rooms", config.known_rooms().len());
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource, CONFIG_FILE_NAME};
pub use merger::ConfigMerger;
pub use schema::{Config, EstimatorConfig, OutputFormat, DEFAULT_LOCK_WAIT_SECONDS};
pub use validator::ConfigValidator;
