//! Configuration validation.

use std::collections::HashSet;

use crate::config::schema::Config;
use crate::error::{Error, Result};
use crate::room::RoomId;

/// Validates a merged configuration.
///
/// # Examples
///
/// ```
/// use roombook::config::{Config, ConfigValidator};
/// use roombook::RoomId;
///
/// let config = Config {
///     known_rooms: Some(vec![RoomId::new(1), RoomId::new(1)]),
///     ..Default::default()
/// };
/// assert!(ConfigValidator::validate(&config).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a known room id is not positive or
    /// appears twice, or the lock wait is zero.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(ref rooms) = config.known_rooms {
            Self::validate_known_rooms(rooms)?;
        }

        if let Some(timeout) = config.maximum_lock_wait_seconds {
            if timeout == 0 {
                return Err(Error::Validation {
                    field: "maximum_lock_wait_seconds".into(),
                    message: "Timeout must be greater than 0".into(),
                });
            }
        }

        Ok(())
    }

    fn validate_known_rooms(rooms: &[RoomId]) -> Result<()> {
        let mut seen = HashSet::new();
        for room in rooms {
            if room.value() <= 0 {
                return Err(Error::Validation {
                    field: "known_rooms".into(),
                    message: format!("Room id must be positive, got {room}"),
                });
            }
            if !seen.insert(*room) {
                return Err(Error::Validation {
                    field: "known_rooms".into(),
                    message: format!("Room {room} is listed more than once"),
                });
            }
        }
        Ok(())
    }
}
