//! Error types for the roombook library.
//!
//! Every failure surfaced by the library is an [`Error`]. Callers that need a
//! machine-checkable category (for exit codes or response statuses) use
//! [`Error::kind`], which folds the variants onto [`ErrorKind`].

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::allocation::NextAvailability;
use crate::booking::BookingId;
use crate::interval::Interval;
use crate::room::RoomId;

/// Result type alias for operations that may fail with a roombook error.
///
/// # Examples
///
/// ```
/// use roombook::{Error, Result};
///
/// fn example_operation() -> Result<i64> {
///     Ok(1)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse category of an [`Error`].
///
/// # Examples
///
/// ```
/// use roombook::{Error, ErrorKind};
///
/// let err = Error::NotFound { resource: "user 7".into() };
/// assert_eq!(err.kind(), ErrorKind::NotFound);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A referenced user, room, or eligible room category does not exist.
    NotFound,
    /// The request was malformed or violates a business rule.
    InvalidInput,
    /// The request collides with existing bookings.
    Conflict,
    /// Storage, configuration, or I/O failure.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not found"),
            Self::InvalidInput => write!(f, "invalid input"),
            Self::Conflict => write!(f, "conflict"),
            Self::Internal => write!(f, "internal"),
        }
    }
}

/// The main error type for the roombook library.
#[derive(Debug, Error)]
pub enum Error {
    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// The requested resource was not found.
    #[error("no such {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// The requested room already has an overlapping booking.
    #[error("room {room_id} is already booked for {existing} (booking {booking_id})")]
    BookingConflict {
        /// The room that was requested.
        room_id: RoomId,
        /// The booking that overlaps the request.
        booking_id: BookingId,
        /// Interval of the overlapping booking.
        existing: Interval,
    },

    /// Every eligible room is booked for the requested interval.
    ///
    /// Reported as a conflict even when the request is a full-day booking.
    /// Only an empty candidate set (no known, stored, eligible room) is
    /// [`Error::NotFound`].
    #[error("no eligible room is free for {requested}{}", describe_next(.next))]
    NoRoomAvailable {
        /// The interval that was requested.
        requested: Interval,
        /// The room that frees up soonest after the requested start, if any.
        next: Option<NextAvailability>,
    },

    /// A database lock timeout occurred.
    #[error("database lock timeout after {seconds}s")]
    LockTimeout {
        /// The number of seconds waited before timing out.
        seconds: u64,
    },

    /// The data directory was not found and auto-initialization is disabled.
    #[error("data directory not found: {}", path.display())]
    DataDirectoryNotFound {
        /// The expected path to the data directory.
        path: PathBuf,
    },

    /// Database corruption was detected.
    #[error("database corruption detected: {details}")]
    DatabaseCorruption {
        /// Details about the corruption.
        details: String,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },
}

fn describe_next(next: &Option<NextAvailability>) -> String {
    match next {
        Some(next) => format!("; {next}"),
        None => String::new(),
    }
}

impl Error {
    /// Returns the category of this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use roombook::{Error, ErrorKind};
    ///
    /// let err = Error::Validation {
    ///     field: "end".into(),
    ///     message: "must be after start".into(),
    /// };
    /// assert_eq!(err.kind(), ErrorKind::InvalidInput);
    /// ```
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } | Self::DataDirectoryNotFound { .. } => ErrorKind::NotFound,
            Self::Validation { .. } => ErrorKind::InvalidInput,
            Self::BookingConflict { .. } | Self::NoRoomAvailable { .. } => ErrorKind::Conflict,
            Self::Database(_)
            | Self::Configuration(_)
            | Self::Io(_)
            | Self::LockTimeout { .. }
            | Self::DatabaseCorruption { .. }
            | Self::UnsupportedSchemaVersion { .. } => ErrorKind::Internal,
        }
    }

    /// Shorthand for a [`Error::Validation`] value.
    pub(crate) fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a [`Error::NotFound`] value.
    pub(crate) fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }
}

/// Error returned by model constructors when a field is rejected.
///
/// Converts into [`Error::Validation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the validation failure.
    pub message: String,
}

impl ValidationError {
    pub(crate) fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Self::Validation {
            field: err.field,
            message: err.message,
        }
    }
}
