//! Database connection management.

use rusqlite::{Connection, ErrorCode, OpenFlags, Transaction, TransactionBehavior};

use crate::error::{Error, Result};

use super::config::DatabaseConfig;

/// A `SQLite` connection configured for concurrent booking writers.
///
/// Opening a database applies WAL journaling, the configured busy timeout,
/// and foreign-key enforcement, then creates or verifies the schema.
///
/// # Examples
///
/// ```no_run
/// use roombook::database::{Database, DatabaseConfig};
///
/// let db = Database::open(DatabaseConfig::new("/tmp/roombook.db")).unwrap();
/// ```
#[derive(Debug)]
pub struct Database {
    pub(super) conn: Connection,
    config: DatabaseConfig,
}

impl Database {
    /// Opens a database connection with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The database file or its parent directory cannot be created
    /// - The file is missing and `auto_create` is off
    /// - PRAGMA settings cannot be applied
    /// - The schema cannot be created or has an unsupported version
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        if !config.path.exists() {
            if !config.auto_create {
                return Err(Error::DataDirectoryNotFound {
                    path: config.path.clone(),
                });
            }
            if let Some(parent) = config.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let flags = if config.read_only {
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else if config.auto_create {
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else {
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX
        };

        let conn = Connection::open_with_flags(&config.path, flags)?;
        conn.busy_timeout(config.busy_timeout)?;
        conn.execute_batch("PRAGMA foreign_keys = ON")?;

        if !config.read_only {
            // journal_mode reports the resulting mode as a row
            let _: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
            conn.execute_batch("PRAGMA synchronous = NORMAL")?;
        }

        let db = Self { conn, config };
        if db.config.read_only {
            super::migrations::verify_schema(&db.conn)?;
        } else {
            super::migrations::check_schema_compatibility(&db.conn)?;
        }

        log::debug!("opened database at {}", db.config.path.display());
        Ok(db)
    }

    /// The underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// The configuration this database was opened with.
    #[must_use]
    pub const fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Starts a transaction that holds the write lock from its first statement.
    ///
    /// Two writers never interleave check-then-insert sequences inside such
    /// transactions; the second waits up to the busy timeout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockTimeout`] if the lock is not acquired within the
    /// busy timeout.
    pub fn begin_immediate(&mut self) -> Result<Transaction<'_>> {
        let seconds = self.config.busy_timeout.as_secs();
        self.conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| map_busy(e, seconds))
    }
}

/// Converts `SQLITE_BUSY`/`SQLITE_LOCKED` into [`Error::LockTimeout`].
pub(crate) fn map_busy(err: rusqlite::Error, seconds: u64) -> Error {
    match err.sqlite_error_code() {
        Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked) => Error::LockTimeout { seconds },
        _ => Error::Database(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::tempdir;

    #[test]
    fn test_database_open_sets_pragmas() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");
        let db = Database::open(DatabaseConfig::new(&path)).unwrap();
        assert!(path.exists());

        let journal_mode: String = db
            .connection()
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .unwrap();
        assert_eq!(journal_mode.to_lowercase(), "wal");

        let foreign_keys: i64 = db
            .connection()
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(foreign_keys, 1);
    }

    #[test]
    fn test_database_auto_create_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("test.db");
        let _db = Database::open(DatabaseConfig::new(&path)).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_database_missing_without_auto_create() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.db");
        let err = Database::open(DatabaseConfig::new(&path).without_auto_create()).unwrap_err();
        assert!(matches!(err, Error::DataDirectoryNotFound { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_database_read_only_rejects_writes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");
        drop(Database::open(DatabaseConfig::new(&path)).unwrap());

        let db = Database::open(DatabaseConfig::new(&path).read_only()).unwrap();
        assert!(db
            .connection()
            .execute("CREATE TABLE scratch (id INTEGER)", [])
            .is_err());
    }

    #[test]
    fn test_second_immediate_transaction_times_out() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");
        let mut first = Database::open(DatabaseConfig::new(&path)).unwrap();
        let mut second = Database::open(
            DatabaseConfig::new(&path).with_busy_timeout(Duration::from_millis(50)),
        )
        .unwrap();

        let _held = first.begin_immediate().unwrap();
        let err = second.begin_immediate().unwrap_err();
        assert!(matches!(err, Error::LockTimeout { .. }));
    }
}
