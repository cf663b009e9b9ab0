//! Schema initialization and version checks.
//!
//! There are no migrations yet: a database is either fresh (and gets the
//! current schema) or already at [`CURRENT_SCHEMA_VERSION`].

use rusqlite::Connection;

use crate::error::{Error, Result};

use super::schema::{
    CREATE_BOOKINGS_END_INDEX, CREATE_BOOKINGS_ROOM_INDEX, CREATE_BOOKINGS_TABLE,
    CREATE_METADATA_TABLE, CREATE_OVERLAP_TRIGGER, CREATE_ROOMS_TABLE, CREATE_USERS_TABLE,
    CURRENT_SCHEMA_VERSION, INSERT_SCHEMA_VERSION, SELECT_SCHEMA_VERSION,
};

/// Creates all tables, indices, the overlap trigger, and the version row.
///
/// Runs in one immediate transaction so that processes racing to initialize
/// the same file do not observe a half-built schema.
///
/// # Errors
///
/// Returns an error if any SQL statement fails to execute.
///
/// # Examples
///
/// ```
/// use rusqlite::Connection;
/// use roombook::database::migrations::{get_schema_version, initialize_schema};
///
/// let conn = Connection::open_in_memory().unwrap();
/// initialize_schema(&conn).unwrap();
/// assert_eq!(get_schema_version(&conn).unwrap(), 1);
/// ```
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch("BEGIN IMMEDIATE")?;
    let outcome = create_objects(conn);
    match outcome {
        Ok(()) => conn.execute_batch("COMMIT")?,
        Err(_) => conn.execute_batch("ROLLBACK")?,
    }
    outcome
}

fn create_objects(conn: &Connection) -> Result<()> {
    conn.execute(CREATE_METADATA_TABLE, [])?;
    conn.execute(CREATE_USERS_TABLE, [])?;
    conn.execute(CREATE_ROOMS_TABLE, [])?;
    conn.execute(CREATE_BOOKINGS_TABLE, [])?;
    conn.execute(CREATE_BOOKINGS_ROOM_INDEX, [])?;
    conn.execute(CREATE_BOOKINGS_END_INDEX, [])?;
    conn.execute(CREATE_OVERLAP_TRIGGER, [])?;
    conn.execute(INSERT_SCHEMA_VERSION, [CURRENT_SCHEMA_VERSION.to_string()])?;
    Ok(())
}

/// Reads the schema version.
///
/// Returns `0` for a database with no metadata table or no version row.
///
/// # Errors
///
/// Returns an error if the query fails for any other reason, or the stored
/// version is not an integer.
pub fn get_schema_version(conn: &Connection) -> Result<i32> {
    let has_metadata: bool = conn.query_row(
        "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'metadata')",
        [],
        |row| row.get(0),
    )?;
    if !has_metadata {
        return Ok(0);
    }

    match conn.query_row(SELECT_SCHEMA_VERSION, [], |row| row.get::<_, String>(0)) {
        Ok(value) => value.parse::<i32>().map_err(|_| Error::DatabaseCorruption {
            details: format!("schema version '{value}' is not an integer"),
        }),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(e) => Err(e.into()),
    }
}

/// Initializes a fresh database or verifies an existing one.
///
/// # Errors
///
/// Returns [`Error::UnsupportedSchemaVersion`] if the stored version differs
/// from [`CURRENT_SCHEMA_VERSION`], or a database error.
pub fn check_schema_compatibility(conn: &Connection) -> Result<()> {
    if get_schema_version(conn)? == 0 {
        log::info!("initializing database schema version {CURRENT_SCHEMA_VERSION}");
        initialize_schema(conn)?;
    }
    verify_schema(conn)
}

/// Verifies the stored version without creating anything.
///
/// # Errors
///
/// Returns [`Error::UnsupportedSchemaVersion`] on mismatch.
pub fn verify_schema(conn: &Connection) -> Result<()> {
    let found = get_schema_version(conn)?;
    if found == CURRENT_SCHEMA_VERSION {
        Ok(())
    } else {
        Err(Error::UnsupportedSchemaVersion {
            expected: CURRENT_SCHEMA_VERSION,
            found,
        })
    }
}
