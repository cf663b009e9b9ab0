//! Database schema definitions and SQL constants.

/// Current schema version for the database.
///
/// Stored in the metadata table and compared on every open.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Key-value metadata, currently only the schema version.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// Registered users. `email` keeps the address as entered; `email_key` holds
/// its lowercase form and carries the uniqueness constraint.
pub const CREATE_USERS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        email_key TEXT NOT NULL UNIQUE,
        credential TEXT NOT NULL,
        created_at INTEGER NOT NULL
    )";

/// Room catalogue.
pub const CREATE_ROOMS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS rooms (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        category TEXT NOT NULL,
        capacity INTEGER CHECK (capacity IS NULL OR capacity > 0),
        full_day_allowed INTEGER NOT NULL DEFAULT 0
    )";

/// Bookings. Timestamps are local wall-clock milliseconds since the epoch.
pub const CREATE_BOOKINGS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS bookings (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL REFERENCES users(id),
        room_id INTEGER NOT NULL REFERENCES rooms(id),
        start_at INTEGER NOT NULL,
        end_at INTEGER NOT NULL,
        full_day INTEGER NOT NULL DEFAULT 0,
        created_at INTEGER NOT NULL,
        CHECK (start_at < end_at)
    )";

/// Supports the per-room overlap probe.
pub const CREATE_BOOKINGS_ROOM_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_bookings_room_window ON bookings(room_id, start_at, end_at)";

/// Supports the next-availability scan.
pub const CREATE_BOOKINGS_END_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_bookings_end ON bookings(end_at)";

/// Message raised by [`CREATE_OVERLAP_TRIGGER`].
pub const OVERLAP_TRIGGER_MESSAGE: &str = "booking overlaps an existing booking for this room";

/// Aborts any insert that would overlap an existing booking on the same room.
pub const CREATE_OVERLAP_TRIGGER: &str = r"
    CREATE TRIGGER IF NOT EXISTS bookings_no_overlap
    BEFORE INSERT ON bookings
    WHEN EXISTS (
        SELECT 1 FROM bookings
        WHERE room_id = NEW.room_id
          AND start_at < NEW.end_at
          AND NEW.start_at < end_at
    )
    BEGIN
        SELECT RAISE(ABORT, 'booking overlaps an existing booking for this room');
    END";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// SQL statement to insert a room. Shared by single and batch creation.
pub const INSERT_ROOM: &str = r"
    INSERT INTO rooms (name, category, capacity, full_day_allowed)
    VALUES (?1, ?2, ?3, ?4)
";

/// SQL statement to look a room up by name.
pub const SELECT_ROOM_BY_NAME: &str = r"
    SELECT id, name, category, capacity, full_day_allowed
    FROM rooms
    WHERE name = ?1
";
