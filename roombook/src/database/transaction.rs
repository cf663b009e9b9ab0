//! Multi-statement writes that must succeed or fail as a unit.

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::room::{NewRoom, Room};

use super::connection::Database;

impl Database {
    /// Creates multiple rooms in a single transaction.
    ///
    /// Either every room is created or none is. Each entry is validated and
    /// trimmed; a name that repeats within the batch or already exists in the
    /// store rejects the whole batch.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Any entry fails validation or duplicates a name
    /// - The write lock cannot be acquired within the busy timeout
    /// - Any insert fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use roombook::database::{Database, DatabaseConfig};
    /// use roombook::NewRoom;
    ///
    /// let mut db = Database::open(DatabaseConfig::new("/tmp/roombook.db")).unwrap();
    /// let rooms = db
    ///     .batch_create_rooms(&[
    ///         NewRoom::new("Atlas", "meeting").with_capacity(Some(8)),
    ///         NewRoom::new("Hall", "auditorium").with_full_day_allowed(true),
    ///     ])
    ///     .unwrap();
    /// assert_eq!(rooms.len(), 2);
    /// ```
    pub fn batch_create_rooms(&mut self, rooms: &[NewRoom]) -> Result<Vec<Room>> {
        let validated = rooms
            .iter()
            .map(NewRoom::validate)
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut seen = HashSet::new();
        for room in &validated {
            if !seen.insert(room.name.as_str()) {
                return Err(Error::validation(
                    "name",
                    format!("Room name '{}' appears more than once", room.name),
                ));
            }
        }

        let tx = self.begin_immediate()?;
        let mut created = Vec::with_capacity(validated.len());
        for room in &validated {
            if Self::find_room_by_name(&tx, &room.name)?.is_some() {
                return Err(Error::validation(
                    "name",
                    format!("Room '{}' already exists", room.name),
                ));
            }
            created.push(Self::insert_room(&tx, room)?);
        }
        tx.commit()?;

        log::debug!("created {} room(s)", created.len());
        Ok(created)
    }
}
