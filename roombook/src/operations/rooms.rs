//! Room catalogue management.

use std::fs;
use std::path::Path;

use crate::database::Database;
use crate::error::{Error, Result};
use crate::room::{NewRoom, Room};

/// Creates a single room.
///
/// # Errors
///
/// Returns a validation error for a blank name or category, a zero
/// capacity, or a name that already exists, and a database error otherwise.
///
/// # Examples
///
/// ```no_run
/// use roombook::database::{Database, DatabaseConfig};
/// use roombook::operations::create_room;
/// use roombook::NewRoom;
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/roombook.db")).unwrap();
/// let room = create_room(&mut db, &NewRoom::new("Atlas", "meeting")).unwrap();
/// println!("created room {}", room.id);
/// ```
pub fn create_room(db: &mut Database, room: &NewRoom) -> Result<Room> {
    db.batch_create_rooms(std::slice::from_ref(room))?
        .into_iter()
        .next()
        .ok_or_else(|| Error::DatabaseCorruption {
            details: "room insert returned no row".into(),
        })
}

/// Creates several rooms; either all are created or none is.
///
/// # Errors
///
/// Same conditions as [`create_room`], for any entry. Names must also be
/// unique within the batch.
pub fn create_rooms(db: &mut Database, rooms: &[NewRoom]) -> Result<Vec<Room>> {
    db.batch_create_rooms(rooms)
}

/// Lists every room ordered by identifier.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_rooms(db: &Database) -> Result<Vec<Room>> {
    Database::list_rooms(db.connection())
}

/// Reads a list of rooms from a YAML or JSON file.
///
/// Files ending in `.json` are parsed as JSON; anything else as YAML. Each
/// entry takes `name`, `category` (or `type`), and the optional `capacity`
/// and `full_day_allowed`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not hold a list of
/// rooms.
///
/// # Examples
///
/// ```no_run
/// use roombook::operations::load_rooms_file;
/// use std::path::Path;
///
/// let rooms = load_rooms_file(Path::new("rooms.yaml")).unwrap();
/// println!("{} rooms to create", rooms.len());
/// ```
pub fn load_rooms_file(path: &Path) -> Result<Vec<NewRoom>> {
    let contents = fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let parsed = if is_json {
        serde_json::from_str(&contents).map_err(|e| format!("Invalid JSON: {e}"))
    } else {
        serde_yaml::from_str(&contents).map_err(|e| format!("Invalid YAML: {e}"))
    };
    parsed.map_err(|message| Error::Validation {
        field: format!("{}", path.display()),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::create_test_database;
    use crate::error::ErrorKind;
    use tempfile::TempDir;

    #[test]
    fn test_create_room_trims_and_stores() {
        let mut db = create_test_database();
        let room = create_room(
            &mut db,
            &NewRoom::new(" Atlas ", " meeting ").with_capacity(Some(10)),
        )
        .unwrap();

        assert_eq!(room.name, "Atlas");
        assert_eq!(room.category, "meeting");
        assert_eq!(room.capacity, Some(10));
        assert!(!room.full_day_allowed);
        assert_eq!(list_rooms(&db).unwrap(), vec![room]);
    }

    #[test]
    fn test_create_room_duplicate_name() {
        let mut db = create_test_database();
        create_room(&mut db, &NewRoom::new("Atlas", "meeting")).unwrap();
        let err = create_room(&mut db, &NewRoom::new("Atlas", "focus")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_create_rooms_all_or_nothing() {
        let mut db = create_test_database();
        let err = create_rooms(
            &mut db,
            &[
                NewRoom::new("Atlas", "meeting"),
                NewRoom::new("", "meeting"),
            ],
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(list_rooms(&db).unwrap().is_empty());
    }

    #[test]
    fn test_load_rooms_file_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("rooms.yaml");
        fs::write(
            &path,
            "- name: Atlas\n  type: meeting\n  capacity: 8\n- name: Hall\n  category: auditorium\n  full_day_allowed: true\n",
        )
        .unwrap();

        let rooms = load_rooms_file(&path).unwrap();
        assert_eq!(
            rooms,
            vec![
                NewRoom::new("Atlas", "meeting").with_capacity(Some(8)),
                NewRoom::new("Hall", "auditorium").with_full_day_allowed(true),
            ]
        );
    }

    #[test]
    fn test_load_rooms_file_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("rooms.json");
        fs::write(&path, r#"[{"name": "Atlas", "type": "meeting"}]"#).unwrap();

        let rooms = load_rooms_file(&path).unwrap();
        assert_eq!(rooms, vec![NewRoom::new("Atlas", "meeting")]);
    }

    #[test]
    fn test_load_rooms_file_rejects_unknown_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("rooms.yaml");
        fs::write(&path, "- name: Atlas\n  type: meeting\n  floor: 3\n").unwrap();

        assert_eq!(load_rooms_file(&path).unwrap_err().kind(), ErrorKind::InvalidInput);
    }
}
