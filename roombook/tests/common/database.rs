//! Shared database test utilities.

use std::path::{Path, PathBuf};

use roombook::clock::FixedClock;
use roombook::database::{Database, DatabaseConfig};
use roombook::operations::{create_rooms, register_user};
use roombook::{BookingAllocator, KnownRooms, NewRoom, NewUser, Room, User};

use super::at;

/// A data directory holding rooms One, Two and Three (only Two allows
/// full-day bookings) and a single registered user.
#[allow(dead_code)]
pub struct Scenario {
    pub dir: tempfile::TempDir,
    pub db: Database,
    pub user: User,
    pub rooms: Vec<Room>,
}

#[allow(dead_code)]
impl Scenario {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let mut db = Database::open(DatabaseConfig::in_data_dir(dir.path())).unwrap();

        let user = register_user(
            &mut db,
            &NewUser::new("Booker", "booker@example.com", "pw").unwrap(),
            &clock(),
        )
        .unwrap();

        let rooms = create_rooms(
            &mut db,
            &[
                NewRoom::new("One", "meeting"),
                NewRoom::new("Two", "meeting").with_full_day_allowed(true),
                NewRoom::new("Three", "meeting"),
            ],
        )
        .unwrap();

        Self {
            dir,
            db,
            user,
            rooms,
        }
    }

    pub fn data_dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn database_path(&self) -> PathBuf {
        DatabaseConfig::in_data_dir(self.dir.path()).path
    }

    pub fn known(&self) -> KnownRooms {
        self.rooms.iter().map(|room| room.id).collect()
    }

    pub fn allocator(&self) -> BookingAllocator<FixedClock> {
        BookingAllocator::with_clock(clock(), self.known())
    }
}

/// Clock pinned to 07:00 on the scenario day.
#[allow(dead_code)]
pub fn clock() -> FixedClock {
    FixedClock::new(at(7, 0))
}
