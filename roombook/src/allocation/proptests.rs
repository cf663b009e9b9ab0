//! Property-based tests for room allocation.
//!
//! Random request sequences are replayed against a fresh store and the
//! stored result is checked against the allocation invariants.

use std::collections::BTreeSet;

use chrono::TimeDelta;
use proptest::prelude::*;

use super::{find_available_rooms, next_available, BookingAllocator, EstimatorScope};
use crate::booking::BookingRequest;
use crate::clock::FixedClock;
use crate::database::test_util::{at, create_test_database, seed_room, seed_user};
use crate::database::Database;
use crate::error::ErrorKind;
use crate::interval::Interval;
use crate::room::{KnownRooms, RoomId};

// ============================================================================
// STRATEGY DEFINITIONS
// ============================================================================

/// A request on the scenario day: optional room index, start in half hours
/// after 08:00, and length in half hours.
fn request_strategy() -> impl Strategy<Value = (Option<usize>, u32, u32)> {
    (
        proptest::option::of(0usize..6),
        0u32..20,
        1u32..=6,
    )
}

fn half_hours(start: u32, length: u32) -> Interval {
    let from = at(8, 0) + TimeDelta::minutes(i64::from(start) * 30);
    Interval::new(from, from + TimeDelta::minutes(i64::from(length) * 30)).unwrap()
}

/// Replays `requests` with `rooms` stored rooms, of which the ones selected
/// by `known_mask` are known. Returns the database and every stored room id.
fn replay(
    rooms: usize,
    known_mask: &[bool],
    requests: &[(Option<usize>, u32, u32)],
) -> (Database, Vec<RoomId>, KnownRooms) {
    let mut db = create_test_database();
    let user = seed_user(&db, "prop@example.com");
    let ids: Vec<RoomId> = (0..rooms)
        .map(|i| seed_room(&db, &format!("Room {i}"), false).id)
        .collect();
    let known: KnownRooms = ids
        .iter()
        .zip(known_mask)
        .filter(|(_, known)| **known)
        .map(|(id, _)| *id)
        .collect();

    let allocator = BookingAllocator::with_clock(FixedClock::new(at(7, 0)), known.clone());
    for (room, start, length) in requests {
        let interval = half_hours(*start, *length);
        let request = BookingRequest::new(user.id)
            .with_room(room.and_then(|i| ids.get(i).copied()))
            .with_start(Some(interval.start()))
            .with_end(Some(interval.end()));
        match allocator.allocate(&mut db, &request) {
            Ok(_) => {}
            Err(e) => assert!(
                matches!(e.kind(), ErrorKind::Conflict | ErrorKind::NotFound),
                "unexpected error {e}"
            ),
        }
    }

    (db, ids, known)
}

// ============================================================================
// PROPERTY 1: NO DOUBLE-BOOKING
// ============================================================================

proptest! {
    #[test]
    fn prop_stored_bookings_never_overlap(
        rooms in 1usize..=5,
        known_mask in proptest::collection::vec(any::<bool>(), 5),
        requests in proptest::collection::vec(request_strategy(), 0..25),
    ) {
        let (db, _, _) = replay(rooms, &known_mask, &requests);
        let bookings = Database::list_bookings(db.connection()).unwrap();

        for (i, a) in bookings.iter().enumerate() {
            for b in &bookings[i + 1..] {
                prop_assert!(
                    a.room_id != b.room_id || !a.interval.overlaps(&b.interval),
                    "bookings {} and {} overlap", a.id, b.id
                );
            }
        }
    }
}

// ============================================================================
// PROPERTY 2: ONLY KNOWN ROOMS ARE BOOKED
// ============================================================================

proptest! {
    #[test]
    fn prop_only_known_rooms_are_booked(
        rooms in 1usize..=5,
        known_mask in proptest::collection::vec(any::<bool>(), 5),
        requests in proptest::collection::vec(request_strategy(), 0..25),
    ) {
        let (db, _, known) = replay(rooms, &known_mask, &requests);

        for booking in Database::list_bookings(db.connection()).unwrap() {
            prop_assert!(known.contains(booking.room_id));
        }
    }
}

// ============================================================================
// PROPERTY 3: FINDER AGREES WITH A BRUTE-FORCE SCAN
// ============================================================================

proptest! {
    #[test]
    fn prop_finder_matches_brute_force(
        requests in proptest::collection::vec(request_strategy(), 0..25),
        probe in request_strategy(),
    ) {
        let (db, ids, _) = replay(5, &[true; 5], &requests);
        let window = half_hours(probe.1, probe.2);
        let candidates: BTreeSet<RoomId> = ids.iter().copied().collect();

        let bookings = Database::list_bookings(db.connection()).unwrap();
        let expected: BTreeSet<RoomId> = ids
            .iter()
            .copied()
            .filter(|id| {
                !bookings
                    .iter()
                    .any(|b| b.room_id == *id && b.interval.overlaps(&window))
            })
            .collect();

        let free = find_available_rooms(db.connection(), &window, &candidates).unwrap();
        prop_assert_eq!(free, expected);
    }
}

// ============================================================================
// PROPERTY 4: ESTIMATOR RETURNS THE EARLIEST END AFTER T
// ============================================================================

proptest! {
    #[test]
    fn prop_estimator_returns_earliest_end(
        requests in proptest::collection::vec(request_strategy(), 0..25),
        probe in 0u32..24,
    ) {
        let (db, _, known) = replay(5, &[true; 5], &requests);
        let after = at(8, 0) + TimeDelta::minutes(i64::from(probe) * 30);
        let bookings = Database::list_bookings(db.connection()).unwrap();

        let earliest = bookings
            .iter()
            .map(|b| b.interval.end())
            .filter(|end| *end > after)
            .min();
        let next = next_available(db.connection(), after, EstimatorScope::AllRooms, known.ids())
            .unwrap();

        prop_assert_eq!(next.map(|n| n.free_at), earliest);
        if let Some(next) = next {
            prop_assert!(bookings
                .iter()
                .any(|b| b.room_id == next.room_id && b.interval.end() == next.free_at));
        }
    }
}
