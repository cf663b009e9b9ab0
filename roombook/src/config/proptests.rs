//! Property-based tests for configuration merging and validation.

use super::merger::ConfigMerger;
use super::schema::{Config, EstimatorConfig, OutputFormat};
use super::validator::ConfigValidator;
use crate::room::RoomId;
use proptest::prelude::*;

fn output_format_strategy() -> impl Strategy<Value = OutputFormat> {
    prop_oneof![
        Just(OutputFormat::Table),
        Just(OutputFormat::Json),
        Just(OutputFormat::Csv),
    ]
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(prop::collection::btree_set(1i64..500, 0..8)),
        prop::option::of(1u64..=600),
        prop::option::of(prop::option::of(any::<bool>())),
        prop::option::of(output_format_strategy()),
    )
        .prop_map(|(rooms, lock_wait, respect, format)| Config {
            known_rooms: rooms.map(|ids| ids.into_iter().map(RoomId::new).collect()),
            maximum_lock_wait_seconds: lock_wait,
            estimator: respect.map(|respect_eligibility| EstimatorConfig { respect_eligibility }),
            output_format: format,
        })
}

proptest! {
    #[test]
    fn prop_merge_empty_is_identity(config in config_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &Config::default());
        prop_assert_eq!(merged, config);
    }

    #[test]
    fn prop_merge_is_idempotent(base in config_strategy(), layer in config_strategy()) {
        let mut once = base;
        ConfigMerger::merge_into(&mut once, &layer);
        let mut twice = once.clone();
        ConfigMerger::merge_into(&mut twice, &layer);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_set_fields_win(base in config_strategy(), layer in config_strategy()) {
        let mut merged = base.clone();
        ConfigMerger::merge_into(&mut merged, &layer);

        if layer.known_rooms.is_some() {
            prop_assert_eq!(&merged.known_rooms, &layer.known_rooms);
        } else {
            prop_assert_eq!(&merged.known_rooms, &base.known_rooms);
        }
        prop_assert_eq!(
            merged.maximum_lock_wait_seconds,
            layer.maximum_lock_wait_seconds.or(base.maximum_lock_wait_seconds)
        );
        prop_assert_eq!(merged.output_format, layer.output_format.or(base.output_format));
    }

    #[test]
    fn prop_generated_configs_validate(config in config_strategy()) {
        prop_assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn prop_duplicate_room_fails_validation(ids in prop::collection::vec(1i64..100, 1..6), pick in any::<prop::sample::Index>()) {
        let mut rooms: Vec<RoomId> = ids.iter().copied().map(RoomId::new).collect();
        rooms.push(rooms[pick.index(rooms.len())]);
        let config = Config { known_rooms: Some(rooms), ..Default::default() };
        prop_assert!(ConfigValidator::validate(&config).is_err());
    }
}
