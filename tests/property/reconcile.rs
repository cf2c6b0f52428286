//! Merge rule properties for a single integer value

use confcell::{ConfigRoot, StoreBuilder, UnsavedPolicy};
use proptest::prelude::*;
use proptest::test_runner::{Config, TestRunner};
use serde_json::json;
use tempfile::TempDir;

const DEFAULT: i32 = 420;

fn runner() -> TestRunner {
    TestRunner::new(Config::with_cases(64))
}

/// Disk wins when it holds a non-default; otherwise the unsaved value does.
#[test]
fn test_merge_rule_property() {
    runner()
        .run(
            &(
                prop_oneof![Just(DEFAULT), any::<i32>()],
                proptest::option::of(any::<i32>()),
            ),
            |(on_disk, unsaved)| {
                let dir = TempDir::new().unwrap();
                let mut builder = StoreBuilder::new(&ConfigRoot::new(dir.path()), "prop.json");
                builder.unsaved_policy(UnsavedPolicy::SnapshotCurrent);
                let funny = builder.define_integer("funny", DEFAULT).unwrap();
                let store = builder.build();
                std::fs::write(store.path(), json!({ "funny": on_disk }).to_string()).unwrap();

                if let Some(unsaved) = unsaved {
                    funny.set(unsaved);
                }
                store.load();

                let expected = if on_disk != DEFAULT {
                    on_disk
                } else {
                    unsaved.unwrap_or(DEFAULT)
                };
                prop_assert_eq!(funny.get(), expected);
                if on_disk != DEFAULT {
                    prop_assert!(!store.is_dirty());
                }
                Ok(())
            },
        )
        .unwrap();
}

/// Whatever was saved is what a fresh store loads.
#[test]
fn test_save_load_round_trip_property() {
    runner()
        .run(&(any::<i64>(), "[a-z ]{0,12}"), |(count, name)| {
            let dir = TempDir::new().unwrap();
            let root = ConfigRoot::new(dir.path());

            let mut builder = StoreBuilder::new(&root, "round.json");
            let count_cell = builder.define_long("count", 0).unwrap();
            let name_cell = builder.define_string("name", "anon").unwrap();
            let store = builder.build();
            count_cell.set(count);
            name_cell.set(name.clone());
            store.save_forced();

            let mut builder = StoreBuilder::new(&root, "round.json");
            let count_back = builder.define_long("count", 0).unwrap();
            let name_back = builder.define_string("name", "anon").unwrap();
            let reloaded = builder.build();
            reloaded.load();

            prop_assert_eq!(count_back.get(), count);
            prop_assert_eq!(name_back.get(), name);
            prop_assert!(!reloaded.is_dirty());
            Ok(())
        })
        .unwrap();
}

/// Finite floats survive a save and a load into a fresh store bit for bit.
#[test]
fn test_float_save_load_round_trip_property() {
    let finite_f64 = any::<f64>().prop_filter("finite", |v| v.is_finite());
    let finite_f32 = any::<f32>().prop_filter("finite", |v| v.is_finite());
    TestRunner::new(Config::with_cases(512))
        .run(&(finite_f64, finite_f32), |(ratio, gain)| {
            let dir = TempDir::new().unwrap();
            let root = ConfigRoot::new(dir.path());

            let mut builder = StoreBuilder::new(&root, "floats.json");
            let ratio_cell = builder.define_double("ratio", 1.0).unwrap();
            let gain_cell = builder.define_float("gain", 1.0).unwrap();
            let store = builder.build();
            ratio_cell.set(ratio);
            gain_cell.set(gain);
            store.save_forced();

            let mut builder = StoreBuilder::new(&root, "floats.json");
            let ratio_back = builder.define_double("ratio", 1.0).unwrap();
            let gain_back = builder.define_float("gain", 1.0).unwrap();
            builder.build().load();

            prop_assert_eq!(ratio_back.get(), ratio);
            prop_assert_eq!(gain_back.get(), gain);
            Ok(())
        })
        .unwrap();
}
