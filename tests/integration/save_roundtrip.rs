//! Saving and reloading through a fresh store

use super::test_utils::{read_json, sample_store};
use confcell::{ConfigRoot, SaveOutcome, UnsavedPolicy};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_saved_values_reload_into_fresh_store() {
    let dir = TempDir::new().unwrap();
    let root = ConfigRoot::new(dir.path());

    let sample = sample_store(&root, UnsavedPolicy::default());
    sample.store.load();
    sample.hello.set("there".to_string());
    sample.funny.set(-12);
    sample.i_am_a_bool.set(false);
    sample.i_am_a_double.set(0.1);
    sample.i_am_a_float.set(0.3);
    assert_eq!(sample.store.save(), SaveOutcome::Written);
    assert!(!sample.store.is_dirty());

    let reloaded = sample_store(&root, UnsavedPolicy::default());
    reloaded.store.load();
    assert_eq!(reloaded.hello.get(), "there");
    assert_eq!(reloaded.funny.get(), -12);
    assert!(!reloaded.i_am_a_bool.get());
    assert_eq!(reloaded.i_am_a_double.get(), 0.1);
    assert_eq!(reloaded.i_am_a_float.get(), 0.3);
    assert!(!reloaded.store.is_dirty());
}

#[test]
fn test_double_needing_all_digits_reloads_exactly() {
    let dir = TempDir::new().unwrap();
    let root = ConfigRoot::new(dir.path());
    let value = -2.355386547219568e-35;

    let sample = sample_store(&root, UnsavedPolicy::default());
    sample.i_am_a_double.set(value);
    sample.i_am_a_float.set(f32::MIN_POSITIVE);
    assert_eq!(sample.store.save(), SaveOutcome::Written);

    let reloaded = sample_store(&root, UnsavedPolicy::default());
    reloaded.store.load();
    assert_eq!(reloaded.i_am_a_double.get(), value);
    assert_eq!(reloaded.i_am_a_float.get(), f32::MIN_POSITIVE);
}

#[test]
fn test_file_is_pretty_sorted_with_trailing_newline() {
    let dir = TempDir::new().unwrap();
    let sample = sample_store(&ConfigRoot::new(dir.path()), UnsavedPolicy::default());
    sample.i_am_a_float.set(0.1);
    sample.store.save();

    let contents = fs::read_to_string(sample.store.path()).unwrap();
    let expected = r#"{
  "funny": 420,
  "hello": "world",
  "i_am_a_bool": true,
  "i_am_a_double": 1.0,
  "i_am_a_float": 0.1,
  "some_config": "some_other_value"
}
"#;
    assert_eq!(contents, expected);
}

#[test]
fn test_save_forced_writes_clean_store() {
    let dir = TempDir::new().unwrap();
    let sample = sample_store(&ConfigRoot::new(dir.path()), UnsavedPolicy::default());
    assert_eq!(sample.store.save(), SaveOutcome::Skipped);
    assert_eq!(sample.store.save_forced(), SaveOutcome::Written);
    assert_eq!(read_json(sample.store.path())["hello"], "world");
}

#[test]
fn test_save_defaults_writes_defaults_and_keeps_overrides() {
    let dir = TempDir::new().unwrap();
    let sample = sample_store(&ConfigRoot::new(dir.path()), UnsavedPolicy::default());
    sample.funny.set(1);

    assert_eq!(sample.store.save_defaults(), SaveOutcome::Written);
    assert_eq!(read_json(sample.store.path())["funny"], 420);
    assert_eq!(sample.funny.get(), 1);
    assert!(sample.store.is_dirty());
}

#[test]
fn test_non_finite_values_are_skipped_on_save() {
    let dir = TempDir::new().unwrap();
    let root = ConfigRoot::new(dir.path());
    let sample = sample_store(&root, UnsavedPolicy::default());
    sample.i_am_a_double.set(f64::NAN);
    sample.store.save();

    let json = read_json(sample.store.path());
    assert!(json.get("i_am_a_double").is_none());
    assert_eq!(json["funny"], 420);

    let reloaded = sample_store(&root, UnsavedPolicy::default());
    reloaded.store.load();
    assert_eq!(reloaded.i_am_a_double.get(), 1.0);
    assert_eq!(read_json(reloaded.store.path())["i_am_a_double"], 1.0);
}

#[test]
fn test_snapshot_matches_saved_file() {
    let dir = TempDir::new().unwrap();
    let sample = sample_store(&ConfigRoot::new(dir.path()), UnsavedPolicy::default());
    sample.some_config.set("changed".to_string());
    let snapshot = sample.store.snapshot();
    sample.store.save();
    assert_eq!(serde_json::Value::Object(snapshot), read_json(sample.store.path()));
}
