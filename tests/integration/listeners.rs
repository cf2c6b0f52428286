//! Listener notification order and frequency

use super::test_utils::{write_json, Recorder};
use confcell::{ConfigRoot, LoadOutcome, SaveOutcome, StoreBuilder};
use parking_lot::Mutex;
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;

fn build(dir: &TempDir, log: &Arc<Mutex<Vec<String>>>) -> (confcell::Store, confcell::IntegerValue) {
    let mut builder = StoreBuilder::new(&ConfigRoot::new(dir.path()), "events.json");
    builder
        .listener(Recorder::new("first", log))
        .listener(Recorder::new("second", log));
    let funny = builder.define_integer("funny", 420).unwrap();
    (builder.build(), funny)
}

fn take(log: &Arc<Mutex<Vec<String>>>) -> Vec<String> {
    std::mem::take(&mut *log.lock())
}

#[test]
fn test_load_notifies_each_listener_once_in_order() {
    let dir = TempDir::new().unwrap();
    let log = Arc::new(Mutex::new(Vec::new()));
    let (store, _) = build(&dir, &log);
    write_json(store.path(), &json!({ "funny": 69 }));

    store.load();
    assert_eq!(
        take(&log),
        vec!["first:loaded:events.json", "second:loaded:events.json"]
    );
}

#[test]
fn test_first_run_notifies_save_then_load() {
    let dir = TempDir::new().unwrap();
    let log = Arc::new(Mutex::new(Vec::new()));
    let (store, _) = build(&dir, &log);

    assert_eq!(store.load(), LoadOutcome::Created);
    assert_eq!(
        take(&log),
        vec![
            "first:saved:events.json",
            "second:saved:events.json",
            "first:loaded:events.json",
            "second:loaded:events.json",
        ]
    );
}

#[test]
fn test_backfill_does_not_notify_save() {
    let dir = TempDir::new().unwrap();
    let log = Arc::new(Mutex::new(Vec::new()));
    let (store, _) = build(&dir, &log);
    write_json(store.path(), &json!({}));

    store.load();
    assert_eq!(
        take(&log),
        vec!["first:loaded:events.json", "second:loaded:events.json"]
    );
}

#[test]
fn test_failed_load_still_notifies() {
    let dir = TempDir::new().unwrap();
    let log = Arc::new(Mutex::new(Vec::new()));
    let (store, _) = build(&dir, &log);
    std::fs::write(store.path(), "[]").unwrap();

    assert_eq!(store.load(), LoadOutcome::Failed);
    assert_eq!(take(&log).len(), 2);
}

#[test]
fn test_save_notifies_only_when_written() {
    let dir = TempDir::new().unwrap();
    let log = Arc::new(Mutex::new(Vec::new()));
    let (store, funny) = build(&dir, &log);

    assert_eq!(store.save(), SaveOutcome::Skipped);
    assert!(take(&log).is_empty());

    funny.set(1);
    assert_eq!(store.save(), SaveOutcome::Written);
    assert_eq!(
        take(&log),
        vec!["first:saved:events.json", "second:saved:events.json"]
    );

    assert_eq!(store.save_forced(), SaveOutcome::Written);
    assert_eq!(take(&log).len(), 2);
}

#[test]
fn test_failed_save_still_notifies() {
    let dir = TempDir::new().unwrap();
    let log = Arc::new(Mutex::new(Vec::new()));
    let (store, funny) = build(&dir, &log);
    std::fs::create_dir_all(store.path()).unwrap();

    funny.set(1);
    assert_eq!(store.save(), SaveOutcome::Failed);
    assert_eq!(take(&log).len(), 2);
}
