//! Schema-driven stores

use super::test_utils::read_json;
use confcell::{ConfigRoot, LoadOutcome, Schema, ValueKind};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

const SCHEMA: &str = r#"
file = "client/video.json"

[[value]]
key = "fov"
type = "integer"
default = 90
min = 30
max = 120

[[value]]
key = "gamma"
type = "double"
default = 1.0

[[value]]
key = "fullscreen"
type = "boolean"
default = false

[[value]]
key = "renderer"
type = "string"
default = "vulkan"
"#;

#[test]
fn test_schema_from_path_builds_loadable_store() {
    let dir = TempDir::new().unwrap();
    let schema_path = dir.path().join("video.toml");
    fs::write(&schema_path, SCHEMA).unwrap();

    let schema = Schema::from_path(&schema_path).unwrap();
    let store = schema.build(&ConfigRoot::from_root(dir.path())).unwrap();
    assert_eq!(store.path(), dir.path().join("config/client/video.json"));

    assert_eq!(store.load(), LoadOutcome::Created);
    assert_eq!(
        read_json(store.path()),
        json!({ "fov": 90, "fullscreen": false, "gamma": 1.0, "renderer": "vulkan" })
    );

    let kinds: Vec<ValueKind> = store.entries().map(|e| e.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            ValueKind::Integer,
            ValueKind::Boolean,
            ValueKind::Double,
            ValueKind::String
        ]
    );
}

#[test]
fn test_schema_store_reads_existing_values() {
    let dir = TempDir::new().unwrap();
    let root = ConfigRoot::new(dir.path());
    let schema = Schema::from_toml_str(SCHEMA).unwrap();

    let first = schema.build(&root).unwrap();
    first.load();
    first.typed::<i32>("fov").unwrap().set(110);
    first.save();

    let second = schema.build(&root).unwrap();
    second.load();
    let fov = second.typed::<i32>("fov").unwrap();
    assert_eq!(fov.get(), 110);
    assert_eq!((fov.min(), fov.max()), (30, 120));
    assert_eq!(
        second.get("fov").unwrap().bounds_json(),
        Some((json!(30), json!(120)))
    );
}

#[test]
fn test_schema_read_error_for_missing_file() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        Schema::from_path(&dir.path().join("absent.toml")),
        Err(confcell::ConfigError::Read { .. })
    ));
}
