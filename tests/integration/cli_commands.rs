//! CLI route table against a schema-driven store

use super::test_utils::read_json;
use confcell::cli::{Cli, Commands, RunContext, StoreSelection};
use confcell::settings::CliSettings;
use confcell::ConfigError;
use clap::Parser;
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const SCHEMA: &str = r#"
file = "client.json"

[[value]]
key = "username"
type = "string"
default = "player"

[[value]]
key = "volume"
type = "float"
default = 0.5
min = 0.0
max = 1.0
"#;

struct Fixture {
    _dir: TempDir,
    configs: PathBuf,
    context: RunContext,
}

fn fixture() -> Fixture {
    let dir = TempDir::new().unwrap();
    let schema = dir.path().join("client.toml");
    fs::write(&schema, SCHEMA).unwrap();
    let configs = dir.path().join("configs");

    let selection = StoreSelection {
        root: Some(configs.clone()),
        schema: Some(schema),
        ..StoreSelection::default()
    };
    let context = RunContext::new(&selection, &CliSettings::default()).unwrap();
    Fixture {
        _dir: dir,
        configs,
        context,
    }
}

fn load_format(format: &str) -> Commands {
    Commands::Load {
        format: format.to_string(),
    }
}

#[test]
fn test_path_and_load() {
    let fx = fixture();
    let path = fx.configs.join("client.json");

    let out = fx.context.execute(&Commands::Path).unwrap();
    assert_eq!(out, path.display().to_string());

    let out = fx.context.execute(&load_format("text")).unwrap();
    assert!(out.starts_with("Created"));
    assert_eq!(read_json(&path), json!({ "username": "player", "volume": 0.5 }));

    let out = fx.context.execute(&load_format("json")).unwrap();
    let json: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["outcome"], "loaded");
    assert_eq!(json["backfilled"], json!([]));
}

#[test]
fn test_set_get_reset() {
    let fx = fixture();
    let path = fx.configs.join("client.json");

    let out = fx
        .context
        .execute(&Commands::Set {
            key: "volume".to_string(),
            value: "0.75".to_string(),
        })
        .unwrap();
    assert_eq!(out, "volume = 0.75");
    assert_eq!(read_json(&path)["volume"], 0.75);

    fx.context
        .execute(&Commands::Set {
            key: "username".to_string(),
            value: "steve".to_string(),
        })
        .unwrap();
    let out = fx
        .context
        .execute(&Commands::Get {
            key: "username".to_string(),
            format: "text".to_string(),
        })
        .unwrap();
    assert_eq!(out, "\"steve\"");

    let out = fx
        .context
        .execute(&Commands::Reset {
            key: "volume".to_string(),
        })
        .unwrap();
    assert_eq!(out, "volume = 0.5");
    assert_eq!(read_json(&path)["volume"], 0.5);
}

#[test]
fn test_set_same_value_is_unchanged() {
    let fx = fixture();
    let out = fx
        .context
        .execute(&Commands::Set {
            key: "username".to_string(),
            value: "player".to_string(),
        })
        .unwrap();
    assert_eq!(out, "username = \"player\" (unchanged)");
}

#[test]
fn test_set_rejects_wrong_type_and_unknown_key() {
    let fx = fixture();
    let err = fx
        .context
        .execute(&Commands::Set {
            key: "volume".to_string(),
            value: "\"loud\"".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { expected: "float", .. }));

    let err = fx
        .context
        .execute(&Commands::Get {
            key: "nope".to_string(),
            format: "text".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, ConfigError::MissingKey { .. }));
}

#[test]
fn test_list_json_and_write_defaults() {
    let fx = fixture();
    let path = fx.configs.join("client.json");
    fs::create_dir_all(&fx.configs).unwrap();
    fs::write(&path, r#"{ "username": "alex", "volume": 0.2 }"#).unwrap();

    let out = fx
        .context
        .execute(&Commands::List {
            format: "json".to_string(),
        })
        .unwrap();
    let json: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json[0]["value"], "alex");
    assert_eq!(json[1]["value"], 0.2);
    assert_eq!(json[1]["max"], 1.0);

    fx.context.execute(&Commands::WriteDefaults).unwrap();
    assert_eq!(read_json(&path), json!({ "username": "player", "volume": 0.5 }));
}

#[test]
fn test_malformed_file_is_command_error() {
    let fx = fixture();
    fs::create_dir_all(&fx.configs).unwrap();
    fs::write(fx.configs.join("client.json"), "not json").unwrap();

    let err = fx.context.execute(&load_format("text")).unwrap_err();
    assert!(matches!(err, ConfigError::Malformed { .. }));
}

#[test]
fn test_invalid_output_format() {
    let fx = fixture();
    let err = fx.context.execute(&load_format("yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::Usage(_)));
}

#[test]
fn test_cli_parse_selection() {
    let cli = Cli::try_parse_from([
        "confcell",
        "--schema",
        "video.toml",
        "--root",
        "/srv/configs",
        "--file",
        "other.json",
        "--legacy-unsaved",
        "set",
        "fov",
        "100",
    ])
    .unwrap();
    let selection = cli.selection();
    assert_eq!(selection.schema, Some(PathBuf::from("video.toml")));
    assert_eq!(selection.root, Some(PathBuf::from("/srv/configs")));
    assert_eq!(selection.file.as_deref(), Some("other.json"));
    assert!(selection.legacy_unsaved);
    assert_eq!(
        cli.command,
        Commands::Set {
            key: "fov".to_string(),
            value: "100".to_string()
        }
    );

    let cli = Cli::try_parse_from(["confcell", "write-defaults"]).unwrap();
    assert_eq!(cli.command, Commands::WriteDefaults);
}
