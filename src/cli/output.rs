//! CLI output: error mapping and text/json formatting of command results.

use crate::error::ConfigError;
use crate::store::{LoadOutcome, SaveOutcome, Store};
use crate::value::ConfigEntry;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use serde_json::{json, Value};

/// Map domain errors to a string for CLI output.
pub fn map_error(e: &ConfigError) -> String {
    e.to_string()
}

/// Output format of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

impl Format {
    pub fn parse(format: &str) -> Result<Self, ConfigError> {
        match format {
            "text" => Ok(Format::Text),
            "json" => Ok(Format::Json),
            other => Err(ConfigError::Usage(format!(
                "Invalid output format: {} (must be 'text' or 'json')",
                other
            ))),
        }
    }
}

pub fn format_load_result(store: &Store, outcome: &LoadOutcome, format: Format) -> String {
    match format {
        Format::Json => {
            let mut body = match outcome {
                LoadOutcome::Created => json!({ "outcome": "created" }),
                LoadOutcome::Loaded {
                    backfilled,
                    persisted,
                } => json!({
                    "outcome": "loaded",
                    "backfilled": backfilled,
                    "persisted": persisted,
                }),
                LoadOutcome::Failed => json!({ "outcome": "failed" }),
            };
            body["path"] = json!(store.path().display().to_string());
            pretty(&body)
        }
        Format::Text => match outcome {
            LoadOutcome::Created => {
                format!("Created {} with defaults", store.path().display())
            }
            LoadOutcome::Loaded { backfilled, .. } if backfilled.is_empty() => {
                format!("Loaded {}", store.path().display())
            }
            LoadOutcome::Loaded {
                backfilled,
                persisted,
            } => {
                let mut out = format!(
                    "Loaded {}\nBackfilled: {}",
                    store.path().display(),
                    backfilled.join(", ")
                );
                if !persisted {
                    out.push_str("\nWarning: backfilled entries could not be written");
                }
                out
            }
            LoadOutcome::Failed => format!("Failed to load {}", store.path().display()),
        },
    }
}

pub fn format_list(store: &Store, format: Format) -> String {
    match format {
        Format::Json => {
            let entries: Vec<Value> = store.entries().map(entry_json).collect();
            pretty(&Value::Array(entries))
        }
        Format::Text => {
            if store.is_empty() {
                return "No values defined".to_string();
            }
            let mut table = Table::new();
            table.load_preset(UTF8_BORDERS_ONLY);
            table.set_header(vec!["Key", "Type", "Value", "Default", "Range"]);
            for entry in store.entries() {
                let range = entry
                    .bounds_json()
                    .map(|(min, max)| format!("{}..={}", min, max))
                    .unwrap_or_else(|| "-".to_string());
                table.add_row(vec![
                    entry.key().to_string(),
                    entry.kind().to_string(),
                    entry.current_json().to_string(),
                    entry.default_json().to_string(),
                    range,
                ]);
            }
            table.to_string()
        }
    }
}

pub fn format_entry(entry: &dyn ConfigEntry, format: Format) -> String {
    match format {
        Format::Json => pretty(&entry_json(entry)),
        Format::Text => entry.current_json().to_string(),
    }
}

pub fn format_save_result(store: &Store, key: &str, outcome: SaveOutcome) -> String {
    let value = store
        .get(key)
        .map(|entry| entry.current_json().to_string())
        .unwrap_or_default();
    match outcome {
        SaveOutcome::Written => format!("{} = {}", key, value),
        SaveOutcome::Skipped => format!("{} = {} (unchanged)", key, value),
        SaveOutcome::Failed => format!("{} = {} (not saved)", key, value),
    }
}

fn entry_json(entry: &dyn ConfigEntry) -> Value {
    let mut body = json!({
        "key": entry.key(),
        "type": entry.kind(),
        "value": entry.current_json(),
        "default": entry.default_json(),
    });
    if let Some((min, max)) = entry.bounds_json() {
        body["min"] = min;
        body["max"] = max;
    }
    body
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
