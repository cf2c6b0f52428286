//! CLI route: single route table and run context.

use crate::builder::StoreBuilder;
use crate::cli::output::{
    format_entry, format_list, format_load_result, format_save_result, Format,
};
use crate::cli::parse::Commands;
use crate::error::ConfigError;
use crate::listener::{ConfigListener, LoggingListener};
use crate::root::ConfigRoot;
use crate::schema::Schema;
use crate::settings::CliSettings;
use crate::store::{Store, UnsavedPolicy};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Where the run context finds its schema and store file.
#[derive(Debug, Clone, Default)]
pub struct StoreSelection {
    pub root: Option<PathBuf>,
    pub schema: Option<PathBuf>,
    pub file: Option<String>,
    pub legacy_unsaved: bool,
}

/// Runtime context for CLI execution: the store built from the schema.
pub struct RunContext {
    store: Store,
}

impl RunContext {
    /// Build the store from the selection, falling back to settings.
    pub fn new(selection: &StoreSelection, settings: &CliSettings) -> Result<Self, ConfigError> {
        let schema_path = selection
            .schema
            .clone()
            .or_else(|| settings.schema.clone())
            .ok_or_else(|| {
                ConfigError::Usage("No schema given (use --schema or the `schema` setting)".into())
            })?;
        let schema = Schema::from_path(&schema_path)?;

        let root = match selection.root.clone().or_else(|| settings.configs_dir.clone()) {
            Some(dir) => ConfigRoot::new(dir),
            None => ConfigRoot::platform("confcell")?,
        };

        let file = selection
            .file
            .clone()
            .or_else(|| schema.file.clone())
            .ok_or_else(|| {
                ConfigError::Usage("No store file given (use --file or set `file` in the schema)".into())
            })?;

        let policy = if selection.legacy_unsaved {
            UnsavedPolicy::SnapshotDefault
        } else {
            settings.unsaved_policy
        };

        debug!(
            schema = %schema_path.display(),
            configs_dir = %root.configs_dir().display(),
            file = %file,
            "Building store"
        );

        let mut builder = StoreBuilder::new(&root, &file);
        builder
            .unsaved_policy(policy)
            .listener(Arc::new(LoggingListener) as Arc<dyn ConfigListener>);
        schema.apply(&mut builder)?;

        Ok(Self::from_store(builder.build()))
    }

    pub fn from_store(store: Store) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ConfigError> {
        match command {
            Commands::Load { format } => {
                let format = Format::parse(format)?;
                let outcome = self.store.try_load()?;
                Ok(format_load_result(&self.store, &outcome, format))
            }
            Commands::List { format } => {
                let format = Format::parse(format)?;
                self.store.try_load()?;
                Ok(format_list(&self.store, format))
            }
            Commands::Get { key, format } => {
                let format = Format::parse(format)?;
                self.store.try_load()?;
                let entry = self.store.get_or_err(key)?;
                Ok(format_entry(entry, format))
            }
            Commands::Set { key, value } => {
                self.store.try_load()?;
                let entry = self.store.get_or_err(key)?;
                entry.set_json(&parse_literal(value))?;
                let outcome = self.store.try_save()?;
                Ok(format_save_result(&self.store, key, outcome))
            }
            Commands::Reset { key } => {
                self.store.try_load()?;
                self.store.get_or_err(key)?.reset();
                let outcome = self.store.try_save()?;
                Ok(format_save_result(&self.store, key, outcome))
            }
            Commands::WriteDefaults => {
                self.store.try_save_with(true, true)?;
                Ok(format!("Wrote defaults to {}", self.store.path().display()))
            }
            Commands::Path => Ok(self.store.path().display().to_string()),
        }
    }
}

/// JSON literal, or the raw text as a JSON string.
fn parse_literal(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
