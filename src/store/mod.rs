//! Config Store
//!
//! Owns every config value declared for one JSON file and keeps them in sync
//! with disk. `load` reconciles memory against the file (see [`reconcile`]),
//! `save` writes current values back.
//!
//! I/O and malformed-file failures are logged and swallowed by `load`/`save`;
//! the `try_*` variants surface them as [`ConfigError`].

pub mod persistence;
pub mod reconcile;

pub use reconcile::{LoadOutcome, UnsavedPolicy};

use crate::error::ConfigError;
use crate::listener::ConfigListener;
use crate::types::ConfigType;
use crate::value::{ConfigEntry, ValueCell};
use reconcile::Reconcile;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, info};

/// Result of a save request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Nothing was dirty; disk untouched
    Skipped,
    Written,
    /// The write failed; the error was logged
    Failed,
}

/// Typed config values for one file
pub struct Store {
    file_path: Arc<str>,
    path: PathBuf,
    cells: BTreeMap<String, Box<dyn Reconcile>>,
    can_be_dirty: Arc<AtomicBool>,
    listeners: Vec<Arc<dyn ConfigListener>>,
    policy: UnsavedPolicy,
}

impl Store {
    pub(crate) fn new(file_path: &str, path: PathBuf) -> Self {
        Self {
            file_path: Arc::from(file_path),
            path,
            cells: BTreeMap::new(),
            can_be_dirty: Arc::new(AtomicBool::new(true)),
            listeners: Vec::new(),
            policy: UnsavedPolicy::default(),
        }
    }

    pub(crate) fn file_path_handle(&self) -> Arc<str> {
        Arc::clone(&self.file_path)
    }

    pub(crate) fn tracking_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.can_be_dirty)
    }

    pub(crate) fn register<T: ConfigType>(&mut self, cell: ValueCell<T>) {
        self.cells.insert(cell.key().to_string(), Box::new(cell));
    }

    pub(crate) fn add_listener(&mut self, listener: Arc<dyn ConfigListener>) {
        self.listeners.push(listener);
    }

    pub(crate) fn set_policy(&mut self, policy: UnsavedPolicy) {
        self.policy = policy;
    }

    /// The relative file path
    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    /// Resolved path of the config file
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn unsaved_policy(&self) -> UnsavedPolicy {
        self.policy
    }

    /// Registered keys, in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = &dyn ConfigEntry> {
        self.cells.values().map(|cell| cell.as_entry())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.cells.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&dyn ConfigEntry> {
        self.cells.get(key).map(|cell| cell.as_entry())
    }

    /// Look up a value the caller registered itself.
    pub fn get_or_err(&self, key: &str) -> Result<&dyn ConfigEntry, ConfigError> {
        self.get(key).ok_or_else(|| ConfigError::MissingKey {
            file_path: self.file_path.to_string(),
            key: key.to_string(),
        })
    }

    /// Recover the typed handle for `key`.
    pub fn typed<T: ConfigType>(&self, key: &str) -> Result<ValueCell<T>, ConfigError> {
        let entry = self.get_or_err(key)?;
        entry
            .as_any()
            .downcast_ref::<ValueCell<T>>()
            .cloned()
            .ok_or_else(|| ConfigError::TypeMismatch {
                key: key.to_string(),
                expected: T::KIND.as_str(),
                actual: entry.kind().as_str(),
            })
    }

    pub fn for_each(&self, mut f: impl FnMut(&str, &dyn ConfigEntry)) {
        for (key, cell) in &self.cells {
            f(key, cell.as_entry());
        }
    }

    /// True if any value has unsaved changes.
    pub fn is_dirty(&self) -> bool {
        self.can_be_dirty.load(Ordering::SeqCst) && self.cells.values().any(|c| c.is_dirty())
    }

    /// Current values as a JSON object, as `save()` would write them.
    pub fn snapshot(&self) -> Map<String, Value> {
        self.serialize_cells(false)
    }

    /// Save current values if anything is dirty.
    pub fn save(&self) -> SaveOutcome {
        self.save_with(false, false)
    }

    /// Save default values if anything is dirty.
    pub fn save_defaults(&self) -> SaveOutcome {
        self.save_with(false, true)
    }

    /// Save current values whether or not anything is dirty.
    pub fn save_forced(&self) -> SaveOutcome {
        self.save_with(true, false)
    }

    pub fn save_with(&self, forced: bool, save_defaults: bool) -> SaveOutcome {
        match self.try_save_with(forced, save_defaults) {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(file = %self.file_path, error = %e, "Error occurred while saving config file");
                SaveOutcome::Failed
            }
        }
    }

    pub fn try_save(&self) -> Result<SaveOutcome, ConfigError> {
        self.try_save_with(false, false)
    }

    /// Serialize every value (current or default) and overwrite the file.
    ///
    /// Unless `forced`, does nothing when no value is dirty. Listeners are
    /// notified after every attempted write.
    pub fn try_save_with(
        &self,
        forced: bool,
        save_defaults: bool,
    ) -> Result<SaveOutcome, ConfigError> {
        if !forced && !self.is_dirty() {
            return Ok(SaveOutcome::Skipped);
        }
        if !forced {
            info!(file = %self.file_path, "Saving config file");
        }

        let root = Value::Object(self.serialize_cells(save_defaults));
        let result = persistence::write_json(&self.path, &root);

        if result.is_ok() && !save_defaults {
            for cell in self.cells.values() {
                cell.mark_persisted();
            }
        }

        self.notify_saved();
        result.map(|_| SaveOutcome::Written)
    }

    fn serialize_cells(&self, defaults: bool) -> Map<String, Value> {
        let mut root = Map::new();
        for (key, cell) in &self.cells {
            let entry = cell.as_entry();
            let serialized = if defaults {
                entry.default_json()
            } else {
                entry.current_json()
            };
            if !serialized.is_null() {
                root.insert(key.clone(), serialized);
            }
        }
        root
    }

    fn notify_saved(&self) {
        for listener in &self.listeners {
            listener.on_config_saved(self);
        }
    }

    fn notify_loaded(&self) {
        for listener in &self.listeners {
            listener.on_config_loaded(self);
        }
    }
}

impl PartialEq for Store {
    fn eq(&self, other: &Self) -> bool {
        self.file_path == other.file_path
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("file_path", &self.file_path)
            .field("path", &self.path)
            .field("keys", &self.cells.keys().collect::<Vec<_>>())
            .field("policy", &self.policy)
            .finish()
    }
}

impl fmt::Display for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Config[{}]", self.file_path)
    }
}
