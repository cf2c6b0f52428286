//! Load-time reconciliation of memory, disk and defaults.
//!
//! Each value is first *staged* against the JSON read from disk: unsaved
//! changes are snapshotted, the on-disk member is deserialized, and the two
//! are merged. Only after every value is staged does the store disable dirty
//! tracking and apply the merged values, so applying loaded state is never
//! recorded as an unsaved change.
//!
//! Merge rule per key:
//! - on-disk value equal to the default (or absent): the unsaved value wins
//! - on-disk value not equal to the default: the disk wins, the unsaved
//!   change is discarded

use super::{persistence, Store};
use crate::error::ConfigError;
use crate::types::ConfigType;
use crate::value::{ConfigEntry, ValueCell};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::atomic::Ordering;
use tracing::{debug, error, info, warn};

/// What an unsaved change contributes to the merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnsavedPolicy {
    /// Carry the value's current (overridden) value across the load.
    #[default]
    SnapshotCurrent,
    /// Carry the value's default. Dirty values whose on-disk entry is
    /// absent or default revert to their default on load.
    SnapshotDefault,
}

/// Result of a load request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No file existed; defaults were written
    Created,
    /// The file was read. `backfilled` lists declared keys that were absent
    /// and `persisted` records whether the backfill write succeeded.
    Loaded {
        backfilled: Vec<String>,
        persisted: bool,
    },
    /// The file could not be read or parsed; values were left untouched
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Disk,
    Unsaved,
}

/// A merged value waiting to be applied to its cell
pub(crate) trait PendingUpdate {
    fn apply(&self);
    fn serialize(&self) -> Value;
    fn persisted(&self);
}

struct Pending<T: ConfigType> {
    cell: ValueCell<T>,
    value: T,
    origin: Origin,
}

impl<T: ConfigType> PendingUpdate for Pending<T> {
    fn apply(&self) {
        self.cell.set(self.value.clone());
        if self.origin == Origin::Disk {
            self.cell.mark_clean();
        }
    }

    fn serialize(&self) -> Value {
        self.cell.serialize_value(&self.value)
    }

    fn persisted(&self) {
        if self.cell.with(|current| *current == self.value) {
            self.cell.mark_clean();
        }
    }
}

/// Per-key staging result
pub(crate) struct Staged {
    /// Serialized default, when the key was absent or null on disk
    pub(crate) missing: Option<Value>,
    pub(crate) pending: Option<Box<dyn PendingUpdate>>,
}

/// Engine-side capabilities of a stored value
pub(crate) trait Reconcile: ConfigEntry {
    fn as_entry(&self) -> &dyn ConfigEntry;

    fn stage(&self, on_disk: Option<&Value>, policy: UnsavedPolicy) -> Staged;

    fn mark_persisted(&self);
}

impl<T: ConfigType> Reconcile for ValueCell<T> {
    fn as_entry(&self) -> &dyn ConfigEntry {
        self
    }

    fn stage(&self, on_disk: Option<&Value>, policy: UnsavedPolicy) -> Staged {
        stage_cell(self, on_disk, policy)
    }

    fn mark_persisted(&self) {
        self.mark_clean();
    }
}

fn stage_cell<T: ConfigType>(
    cell: &ValueCell<T>,
    on_disk: Option<&Value>,
    policy: UnsavedPolicy,
) -> Staged {
    let unsaved = cell.is_dirty().then(|| match policy {
        UnsavedPolicy::SnapshotCurrent => cell.get(),
        UnsavedPolicy::SnapshotDefault => cell.default_value().clone(),
    });

    let (missing, parsed) = match on_disk {
        Some(json) if !json.is_null() => {
            let default = cell.default_value().clone();
            let deserialized = cell.serializer().deserialize(default, json);
            let parsed = (!cell.is_default_value(&deserialized)).then_some(deserialized);
            (None, parsed)
        }
        _ => (Some(cell.serialize_default()), None),
    };

    let merged = match (parsed, unsaved) {
        (Some(parsed), Some(unsaved)) if cell.is_default_value(&parsed) => {
            Some((unsaved, Origin::Unsaved))
        }
        (Some(parsed), _) => Some((parsed, Origin::Disk)),
        (None, Some(unsaved)) => Some((unsaved, Origin::Unsaved)),
        (None, None) => None,
    };

    Staged {
        missing,
        pending: merged.map(|(value, origin)| {
            Box::new(Pending {
                cell: cell.clone(),
                value,
                origin,
            }) as Box<dyn PendingUpdate>
        }),
    }
}

impl Store {
    /// Reconcile in-memory values with the file on disk.
    ///
    /// Never fails past the call boundary: read failures are logged and
    /// reported as [`LoadOutcome::Failed`]. Listeners are notified exactly
    /// once.
    pub fn load(&self) -> LoadOutcome {
        match self.try_load() {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(file = %self.file_path, error = %e, "Error occurred while loading config file");
                LoadOutcome::Failed
            }
        }
    }

    /// Like [`Store::load`], but returns read and parse failures.
    pub fn try_load(&self) -> Result<LoadOutcome, ConfigError> {
        let result = self.reconcile();
        self.notify_loaded();
        result
    }

    fn reconcile(&self) -> Result<LoadOutcome, ConfigError> {
        info!(file = %self.file_path, "Loading config file");

        if !self.path.exists() {
            info!(
                file = %self.file_path,
                "Config file does not exist, saving defaults to disk"
            );
            self.try_save_with(true, true)?;
            return Ok(LoadOutcome::Created);
        }

        let root = persistence::read_object(&self.path).map_err(|e| {
            if matches!(e, ConfigError::Malformed { .. }) {
                warn!(file = %self.file_path, "Config file is not a valid JSON object");
            }
            e
        })?;

        let staged: Vec<(&str, &dyn Reconcile, Staged)> = self
            .cells
            .iter()
            .map(|(key, cell)| {
                let staged = cell.stage(root.get(key), self.policy);
                (key.as_str(), &**cell, staged)
            })
            .collect();

        self.can_be_dirty.store(false, Ordering::SeqCst);
        for (_, _, staged) in &staged {
            if let Some(pending) = &staged.pending {
                pending.apply();
            }
        }
        self.can_be_dirty.store(true, Ordering::SeqCst);

        let backfilled: Vec<String> = staged
            .iter()
            .filter(|(_, _, s)| s.missing.is_some())
            .map(|(key, _, _)| key.to_string())
            .collect();

        if backfilled.is_empty() {
            return Ok(LoadOutcome::Loaded {
                backfilled,
                persisted: true,
            });
        }

        debug!(
            file = %self.file_path,
            missing = ?backfilled,
            "Detected missing config entries, writing them to disk"
        );

        let persisted = match persistence::write_json(&self.path, &write_back(&staged)) {
            Ok(()) => {
                for (_, _, staged) in &staged {
                    if let (None, Some(pending)) = (&staged.missing, &staged.pending) {
                        pending.persisted();
                    }
                }
                true
            }
            Err(e) => {
                error!(file = %self.file_path, error = %e, "Error occurred while writing config file");
                false
            }
        };

        Ok(LoadOutcome::Loaded {
            backfilled,
            persisted,
        })
    }
}

/// Missing keys get their default; every other declared key its merged
/// value, or its default when disk already held the default.
fn write_back(staged: &[(&str, &dyn Reconcile, Staged)]) -> Value {
    let mut out = Map::new();
    for (key, cell, staged) in staged {
        let serialized = match (&staged.missing, &staged.pending) {
            (Some(default), _) => default.clone(),
            (None, Some(pending)) => pending.serialize(),
            (None, None) => cell.default_json(),
        };
        if !serialized.is_null() {
            out.insert(key.to_string(), serialized);
        }
    }
    Value::Object(out)
}
