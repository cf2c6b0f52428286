//! Listener hooks notified after a store loads or saves.
//!
//! Listeners are registered explicitly on the builder and invoked
//! synchronously, in registration order, once the operation reaches a
//! terminal state (including failed reads and writes).

use crate::store::Store;
use tracing::debug;

pub trait ConfigListener: Send + Sync {
    /// Invoked once per `load()`.
    fn on_config_loaded(&self, _store: &Store) {}

    /// Invoked after every attempted write from `save()`.
    fn on_config_saved(&self, _store: &Store) {}
}

/// Emits a debug event for every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingListener;

impl ConfigListener for LoggingListener {
    fn on_config_loaded(&self, store: &Store) {
        debug!(file = %store.file_path(), dirty = store.is_dirty(), "Config loaded");
    }

    fn on_config_saved(&self, store: &Store) {
        debug!(file = %store.file_path(), "Config saved");
    }
}
