//! Store builder
//!
//! Registers config values against a store under construction. Every typed
//! `define_*` helper is sugar over [`StoreBuilder::define`]. `build()`
//! consumes the builder, so a built store is closed for registration.

use crate::error::ConfigError;
use crate::listener::ConfigListener;
use crate::root::ConfigRoot;
use crate::store::{Store, UnsavedPolicy};
use crate::types::{ConfigType, Numeric};
use crate::value::{CellContext, CellSpec, ValueCell};
use std::path::PathBuf;
use std::sync::Arc;

pub struct StoreBuilder {
    store: Store,
}

impl StoreBuilder {
    /// Start a store for `file_path`, resolved against `root`.
    pub fn new(root: &ConfigRoot, file_path: &str) -> Self {
        Self::at_path(file_path, root.resolve(file_path))
    }

    /// Start a store with an explicit resolved path.
    pub fn at_path(file_path: &str, path: impl Into<PathBuf>) -> Self {
        Self {
            store: Store::new(file_path, path.into()),
        }
    }

    pub fn file_path(&self) -> &str {
        self.store.file_path()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.store.contains_key(key)
    }

    /// Register a listener; listeners run in registration order.
    pub fn listener(&mut self, listener: Arc<dyn ConfigListener>) -> &mut Self {
        self.store.add_listener(listener);
        self
    }

    pub fn unsaved_policy(&mut self, policy: UnsavedPolicy) -> &mut Self {
        self.store.set_policy(policy);
        self
    }

    /// Build a value with `factory` and register it under `key`.
    ///
    /// Fails with [`ConfigError::DuplicateKey`] if `key` is already
    /// registered; the factory is not invoked in that case.
    pub fn define<T, F>(&mut self, key: &str, factory: F) -> Result<ValueCell<T>, ConfigError>
    where
        T: ConfigType,
        F: FnOnce(CellContext) -> ValueCell<T>,
    {
        if self.store.contains_key(key) {
            return Err(ConfigError::DuplicateKey {
                file_path: self.store.file_path().to_string(),
                key: key.to_string(),
            });
        }

        let context = CellContext::new(
            key.to_string(),
            self.store.file_path_handle(),
            self.store.tracking_handle(),
        );
        let cell = factory(context);
        self.store.register(cell.clone());
        Ok(cell)
    }

    pub fn define_value<T: ConfigType>(
        &mut self,
        key: &str,
        spec: CellSpec<T>,
    ) -> Result<ValueCell<T>, ConfigError> {
        self.define(key, |context| ValueCell::from_spec(context, spec))
    }

    pub fn define_string(
        &mut self,
        key: &str,
        default: impl Into<String>,
    ) -> Result<ValueCell<String>, ConfigError> {
        self.define_value(key, CellSpec::new(default.into()))
    }

    pub fn define_boolean(
        &mut self,
        key: &str,
        default: bool,
    ) -> Result<ValueCell<bool>, ConfigError> {
        self.define_value(key, CellSpec::new(default))
    }

    /// Numeric value with explicit bounds.
    pub fn define_numeric<T: Numeric>(
        &mut self,
        key: &str,
        default: T,
        min: T,
        max: T,
    ) -> Result<ValueCell<T>, ConfigError> {
        self.define_value(key, CellSpec::new(default).range(min, max))
    }

    /// Full-range numeric helpers: no bounds are stored, `min()`/`max()`
    /// report the type's range.
    pub fn define_integer(&mut self, key: &str, default: i32) -> Result<ValueCell<i32>, ConfigError> {
        self.define_value(key, CellSpec::new(default))
    }

    pub fn define_long(&mut self, key: &str, default: i64) -> Result<ValueCell<i64>, ConfigError> {
        self.define_value(key, CellSpec::new(default))
    }

    pub fn define_float(&mut self, key: &str, default: f32) -> Result<ValueCell<f32>, ConfigError> {
        self.define_value(key, CellSpec::new(default))
    }

    pub fn define_double(&mut self, key: &str, default: f64) -> Result<ValueCell<f64>, ConfigError> {
        self.define_value(key, CellSpec::new(default))
    }

    pub fn define_string_with(
        &mut self,
        key: &str,
        spec: CellSpec<String>,
    ) -> Result<ValueCell<String>, ConfigError> {
        self.define_value(key, spec)
    }

    pub fn define_boolean_with(
        &mut self,
        key: &str,
        spec: CellSpec<bool>,
    ) -> Result<ValueCell<bool>, ConfigError> {
        self.define_value(key, spec)
    }

    /// Numeric `*_with` variants: bounds left out of `spec` report the
    /// type's full range.
    pub fn define_integer_with(
        &mut self,
        key: &str,
        spec: CellSpec<i32>,
    ) -> Result<ValueCell<i32>, ConfigError> {
        self.define_value(key, spec)
    }

    pub fn define_long_with(
        &mut self,
        key: &str,
        spec: CellSpec<i64>,
    ) -> Result<ValueCell<i64>, ConfigError> {
        self.define_value(key, spec)
    }

    pub fn define_float_with(
        &mut self,
        key: &str,
        spec: CellSpec<f32>,
    ) -> Result<ValueCell<f32>, ConfigError> {
        self.define_value(key, spec)
    }

    pub fn define_double_with(
        &mut self,
        key: &str,
        spec: CellSpec<f64>,
    ) -> Result<ValueCell<f64>, ConfigError> {
        self.define_value(key, spec)
    }

    pub fn build(self) -> Store {
        self.store
    }
}
