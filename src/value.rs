//! Config values
//!
//! A [`ValueCell`] is one named, typed setting bound to a store. Handles are
//! cheap clones sharing the same cell, so the application keeps typed handles
//! while the store keeps a type-erased view of the same cell.
//!
//! Bounds are advisory metadata for callers (e.g. a settings UI); `set` never
//! validates against them.

mod entry;

pub use entry::ConfigEntry;

use crate::serializer::Serializer;
use crate::types::{ConfigType, Numeric, ValueKind};
use parking_lot::RwLock;
use serde_json::Value;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Owner binding handed to a cell factory by the builder.
///
/// Carries the key being registered, the owning store's file path and the
/// store's dirty-tracking switch.
#[derive(Clone)]
pub struct CellContext {
    key: String,
    file_path: Arc<str>,
    tracking: Arc<AtomicBool>,
}

impl CellContext {
    pub(crate) fn new(key: String, file_path: Arc<str>, tracking: Arc<AtomicBool>) -> Self {
        Self {
            key,
            file_path,
            tracking,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    fn can_be_dirty(&self) -> bool {
        self.tracking.load(Ordering::SeqCst)
    }
}

/// Inclusive min/max metadata
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds<T> {
    pub min: T,
    pub max: T,
}

/// Declaration of a cell: default plus optional initial value and bounds
#[derive(Debug, Clone)]
pub struct CellSpec<T> {
    default: T,
    initial: Option<T>,
    bounds: Option<Bounds<T>>,
}

impl<T> CellSpec<T> {
    pub fn new(default: T) -> Self {
        Self {
            default,
            initial: None,
            bounds: None,
        }
    }

    /// Start the cell at `initial` instead of the default.
    pub fn initial(mut self, initial: T) -> Self {
        self.initial = Some(initial);
        self
    }

    pub fn range(mut self, min: T, max: T) -> Self {
        self.bounds = Some(Bounds { min, max });
        self
    }
}

struct CellState<T> {
    value: T,
    dirty: bool,
}

struct Inner<T: 'static> {
    context: CellContext,
    default: T,
    bounds: Option<Bounds<T>>,
    serializer: &'static dyn Serializer<T>,
    state: RwLock<CellState<T>>,
}

/// One named, typed config value
pub struct ValueCell<T: 'static> {
    inner: Arc<Inner<T>>,
}

pub type StringValue = ValueCell<String>;
pub type IntegerValue = ValueCell<i32>;
pub type LongValue = ValueCell<i64>;
pub type FloatValue = ValueCell<f32>;
pub type DoubleValue = ValueCell<f64>;
pub type BooleanValue = ValueCell<bool>;

impl<T: 'static> Clone for ValueCell<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: ConfigType> ValueCell<T> {
    /// Create a cell using the type's shared serializer.
    pub fn new(context: CellContext, initial: T, default: T) -> Self {
        Self::with_serializer(context, initial, default, None, T::serializer())
    }

    /// Create a cell from a [`CellSpec`].
    pub fn from_spec(context: CellContext, spec: CellSpec<T>) -> Self {
        let initial = spec.initial.unwrap_or_else(|| spec.default.clone());
        Self::with_serializer(context, initial, spec.default, spec.bounds, T::serializer())
    }

    /// Create a cell with an explicit serializer.
    pub fn with_serializer(
        context: CellContext,
        initial: T,
        default: T,
        bounds: Option<Bounds<T>>,
        serializer: &'static dyn Serializer<T>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                context,
                default,
                bounds,
                serializer,
                state: RwLock::new(CellState {
                    value: initial,
                    dirty: false,
                }),
            }),
        }
    }

    pub fn key(&self) -> &str {
        &self.inner.context.key
    }

    /// Relative file path of the owning store
    pub fn file_path(&self) -> &str {
        &self.inner.context.file_path
    }

    pub fn kind(&self) -> ValueKind {
        T::KIND
    }

    /// Current value
    pub fn get(&self) -> T {
        self.inner.state.read().value.clone()
    }

    /// Borrow the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.state.read().value)
    }

    /// Replace the current value.
    ///
    /// No-op when `value` equals the current value. Marks the cell dirty only
    /// while the owning store has dirty tracking enabled.
    pub fn set(&self, value: T) {
        let mut state = self.inner.state.write();
        if T::same_value(&state.value, &value) {
            return;
        }
        state.value = value;
        if self.inner.context.can_be_dirty() {
            state.dirty = true;
        }
    }

    pub fn default_value(&self) -> &T {
        &self.inner.default
    }

    /// True if the cell currently holds its default.
    pub fn is_default(&self) -> bool {
        self.with(|value| self.is_default_value(value))
    }

    /// True if `value` equals this cell's default.
    pub fn is_default_value(&self, value: &T) -> bool {
        T::same_value(value, &self.inner.default)
    }

    /// True if the cell has unsaved changes.
    pub fn is_dirty(&self) -> bool {
        self.inner.context.can_be_dirty() && self.inner.state.read().dirty
    }

    pub fn bounds(&self) -> Option<&Bounds<T>> {
        self.inner.bounds.as_ref()
    }

    pub fn serializer(&self) -> &'static dyn Serializer<T> {
        self.inner.serializer
    }

    pub(crate) fn serialize_value(&self, value: &T) -> Value {
        self.inner.serializer.serialize(value)
    }

    pub(crate) fn serialize_current(&self) -> Value {
        self.with(|value| self.serialize_value(value))
    }

    pub(crate) fn serialize_default(&self) -> Value {
        self.serialize_value(&self.inner.default)
    }

    pub(crate) fn mark_clean(&self) {
        self.inner.state.write().dirty = false;
    }
}

impl<T: Numeric> ValueCell<T> {
    /// Minimum value; the type's full range when no bounds were declared.
    pub fn min(&self) -> T {
        self.inner.bounds.map(|b| b.min).unwrap_or(T::MIN)
    }

    /// Maximum value; the type's full range when no bounds were declared.
    pub fn max(&self) -> T {
        self.inner.bounds.map(|b| b.max).unwrap_or(T::MAX)
    }

    pub fn get_as_int(&self) -> i32 {
        self.get().to_i32()
    }

    pub fn get_as_long(&self) -> i64 {
        self.get().to_i64()
    }

    pub fn get_as_float(&self) -> f32 {
        self.get().to_f32()
    }

    pub fn get_as_double(&self) -> f64 {
        self.get().to_f64()
    }

    /// Numeric truthiness: any value whose integer part is >= 1.
    pub fn get_as_bool(&self) -> bool {
        self.get_as_int() >= 1
    }
}

impl ValueCell<bool> {
    /// 1 for true, 0 for false
    pub fn get_as_int(&self) -> i32 {
        i32::from(self.get())
    }
}

impl<T: ConfigType> PartialEq for ValueCell<T> {
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.inner, &other.inner) {
            return true;
        }
        self.file_path() == other.file_path()
            && self.key() == other.key()
            && self.with(|a| other.with(|b| T::same_value(a, b)))
    }
}

impl<T: ConfigType> fmt::Debug for ValueCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.read();
        f.debug_struct("ValueCell")
            .field("file_path", &self.file_path())
            .field("key", &self.key())
            .field("value", &state.value)
            .field("default", &self.inner.default)
            .field("dirty", &state.dirty)
            .finish()
    }
}

impl<T: ConfigType> fmt::Display for ValueCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with(|value| write!(f, "ConfigValue[{}={:?}]", self.key(), value))
    }
}

#[cfg(test)]
pub(crate) fn detached_context(key: &str) -> (CellContext, Arc<AtomicBool>) {
    let tracking = Arc::new(AtomicBool::new(true));
    let context = CellContext::new(key.to_string(), Arc::from("test.json"), Arc::clone(&tracking));
    (context, tracking)
}
