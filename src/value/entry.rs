//! Type-erased view of a config value, as held by the store.

use super::ValueCell;
use crate::error::ConfigError;
use crate::types::{ConfigType, ValueKind};
use serde_json::Value;
use std::any::Any;

/// Capabilities of a config value that do not depend on its Rust type
pub trait ConfigEntry: Send + Sync {
    fn key(&self) -> &str;

    fn kind(&self) -> ValueKind;

    fn is_dirty(&self) -> bool;

    fn is_default(&self) -> bool;

    /// Current value as JSON (`Null` if it cannot be represented).
    fn current_json(&self) -> Value;

    fn default_json(&self) -> Value;

    /// `(min, max)` as JSON, for values declared with bounds.
    fn bounds_json(&self) -> Option<(Value, Value)>;

    /// Strictly parse `json` and set it as the current value.
    fn set_json(&self, json: &Value) -> Result<(), ConfigError>;

    /// Set the current value back to the default.
    fn reset(&self);

    fn as_any(&self) -> &dyn Any;
}

impl<T: ConfigType> ConfigEntry for ValueCell<T> {
    fn key(&self) -> &str {
        ValueCell::key(self)
    }

    fn kind(&self) -> ValueKind {
        T::KIND
    }

    fn is_dirty(&self) -> bool {
        ValueCell::is_dirty(self)
    }

    fn is_default(&self) -> bool {
        ValueCell::is_default(self)
    }

    fn current_json(&self) -> Value {
        self.serialize_current()
    }

    fn default_json(&self) -> Value {
        self.serialize_default()
    }

    fn bounds_json(&self) -> Option<(Value, Value)> {
        self.bounds()
            .map(|b| (self.serialize_value(&b.min), self.serialize_value(&b.max)))
    }

    fn set_json(&self, json: &Value) -> Result<(), ConfigError> {
        let value = self
            .serializer()
            .try_deserialize(json)
            .ok_or_else(|| ConfigError::InvalidValue {
                key: self.key().to_string(),
                expected: T::KIND.as_str(),
            })?;
        self.set(value);
        Ok(())
    }

    fn reset(&self) {
        self.set(self.default_value().clone());
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
