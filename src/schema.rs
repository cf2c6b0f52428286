//! Declarative store schemas
//!
//! A schema is a TOML file listing the values of one store:
//!
//! ```toml
//! file = "client.json"
//!
//! [[value]]
//! key = "volume"
//! type = "float"
//! default = 0.5
//! min = 0.0
//! max = 1.0
//! ```
//!
//! `type` is one of `string`, `integer`, `long`, `float`, `double`,
//! `boolean`. `initial`, `min` and `max` are optional; bounds are only
//! accepted on numeric types.

use crate::builder::StoreBuilder;
use crate::error::ConfigError;
use crate::root::ConfigRoot;
use crate::store::Store;
use crate::types::{ConfigType, Numeric, ValueKind};
use crate::value::CellSpec;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Schema {
    /// Store file path, relative to the configs directory
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default, rename = "value")]
    pub values: Vec<SchemaEntry>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaEntry {
    pub key: String,
    #[serde(rename = "type")]
    pub kind: ValueKind,
    pub default: toml::Value,
    #[serde(default)]
    pub initial: Option<toml::Value>,
    #[serde(default)]
    pub min: Option<toml::Value>,
    #[serde(default)]
    pub max: Option<toml::Value>,
}

impl Schema {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Schema(e.to_string()))
    }

    /// Register every entry on `builder`, in declaration order.
    pub fn apply(&self, builder: &mut StoreBuilder) -> Result<(), ConfigError> {
        for entry in &self.values {
            entry.register(builder)?;
        }
        Ok(())
    }

    /// Build a store for this schema's `file` under `root`.
    pub fn build(&self, root: &ConfigRoot) -> Result<Store, ConfigError> {
        let file = self
            .file
            .as_deref()
            .ok_or_else(|| ConfigError::Schema("schema does not name a file".to_string()))?;
        let mut builder = StoreBuilder::new(root, file);
        self.apply(&mut builder)?;
        Ok(builder.build())
    }
}

impl SchemaEntry {
    fn register(&self, builder: &mut StoreBuilder) -> Result<(), ConfigError> {
        match self.kind {
            ValueKind::String => self.register_plain::<String>(builder),
            ValueKind::Boolean => self.register_plain::<bool>(builder),
            ValueKind::Integer => self.register_numeric::<i32>(builder),
            ValueKind::Long => self.register_numeric::<i64>(builder),
            ValueKind::Float => self.register_numeric::<f32>(builder),
            ValueKind::Double => self.register_numeric::<f64>(builder),
        }
    }

    fn register_plain<T: FromToml>(&self, builder: &mut StoreBuilder) -> Result<(), ConfigError> {
        if self.min.is_some() || self.max.is_some() {
            return Err(ConfigError::Schema(format!(
                "'{}': bounds are only allowed on numeric types, not {}",
                self.key, self.kind
            )));
        }
        let spec = self.base_spec::<T>()?;
        builder.define_value(&self.key, spec)?;
        Ok(())
    }

    fn register_numeric<T: FromToml + Numeric>(
        &self,
        builder: &mut StoreBuilder,
    ) -> Result<(), ConfigError> {
        let mut spec = self.base_spec::<T>()?;
        if self.min.is_some() || self.max.is_some() {
            let min = self.optional::<T>("min", self.min.as_ref())?.unwrap_or(T::MIN);
            let max = self.optional::<T>("max", self.max.as_ref())?.unwrap_or(T::MAX);
            if min > max {
                return Err(ConfigError::Schema(format!(
                    "'{}': min is greater than max",
                    self.key
                )));
            }
            spec = spec.range(min, max);
        }
        builder.define_value(&self.key, spec)?;
        Ok(())
    }

    fn base_spec<T: FromToml>(&self) -> Result<CellSpec<T>, ConfigError> {
        let default = self.convert::<T>("default", &self.default)?;
        let mut spec = CellSpec::new(default);
        if let Some(initial) = self.optional::<T>("initial", self.initial.as_ref())? {
            spec = spec.initial(initial);
        }
        Ok(spec)
    }

    fn optional<T: FromToml>(
        &self,
        field: &str,
        value: Option<&toml::Value>,
    ) -> Result<Option<T>, ConfigError> {
        value.map(|v| self.convert(field, v)).transpose()
    }

    fn convert<T: FromToml>(&self, field: &str, value: &toml::Value) -> Result<T, ConfigError> {
        T::from_toml(value).ok_or_else(|| {
            ConfigError::Schema(format!(
                "'{}': {} must be {}, found {}",
                self.key,
                field,
                T::KIND,
                value.type_str()
            ))
        })
    }
}

/// Conversion from a TOML literal to a cell value
trait FromToml: ConfigType {
    fn from_toml(value: &toml::Value) -> Option<Self>;
}

impl FromToml for String {
    fn from_toml(value: &toml::Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl FromToml for bool {
    fn from_toml(value: &toml::Value) -> Option<Self> {
        value.as_bool()
    }
}

impl FromToml for i32 {
    fn from_toml(value: &toml::Value) -> Option<Self> {
        value.as_integer().and_then(|n| i32::try_from(n).ok())
    }
}

impl FromToml for i64 {
    fn from_toml(value: &toml::Value) -> Option<Self> {
        value.as_integer()
    }
}

impl FromToml for f32 {
    fn from_toml(value: &toml::Value) -> Option<Self> {
        f64::from_toml(value).map(|n| n as f32)
    }
}

impl FromToml for f64 {
    fn from_toml(value: &toml::Value) -> Option<Self> {
        match value {
            toml::Value::Float(n) => Some(*n),
            toml::Value::Integer(n) => Some(*n as f64),
            _ => None,
        }
    }
}
