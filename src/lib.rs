//! confcell: typed configuration cells reconciled against a JSON file
//!
//! A [`Store`] owns the typed values declared for one JSON file. Values are
//! registered through a [`StoreBuilder`]; the application keeps the typed
//! [`ValueCell`] handles and calls [`Store::load`] / [`Store::save`] to sync
//! them with disk.

pub mod builder;
pub mod cli;
pub mod error;
pub mod listener;
pub mod logging;
pub mod root;
pub mod schema;
pub mod serializer;
pub mod settings;
pub mod store;
pub mod types;
pub mod value;

pub use builder::StoreBuilder;
pub use error::{ConfigError, SetupError};
pub use listener::{ConfigListener, LoggingListener};
pub use root::ConfigRoot;
pub use schema::Schema;
pub use serializer::Serializer;
pub use store::{LoadOutcome, SaveOutcome, Store, UnsavedPolicy};
pub use types::{ConfigType, Numeric, ValueKind};
pub use value::{
    BooleanValue, Bounds, CellContext, CellSpec, ConfigEntry, DoubleValue, FloatValue,
    IntegerValue, LongValue, StringValue, ValueCell,
};
