//! Value types a config cell can hold.

use crate::serializer::{self, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag for the primitive kinds a cell may hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    String,
    Integer,
    Long,
    Float,
    Double,
    Boolean,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Integer => "integer",
            ValueKind::Long => "long",
            ValueKind::Float => "float",
            ValueKind::Double => "double",
            ValueKind::Boolean => "boolean",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ValueKind::Integer | ValueKind::Long | ValueKind::Float | ValueKind::Double
        )
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A Rust type that can back a config cell.
///
/// Each implementor names its [`ValueKind`] and the shared static serializer
/// used by every cell of that type.
pub trait ConfigType: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
    const KIND: ValueKind;

    fn serializer() -> &'static dyn Serializer<Self>;

    /// Equality used for the set no-op check and default comparison.
    fn same_value(a: &Self, b: &Self) -> bool {
        a == b
    }
}

impl ConfigType for String {
    const KIND: ValueKind = ValueKind::String;

    fn serializer() -> &'static dyn Serializer<Self> {
        &serializer::STRING
    }
}

impl ConfigType for i32 {
    const KIND: ValueKind = ValueKind::Integer;

    fn serializer() -> &'static dyn Serializer<Self> {
        &serializer::INTEGER
    }
}

impl ConfigType for i64 {
    const KIND: ValueKind = ValueKind::Long;

    fn serializer() -> &'static dyn Serializer<Self> {
        &serializer::LONG
    }
}

impl ConfigType for f32 {
    const KIND: ValueKind = ValueKind::Float;

    fn serializer() -> &'static dyn Serializer<Self> {
        &serializer::FLOAT
    }

    // NaN matches NaN so a NaN value can be a no-op set or the default.
    fn same_value(a: &Self, b: &Self) -> bool {
        a == b || (a.is_nan() && b.is_nan())
    }
}

impl ConfigType for f64 {
    const KIND: ValueKind = ValueKind::Double;

    fn serializer() -> &'static dyn Serializer<Self> {
        &serializer::DOUBLE
    }

    // NaN matches NaN so a NaN value can be a no-op set or the default.
    fn same_value(a: &Self, b: &Self) -> bool {
        a == b || (a.is_nan() && b.is_nan())
    }
}

impl ConfigType for bool {
    const KIND: ValueKind = ValueKind::Boolean;

    fn serializer() -> &'static dyn Serializer<Self> {
        &serializer::BOOLEAN
    }
}

/// Numeric cell types: carry min/max metadata and widening accessors
pub trait Numeric: ConfigType + Copy + PartialOrd {
    const MIN: Self;
    const MAX: Self;

    fn to_i32(self) -> i32;
    fn to_i64(self) -> i64;
    fn to_f32(self) -> f32;
    fn to_f64(self) -> f64;
}

impl Numeric for i32 {
    const MIN: Self = i32::MIN;
    const MAX: Self = i32::MAX;

    fn to_i32(self) -> i32 {
        self
    }
    fn to_i64(self) -> i64 {
        i64::from(self)
    }
    fn to_f32(self) -> f32 {
        self as f32
    }
    fn to_f64(self) -> f64 {
        f64::from(self)
    }
}

impl Numeric for i64 {
    const MIN: Self = i64::MIN;
    const MAX: Self = i64::MAX;

    fn to_i32(self) -> i32 {
        self as i32
    }
    fn to_i64(self) -> i64 {
        self
    }
    fn to_f32(self) -> f32 {
        self as f32
    }
    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl Numeric for f32 {
    const MIN: Self = f32::MIN;
    const MAX: Self = f32::MAX;

    fn to_i32(self) -> i32 {
        self as i32
    }
    fn to_i64(self) -> i64 {
        self as i64
    }
    fn to_f32(self) -> f32 {
        self
    }
    fn to_f64(self) -> f64 {
        f64::from(self)
    }
}

impl Numeric for f64 {
    const MIN: Self = f64::MIN;
    const MAX: Self = f64::MAX;

    fn to_i32(self) -> i32 {
        self as i32
    }
    fn to_i64(self) -> i64 {
        self as i64
    }
    fn to_f32(self) -> f32 {
        self as f32
    }
    fn to_f64(self) -> f64 {
        self
    }
}
