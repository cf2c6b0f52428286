//! Serializers between cell values and JSON scalars.
//!
//! Deserialization never fails: any JSON shape other than the expected scalar
//! kind yields the supplied default.

use serde_json::{Number, Value};

/// Maps a typed value to and from a JSON scalar
pub trait Serializer<T>: Send + Sync {
    /// Serialize a value. A `Value::Null` result means "nothing to write".
    fn serialize(&self, value: &T) -> Value;

    /// Strict parse: `None` when the JSON shape does not match `T`.
    fn try_deserialize(&self, json: &Value) -> Option<T>;

    /// Lenient parse falling back to `default` on any mismatch.
    fn deserialize(&self, default: T, json: &Value) -> T {
        self.try_deserialize(json).unwrap_or(default)
    }
}

/// Serializer built from a pair of plain functions
pub struct PrimitiveSerializer<T> {
    parse: fn(&Value) -> Option<T>,
    emit: fn(&T) -> Value,
}

impl<T> PrimitiveSerializer<T> {
    pub const fn new(parse: fn(&Value) -> Option<T>, emit: fn(&T) -> Value) -> Self {
        Self { parse, emit }
    }
}

impl<T> Serializer<T> for PrimitiveSerializer<T> {
    fn serialize(&self, value: &T) -> Value {
        (self.emit)(value)
    }

    fn try_deserialize(&self, json: &Value) -> Option<T> {
        (self.parse)(json)
    }
}

/// Used for `String` cells
pub static STRING: PrimitiveSerializer<String> =
    PrimitiveSerializer::new(parse_string, emit_string);

/// Used for `i32` (integer) cells
pub static INTEGER: PrimitiveSerializer<i32> =
    PrimitiveSerializer::new(parse_i32, emit_i32);

/// Used for `i64` (long) cells
pub static LONG: PrimitiveSerializer<i64> =
    PrimitiveSerializer::new(parse_i64, emit_i64);

/// Used for `f32` (float) cells
pub static FLOAT: PrimitiveSerializer<f32> = PrimitiveSerializer::new(parse_f32, emit_f32);

/// Used for `f64` (double) cells
pub static DOUBLE: PrimitiveSerializer<f64> = PrimitiveSerializer::new(parse_f64, emit_f64);

/// Used for `bool` cells
pub static BOOLEAN: PrimitiveSerializer<bool> =
    PrimitiveSerializer::new(Value::as_bool, emit_bool);

fn parse_string(json: &Value) -> Option<String> {
    json.as_str().map(str::to_owned)
}

fn emit_string(value: &String) -> Value {
    Value::String(value.clone())
}

fn emit_i32(value: &i32) -> Value {
    Value::from(*value)
}

fn emit_i64(value: &i64) -> Value {
    Value::from(*value)
}

fn emit_bool(value: &bool) -> Value {
    Value::Bool(*value)
}

// Numeric parsers only accept JSON numbers; "42" is not a number.
fn parse_i64(json: &Value) -> Option<i64> {
    match json {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        _ => None,
    }
}

fn parse_i32(json: &Value) -> Option<i32> {
    match json {
        Value::Number(n) => match n.as_i64() {
            Some(v) => Some(v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32),
            None => n.as_f64().map(|f| f as i32),
        },
        _ => None,
    }
}

fn parse_f64(json: &Value) -> Option<f64> {
    match json {
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

fn parse_f32(json: &Value) -> Option<f32> {
    parse_f64(json).map(|f| f as f32)
}

fn emit_f64(value: &f64) -> Value {
    Number::from_f64(*value)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// Widen through the shortest decimal form so `0.1f32` is written as `0.1`.
fn emit_f32(value: &f32) -> Value {
    if !value.is_finite() {
        return Value::Null;
    }
    let widened = value
        .to_string()
        .parse::<f64>()
        .unwrap_or_else(|_| f64::from(*value));
    emit_f64(&widened)
}
