//! Typed key/value fields carried by a record. The encoder trait takes each
//! kind through its own appender; `Field` is the carrier the logger facade
//! uses to hold them until dispatch.

use crate::encode::Encoder;
use chrono::{DateTime, Local};
use std::time::Duration;

/// One (key, typed value) pair. Key uniqueness is the caller's concern;
/// encoders never deduplicate.
#[derive(Debug, Clone)]
pub struct Field {
    /// Field name as it appears in the record.
    pub key: String,
    /// Typed payload.
    pub value: Value,
}

/// The closed set of value kinds a record can carry.
#[derive(Debug, Clone)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float32(f32),
    Float64(f64),
    Byte(u8),
    Str(String),
    Time(DateTime<Local>),
    Duration(Duration),
    Bools(Vec<bool>),
    Ints(Vec<i64>),
    Uints(Vec<u64>),
    Floats32(Vec<f32>),
    Floats64(Vec<f64>),
    Bytes(Vec<u8>),
    Strs(Vec<String>),
    Times(Vec<DateTime<Local>>),
    Durations(Vec<Duration>),
    /// Catch-all for structured payloads; use sparingly.
    Any(serde_json::Value),
}

impl Field {
    fn new(key: impl Into<String>, value: Value) -> Self {
        Self { key: key.into(), value }
    }

    #[must_use]
    pub fn bool(key: impl Into<String>, value: bool) -> Self {
        Self::new(key, Value::Bool(value))
    }

    #[must_use]
    pub fn int(key: impl Into<String>, value: i64) -> Self {
        Self::new(key, Value::Int(value))
    }

    #[must_use]
    pub fn uint(key: impl Into<String>, value: u64) -> Self {
        Self::new(key, Value::Uint(value))
    }

    #[must_use]
    pub fn float32(key: impl Into<String>, value: f32) -> Self {
        Self::new(key, Value::Float32(value))
    }

    #[must_use]
    pub fn float64(key: impl Into<String>, value: f64) -> Self {
        Self::new(key, Value::Float64(value))
    }

    #[must_use]
    pub fn byte(key: impl Into<String>, value: u8) -> Self {
        Self::new(key, Value::Byte(value))
    }

    #[must_use]
    pub fn str(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, Value::Str(value.into()))
    }

    #[must_use]
    pub fn time(key: impl Into<String>, value: DateTime<Local>) -> Self {
        Self::new(key, Value::Time(value))
    }

    #[must_use]
    pub fn duration(key: impl Into<String>, value: Duration) -> Self {
        Self::new(key, Value::Duration(value))
    }

    #[must_use]
    pub fn bools(key: impl Into<String>, values: Vec<bool>) -> Self {
        Self::new(key, Value::Bools(values))
    }

    #[must_use]
    pub fn ints(key: impl Into<String>, values: Vec<i64>) -> Self {
        Self::new(key, Value::Ints(values))
    }

    #[must_use]
    pub fn uints(key: impl Into<String>, values: Vec<u64>) -> Self {
        Self::new(key, Value::Uints(values))
    }

    #[must_use]
    pub fn floats32(key: impl Into<String>, values: Vec<f32>) -> Self {
        Self::new(key, Value::Floats32(values))
    }

    #[must_use]
    pub fn floats64(key: impl Into<String>, values: Vec<f64>) -> Self {
        Self::new(key, Value::Floats64(values))
    }

    #[must_use]
    pub fn bytes(key: impl Into<String>, values: Vec<u8>) -> Self {
        Self::new(key, Value::Bytes(values))
    }

    #[must_use]
    pub fn strs(key: impl Into<String>, values: Vec<String>) -> Self {
        Self::new(key, Value::Strs(values))
    }

    #[must_use]
    pub fn times(key: impl Into<String>, values: Vec<DateTime<Local>>) -> Self {
        Self::new(key, Value::Times(values))
    }

    #[must_use]
    pub fn durations(key: impl Into<String>, values: Vec<Duration>) -> Self {
        Self::new(key, Value::Durations(values))
    }

    /// Serializes any `serde`-serializable payload into the catch-all kind.
    /// Falls back to `Value::Any(Null)` if serialization fails.
    #[must_use]
    pub fn any(key: impl Into<String>, value: &impl serde::Serialize) -> Self {
        let json = serde_json::to_value(value).unwrap_or(serde_json::Value::Null);
        Self::new(key, Value::Any(json))
    }

    /// Dispatches this field to the matching typed appender.
    pub fn append_to(&self, enc: &dyn Encoder, dst: &mut Vec<u8>) {
        match &self.value {
            Value::Bool(v) => enc.append_bool(dst, &self.key, *v),
            Value::Int(v) => enc.append_int(dst, &self.key, *v),
            Value::Uint(v) => enc.append_uint(dst, &self.key, *v),
            Value::Float32(v) => enc.append_float32(dst, &self.key, *v),
            Value::Float64(v) => enc.append_float64(dst, &self.key, *v),
            Value::Byte(v) => enc.append_byte(dst, &self.key, *v),
            Value::Str(v) => enc.append_str(dst, &self.key, v),
            Value::Time(v) => enc.append_time(dst, &self.key, *v),
            Value::Duration(v) => enc.append_duration(dst, &self.key, *v),
            Value::Bools(v) => enc.append_bools(dst, &self.key, v),
            Value::Ints(v) => enc.append_ints(dst, &self.key, v),
            Value::Uints(v) => enc.append_uints(dst, &self.key, v),
            Value::Floats32(v) => enc.append_floats32(dst, &self.key, v),
            Value::Floats64(v) => enc.append_floats64(dst, &self.key, v),
            Value::Bytes(v) => enc.append_bytes(dst, &self.key, v),
            Value::Strs(v) => {
                let refs: Vec<&str> = v.iter().map(String::as_str).collect();
                enc.append_strs(dst, &self.key, &refs);
            }
            Value::Times(v) => enc.append_times(dst, &self.key, v),
            Value::Durations(v) => enc.append_durations(dst, &self.key, v),
            Value::Any(v) => enc.append_any(dst, &self.key, v),
        }
    }
}
