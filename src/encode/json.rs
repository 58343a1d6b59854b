//! JSON record encoder. One record is one JSON object on one line; appending
//! records concatenates legal JSONL output.

use super::{Encoder, escape_byte, escape_str, push_display, push_duration, push_f32, push_f64};
use chrono::{DateTime, Local};
use std::time::Duration;

/// Stateless JSON encoder; the only configuration is the time-field format.
#[derive(Debug, Clone, Default)]
pub struct JsonEncoder {
    /// Empty means time fields emit Unix seconds.
    time_format: String,
}

impl JsonEncoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `chrono` format used for time fields; empty keeps Unix seconds.
    #[must_use]
    pub fn time_format(mut self, format: impl Into<String>) -> Self {
        self.time_format = format.into();
        self
    }

    /// Emits the separating comma (unless the last byte says this is the first
    /// entry of an object or array), then the quoted key and colon.
    fn push_key(dst: &mut Vec<u8>, key: &str) {
        match dst.last() {
            None | Some(b'{' | b'[') => {}
            _ => dst.push(b','),
        }
        dst.push(b'"');
        escape_str(dst, key);
        dst.push(b'"');
        dst.push(b':');
    }

    fn elem_sep(dst: &mut Vec<u8>) {
        if dst.last() != Some(&b'[') {
            dst.push(b',');
        }
    }

    fn push_quoted(dst: &mut Vec<u8>, s: &str) {
        dst.push(b'"');
        escape_str(dst, s);
        dst.push(b'"');
    }

    /// Finite floats are bare numbers; NaN and the infinities are the quoted
    /// string literals JSON itself cannot express.
    fn push_value_f64(dst: &mut Vec<u8>, value: f64) {
        if value.is_finite() {
            push_f64(dst, value);
        } else {
            dst.push(b'"');
            push_f64(dst, value);
            dst.push(b'"');
        }
    }

    fn push_value_f32(dst: &mut Vec<u8>, value: f32) {
        if value.is_finite() {
            push_f32(dst, value);
        } else {
            dst.push(b'"');
            push_f32(dst, value);
            dst.push(b'"');
        }
    }

    fn push_value_byte(dst: &mut Vec<u8>, value: u8) {
        dst.push(b'"');
        escape_byte(dst, value);
        dst.push(b'"');
    }

    fn push_value_time(&self, dst: &mut Vec<u8>, value: DateTime<Local>) {
        if self.time_format.is_empty() {
            push_display(dst, value.timestamp());
        } else {
            let formatted = value.format(&self.time_format).to_string();
            Self::push_quoted(dst, &formatted);
        }
    }

    fn push_value_duration(dst: &mut Vec<u8>, value: Duration) {
        dst.push(b'"');
        push_duration(dst, value);
        dst.push(b'"');
    }
}

impl Encoder for JsonEncoder {
    fn begin(&self, dst: &mut Vec<u8>) {
        dst.push(b'{');
    }

    fn end(&self, dst: &mut Vec<u8>) {
        dst.push(b'}');
        dst.push(b'\n');
    }

    fn append_bool(&self, dst: &mut Vec<u8>, key: &str, value: bool) {
        Self::push_key(dst, key);
        dst.extend_from_slice(if value { b"true" } else { b"false" });
    }

    fn append_int(&self, dst: &mut Vec<u8>, key: &str, value: i64) {
        Self::push_key(dst, key);
        push_display(dst, value);
    }

    fn append_uint(&self, dst: &mut Vec<u8>, key: &str, value: u64) {
        Self::push_key(dst, key);
        push_display(dst, value);
    }

    fn append_float32(&self, dst: &mut Vec<u8>, key: &str, value: f32) {
        Self::push_key(dst, key);
        Self::push_value_f32(dst, value);
    }

    fn append_float64(&self, dst: &mut Vec<u8>, key: &str, value: f64) {
        Self::push_key(dst, key);
        Self::push_value_f64(dst, value);
    }

    fn append_byte(&self, dst: &mut Vec<u8>, key: &str, value: u8) {
        Self::push_key(dst, key);
        Self::push_value_byte(dst, value);
    }

    fn append_str(&self, dst: &mut Vec<u8>, key: &str, value: &str) {
        Self::push_key(dst, key);
        Self::push_quoted(dst, value);
    }

    fn append_time(&self, dst: &mut Vec<u8>, key: &str, value: DateTime<Local>) {
        Self::push_key(dst, key);
        self.push_value_time(dst, value);
    }

    fn append_duration(&self, dst: &mut Vec<u8>, key: &str, value: Duration) {
        Self::push_key(dst, key);
        Self::push_value_duration(dst, value);
    }

    fn append_bools(&self, dst: &mut Vec<u8>, key: &str, values: &[bool]) {
        Self::push_key(dst, key);
        dst.push(b'[');
        for &v in values {
            Self::elem_sep(dst);
            dst.extend_from_slice(if v { b"true" } else { b"false" });
        }
        dst.push(b']');
    }

    fn append_ints(&self, dst: &mut Vec<u8>, key: &str, values: &[i64]) {
        Self::push_key(dst, key);
        dst.push(b'[');
        for &v in values {
            Self::elem_sep(dst);
            push_display(dst, v);
        }
        dst.push(b']');
    }

    fn append_uints(&self, dst: &mut Vec<u8>, key: &str, values: &[u64]) {
        Self::push_key(dst, key);
        dst.push(b'[');
        for &v in values {
            Self::elem_sep(dst);
            push_display(dst, v);
        }
        dst.push(b']');
    }

    fn append_floats32(&self, dst: &mut Vec<u8>, key: &str, values: &[f32]) {
        Self::push_key(dst, key);
        dst.push(b'[');
        for &v in values {
            Self::elem_sep(dst);
            Self::push_value_f32(dst, v);
        }
        dst.push(b']');
    }

    fn append_floats64(&self, dst: &mut Vec<u8>, key: &str, values: &[f64]) {
        Self::push_key(dst, key);
        dst.push(b'[');
        for &v in values {
            Self::elem_sep(dst);
            Self::push_value_f64(dst, v);
        }
        dst.push(b']');
    }

    /// Bytes are arrays of one-character quoted escaped strings, not base64
    /// and not a raw string.
    fn append_bytes(&self, dst: &mut Vec<u8>, key: &str, values: &[u8]) {
        Self::push_key(dst, key);
        dst.push(b'[');
        for &v in values {
            Self::elem_sep(dst);
            Self::push_value_byte(dst, v);
        }
        dst.push(b']');
    }

    fn append_strs(&self, dst: &mut Vec<u8>, key: &str, values: &[&str]) {
        Self::push_key(dst, key);
        dst.push(b'[');
        for v in values {
            Self::elem_sep(dst);
            Self::push_quoted(dst, v);
        }
        dst.push(b']');
    }

    fn append_times(&self, dst: &mut Vec<u8>, key: &str, values: &[DateTime<Local>]) {
        Self::push_key(dst, key);
        dst.push(b'[');
        for &v in values {
            Self::elem_sep(dst);
            self.push_value_time(dst, v);
        }
        dst.push(b']');
    }

    fn append_durations(&self, dst: &mut Vec<u8>, key: &str, values: &[Duration]) {
        Self::push_key(dst, key);
        dst.push(b'[');
        for &v in values {
            Self::elem_sep(dst);
            Self::push_value_duration(dst, v);
        }
        dst.push(b']');
    }

    fn append_any(&self, dst: &mut Vec<u8>, key: &str, value: &serde_json::Value) {
        Self::push_key(dst, key);
        let _ = serde_json::to_writer(&mut *dst, value);
    }
}
