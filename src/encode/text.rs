//! TEXT record encoder: tab-separated `key=value` pairs, one record per line.

use super::{Encoder, escape_byte, escape_str, push_display, push_duration, push_f32, push_f64};
use chrono::{DateTime, Local};
use std::time::Duration;

/// Stateless TEXT encoder; the only configuration is the time-field format.
#[derive(Debug, Clone, Default)]
pub struct TextEncoder {
    /// Empty means time fields emit Unix seconds.
    time_format: String,
}

impl TextEncoder {
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

    /// A tab separates fields. A trailing newline marks a completed record,
    /// so the first field after one gets no separator and concatenated
    /// records stay legal.
    fn push_key(dst: &mut Vec<u8>, key: &str) {
        match dst.last() {
            None | Some(b'\n') => {}
            _ => dst.push(b'\t'),
        }
        escape_str(dst, key);
        dst.push(b'=');
    }

    fn elem_sep(dst: &mut Vec<u8>) {
        if dst.last() != Some(&b'[') {
            dst.push(b'\t');
        }
    }

    fn push_value_time(&self, dst: &mut Vec<u8>, value: DateTime<Local>) {
        if self.time_format.is_empty() {
            push_display(dst, value.timestamp());
        } else {
            dst.push(b'"');
            let formatted = value.format(&self.time_format).to_string();
            escape_str(dst, &formatted);
            dst.push(b'"');
        }
    }
}

impl Encoder for TextEncoder {
    fn begin(&self, _dst: &mut Vec<u8>) {}

    fn end(&self, dst: &mut Vec<u8>) {
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
        push_f32(dst, value);
    }

    fn append_float64(&self, dst: &mut Vec<u8>, key: &str, value: f64) {
        Self::push_key(dst, key);
        push_f64(dst, value);
    }

    fn append_byte(&self, dst: &mut Vec<u8>, key: &str, value: u8) {
        Self::push_key(dst, key);
        escape_byte(dst, value);
    }

    fn append_str(&self, dst: &mut Vec<u8>, key: &str, value: &str) {
        Self::push_key(dst, key);
        escape_str(dst, value);
    }

    fn append_time(&self, dst: &mut Vec<u8>, key: &str, value: DateTime<Local>) {
        Self::push_key(dst, key);
        self.push_value_time(dst, value);
    }

    fn append_duration(&self, dst: &mut Vec<u8>, key: &str, value: Duration) {
        Self::push_key(dst, key);
        push_duration(dst, value);
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
            push_f32(dst, v);
        }
        dst.push(b']');
    }

    fn append_floats64(&self, dst: &mut Vec<u8>, key: &str, values: &[f64]) {
        Self::push_key(dst, key);
        dst.push(b'[');
        for &v in values {
            Self::elem_sep(dst);
            push_f64(dst, v);
        }
        dst.push(b']');
    }

    fn append_bytes(&self, dst: &mut Vec<u8>, key: &str, values: &[u8]) {
        Self::push_key(dst, key);
        dst.push(b'[');
        for &v in values {
            Self::elem_sep(dst);
            escape_byte(dst, v);
        }
        dst.push(b']');
    }

    fn append_strs(&self, dst: &mut Vec<u8>, key: &str, values: &[&str]) {
        Self::push_key(dst, key);
        dst.push(b'[');
        for v in values {
            Self::elem_sep(dst);
            escape_str(dst, v);
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
            push_duration(dst, v);
        }
        dst.push(b']');
    }

    fn append_any(&self, dst: &mut Vec<u8>, key: &str, value: &serde_json::Value) {
        Self::push_key(dst, key);
        let _ = serde_json::to_writer(&mut *dst, value);
    }
}
