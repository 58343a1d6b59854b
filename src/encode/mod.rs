//! Record serializers. Both encoders append into a caller-owned byte buffer
//! and never allocate beyond growing it; the writer stack above them owns
//! all synchronization.

mod json;
mod text;

pub use json::JsonEncoder;
pub use text::TextEncoder;

use chrono::{DateTime, Local};
use std::fmt::Write as _;
use std::time::Duration;

/// The closed capability set both encoders provide: open a record, append one
/// field of each kind, close the record with exactly one `\n`.
///
/// Calling `begin`, any number of appenders, then `end` yields one
/// self-contained line. Reordering begin/end across records is a caller bug
/// the encoders do not detect.
pub trait Encoder: Send + Sync {
    /// Opens a record.
    fn begin(&self, dst: &mut Vec<u8>);
    /// Closes a record and appends the terminating newline.
    fn end(&self, dst: &mut Vec<u8>);

    fn append_bool(&self, dst: &mut Vec<u8>, key: &str, value: bool);
    fn append_int(&self, dst: &mut Vec<u8>, key: &str, value: i64);
    fn append_uint(&self, dst: &mut Vec<u8>, key: &str, value: u64);
    fn append_float32(&self, dst: &mut Vec<u8>, key: &str, value: f32);
    fn append_float64(&self, dst: &mut Vec<u8>, key: &str, value: f64);
    fn append_byte(&self, dst: &mut Vec<u8>, key: &str, value: u8);
    fn append_str(&self, dst: &mut Vec<u8>, key: &str, value: &str);
    /// Empty configured time format emits Unix seconds; otherwise a quoted
    /// formatted string.
    fn append_time(&self, dst: &mut Vec<u8>, key: &str, value: DateTime<Local>);
    fn append_duration(&self, dst: &mut Vec<u8>, key: &str, value: Duration);

    fn append_bools(&self, dst: &mut Vec<u8>, key: &str, values: &[bool]);
    fn append_ints(&self, dst: &mut Vec<u8>, key: &str, values: &[i64]);
    fn append_uints(&self, dst: &mut Vec<u8>, key: &str, values: &[u64]);
    fn append_floats32(&self, dst: &mut Vec<u8>, key: &str, values: &[f32]);
    fn append_floats64(&self, dst: &mut Vec<u8>, key: &str, values: &[f64]);
    fn append_bytes(&self, dst: &mut Vec<u8>, key: &str, values: &[u8]);
    fn append_strs(&self, dst: &mut Vec<u8>, key: &str, values: &[&str]);
    fn append_times(&self, dst: &mut Vec<u8>, key: &str, values: &[DateTime<Local>]);
    fn append_durations(&self, dst: &mut Vec<u8>, key: &str, values: &[Duration]);

    /// Catch-all for structured payloads; use sparingly.
    fn append_any(&self, dst: &mut Vec<u8>, key: &str, value: &serde_json::Value);
}

/// Adapter so `write!` can format straight into the byte buffer without an
/// intermediate `String`.
struct FmtBuf<'a>(&'a mut Vec<u8>);

impl std::fmt::Write for FmtBuf<'_> {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        self.0.extend_from_slice(s.as_bytes());
        Ok(())
    }
}

/// Formats any `Display` value into the buffer. Writing into a `Vec` cannot
/// fail, so the result is dropped.
pub(crate) fn push_display(dst: &mut Vec<u8>, value: impl std::fmt::Display) {
    let _ = write!(FmtBuf(dst), "{value}");
}

const HEX: &[u8; 16] = b"0123456789abcdef";

/// Escapes one byte into `dst` under the shared escaping table: `\u000X` for
/// bytes below 16, `\u00XX` below 32, backslash-escape for `"` and `\`,
/// verbatim otherwise. Input is assumed UTF-8 and is not re-encoded.
pub(crate) fn escape_byte(dst: &mut Vec<u8>, c: u8) {
    match c {
        0x00..=0x0f => {
            dst.extend_from_slice(b"\\u000");
            dst.push(HEX[c as usize]);
        }
        0x10..=0x1f => {
            dst.extend_from_slice(b"\\u00");
            dst.push(HEX[(c >> 4) as usize]);
            dst.push(HEX[(c & 0x0f) as usize]);
        }
        b'"' | b'\\' => {
            dst.push(b'\\');
            dst.push(c);
        }
        _ => dst.push(c),
    }
}

/// Escapes a whole string byte-by-byte.
pub(crate) fn escape_str(dst: &mut Vec<u8>, s: &str) {
    for &c in s.as_bytes() {
        escape_byte(dst, c);
    }
}

/// Finite floats use the shortest round-trip decimal `Display` gives; the
/// non-finite literals are fixed by contract.
pub(crate) fn push_f64(dst: &mut Vec<u8>, value: f64) {
    if value.is_nan() {
        dst.extend_from_slice(b"NaN");
    } else if value.is_infinite() {
        dst.extend_from_slice(if value > 0.0 { b"+Inf" } else { b"-Inf" });
    } else {
        push_display(dst, value);
    }
}

/// `f32` goes through its own `Display` so the shortest form is shortest for
/// the 32-bit value, not its widened `f64` image.
pub(crate) fn push_f32(dst: &mut Vec<u8>, value: f32) {
    if value.is_nan() {
        dst.extend_from_slice(b"NaN");
    } else if value.is_infinite() {
        dst.extend_from_slice(if value > 0.0 { b"+Inf" } else { b"-Inf" });
    } else {
        push_display(dst, value);
    }
}

/// Renders a duration as a compact unit literal the duration parser accepts
/// back: `ns` below 1 µs, then `us`, `ms`, and seconds from one second up.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn push_duration(dst: &mut Vec<u8>, value: Duration) {
    let nanos = value.as_nanos();
    if nanos == 0 {
        dst.extend_from_slice(b"0s");
    } else if nanos < 1_000 {
        push_display(dst, nanos);
        dst.extend_from_slice(b"ns");
    } else if nanos < 1_000_000 {
        push_display(dst, nanos as f64 / 1e3);
        dst.extend_from_slice(b"us");
    } else if nanos < 1_000_000_000 {
        push_display(dst, nanos as f64 / 1e6);
        dst.extend_from_slice(b"ms");
    } else {
        push_display(dst, nanos as f64 / 1e9);
        dst.push(b's');
    }
}
