//! Config files specify sizes as "16K" or "1G" but writers and rotation
//! budgets operate on raw bytes — these two functions bridge that gap.

use crate::error::Error;

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;
const GIB: u64 = 1024 * 1024 * 1024;

/// Parses a byte-size literal: a decimal integer with an optional unit suffix.
///
/// `B`, `K`/`KB`, `M`/`MB`, `G`/`GB` are powers of 1024, case-insensitive on
/// the magnitude letter. A lowercase trailing `b` denotes bits: the number is
/// divided by 8 before the unit multiplication (`64kb` is 8 KiB, `512Kb` is
/// 64 KiB). A missing unit means bytes.
///
/// # Errors
/// Empty input, a negative or non-numeric magnitude, an unknown unit, or an
/// overflowing result.
pub fn parse_size(s: &str) -> Result<u64, Error> {
    let s = s.trim();
    if s.is_empty() {
        return Err(Error::Parse("empty byte-size literal".to_string()));
    }

    let split = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    let (num, unit) = s.split_at(split);
    if num.is_empty() {
        return Err(Error::Parse(format!("invalid byte-size magnitude: '{s}'")));
    }

    let value: u64 = num
        .parse()
        .map_err(|_| Error::Parse(format!("invalid byte-size magnitude: '{num}'")))?;

    // A lowercase trailing 'b' means the magnitude counts bits, not bytes.
    let bits = unit.ends_with('b');

    let multiplier = match unit.to_ascii_uppercase().as_str() {
        "" | "B" => 1,
        "K" | "KB" => KIB,
        "M" | "MB" => MIB,
        "G" | "GB" => GIB,
        _ => return Err(Error::Parse(format!("unknown byte-size unit: '{unit}'"))),
    };

    let value = if bits { value / 8 } else { value };
    value
        .checked_mul(multiplier)
        .ok_or_else(|| Error::Parse(format!("byte-size literal overflows: '{s}'")))
}

/// Raw byte counts are unreadable in diagnostics.
#[must_use]
pub fn format_size(bytes: u64) -> String {
    #[allow(clippy::cast_precision_loss)]
    let bytes_f = bytes as f64;

    if bytes >= GIB {
        format!("{:.2} GB", bytes_f / GIB as f64)
    } else if bytes >= MIB {
        format!("{:.2} MB", bytes_f / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.2} KB", bytes_f / KIB as f64)
    } else {
        format!("{bytes} B")
    }
}
