//! Duration literal parser: the composite `h`/`m`/`s`/`ms`/`us`/`ns` grammar
//! plus a whole-day `d`/`D` suffix for retention windows like "30d".

use crate::error::Error;
use std::time::Duration;

const NANOS_PER_DAY: f64 = 86_400.0 * 1e9;

/// Parses a duration literal.
///
/// Accepts composite forms like `"1h30m"`, `"250ms"`, `"1.5s"`, the bare
/// `"0"`, and a whole-day form where the suffix is exactly `d` or `D`
/// (`"30d"` is 720 hours). The day unit does not combine with the others:
/// `"1d12h"` is rejected.
///
/// # Errors
/// Empty input, a negative sign, an unknown or missing unit, or an
/// overflowing result.
pub fn parse_duration(s: &str) -> Result<Duration, Error> {
    let s = s.trim();
    if s.is_empty() {
        return Err(Error::Parse("empty duration literal".to_string()));
    }
    if s.starts_with('-') {
        return Err(Error::Parse(format!("negative duration: '{s}'")));
    }
    if s == "0" {
        return Ok(Duration::ZERO);
    }

    // Whole-day form: the entire remainder must be a plain decimal magnitude.
    if let Some(days) = s.strip_suffix(['d', 'D'])
        && let Ok(n) = parse_magnitude(days)
    {
        return nanos_to_duration(n * NANOS_PER_DAY, s);
    }

    let mut rest = s;
    let mut total_nanos = 0.0_f64;
    while !rest.is_empty() {
        let num_len = rest
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .unwrap_or(rest.len());
        let value = parse_magnitude(&rest[..num_len])
            .map_err(|()| Error::Parse(format!("invalid duration magnitude in '{s}'")))?;
        rest = &rest[num_len..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let unit = &rest[..unit_len];
        rest = &rest[unit_len..];

        let unit_nanos = match unit {
            "ns" => 1.0,
            "us" | "\u{b5}s" => 1e3,
            "ms" => 1e6,
            "s" => 1e9,
            "m" => 60.0 * 1e9,
            "h" => 3600.0 * 1e9,
            "" => return Err(Error::Parse(format!("missing unit in duration: '{s}'"))),
            _ => return Err(Error::Parse(format!("unknown duration unit '{unit}' in '{s}'"))),
        };
        total_nanos += value * unit_nanos;
    }

    nanos_to_duration(total_nanos, s)
}

/// A magnitude is digits with at most one decimal point; anything else
/// (signs, exponents, empty) is rejected so units cannot hide inside it.
fn parse_magnitude(s: &str) -> Result<f64, ()> {
    if s.is_empty() || !s.bytes().any(|b| b.is_ascii_digit()) {
        return Err(());
    }
    if s.bytes().any(|b| !b.is_ascii_digit() && b != b'.') {
        return Err(());
    }
    if s.bytes().filter(|&b| b == b'.').count() > 1 {
        return Err(());
    }
    s.parse().map_err(|_| ())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn nanos_to_duration(nanos: f64, literal: &str) -> Result<Duration, Error> {
    if !nanos.is_finite() || nanos >= u64::MAX as f64 {
        return Err(Error::Parse(format!("duration literal overflows: '{literal}'")));
    }
    Ok(Duration::from_nanos(nanos as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composite_components_accumulate() {
        assert_eq!(parse_duration("1h30m").unwrap(), Duration::from_secs(5400));
        assert_eq!(parse_duration("2s500ms").unwrap(), Duration::from_millis(2500));
    }

    #[test]
    fn decimal_magnitudes() {
        assert_eq!(parse_duration("1.5h").unwrap(), Duration::from_secs(5400));
        assert_eq!(parse_duration("0.25s").unwrap(), Duration::from_millis(250));
    }

    #[test]
    fn day_suffix_is_whole_days_only() {
        assert_eq!(parse_duration("2d").unwrap(), Duration::from_secs(2 * 86_400));
        assert_eq!(parse_duration("2D").unwrap(), Duration::from_secs(2 * 86_400));
        assert!(parse_duration("1d12h").is_err());
    }

    #[test]
    fn bare_zero_is_accepted() {
        assert_eq!(parse_duration("0").unwrap(), Duration::ZERO);
    }

    #[test]
    fn missing_or_unknown_units_are_rejected() {
        assert!(parse_duration("5").is_err());
        assert!(parse_duration("5w").is_err());
        assert!(parse_duration("").is_err());
        assert!(parse_duration("-3s").is_err());
    }
}
