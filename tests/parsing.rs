use linelog::{parse_duration, parse_size};
use std::time::Duration;

const KIB: u64 = 1024;
const GIB: u64 = 1024 * 1024 * 1024;

#[test]
fn size_plain_units_are_powers_of_1024() {
    assert_eq!(parse_size("7").unwrap(), 7);
    assert_eq!(parse_size("7B").unwrap(), 7);
    assert_eq!(parse_size("3K").unwrap(), 3 * KIB);
    assert_eq!(parse_size("3KB").unwrap(), 3 * KIB);
    assert_eq!(parse_size("2M").unwrap(), 2 * KIB * KIB);
    assert_eq!(parse_size("1G").unwrap(), GIB);
}

#[test]
fn size_lowercase_trailing_b_divides_by_eight() {
    assert_eq!(parse_size("512Kb").unwrap(), 65536);
    assert_eq!(parse_size("64kb").unwrap(), 8 * KIB);
    assert_eq!(parse_size("1024gb").unwrap(), 1024 / 8 * GIB);
}

#[test]
fn size_rejects_blank_and_garbage() {
    assert!(parse_size("   ").is_err());
    assert!(parse_size("").is_err());
    assert!(parse_size("xxx").is_err());
    assert!(parse_size("-1K").is_err());
    assert!(parse_size("1.5K").is_err());
    assert!(parse_size("9X").is_err());
}

#[test]
fn size_suffixes_are_idempotent() {
    for n in [0u64, 1, 17, 4096] {
        assert_eq!(parse_size(&format!("{n}B")).unwrap(), n);
        assert_eq!(parse_size(&format!("{n}K")).unwrap(), n * KIB);
        assert_eq!(parse_size(&format!("{n}kb")).unwrap(), n / 8 * KIB);
    }
}

#[test]
fn duration_standard_grammar() {
    assert_eq!(parse_duration("10s").unwrap(), Duration::from_secs(10));
    assert_eq!(parse_duration("250ms").unwrap(), Duration::from_millis(250));
    assert_eq!(parse_duration("3us").unwrap(), Duration::from_micros(3));
    assert_eq!(parse_duration("90ns").unwrap(), Duration::from_nanos(90));
    assert_eq!(parse_duration("2m").unwrap(), Duration::from_secs(120));
    assert_eq!(parse_duration("1h30m").unwrap(), Duration::from_secs(5400));
    assert_eq!(parse_duration("1.5s").unwrap(), Duration::from_millis(1500));
    assert_eq!(parse_duration("0").unwrap(), Duration::ZERO);
}

#[test]
fn duration_day_extension() {
    assert_eq!(parse_duration("1d").unwrap(), Duration::from_secs(86_400));
    assert_eq!(parse_duration("30d").unwrap(), Duration::from_secs(30 * 86_400));
    assert_eq!(parse_duration("7D").unwrap(), Duration::from_secs(7 * 86_400));
}

#[test]
fn duration_day_does_not_compose() {
    assert!(parse_duration("1d12h").is_err());
    assert!(parse_duration("12h1d").is_err());
}

#[test]
fn duration_rejects_bad_input() {
    assert!(parse_duration("").is_err());
    assert!(parse_duration("   ").is_err());
    assert!(parse_duration("5").is_err());
    assert!(parse_duration("-3s").is_err());
    assert!(parse_duration("3w").is_err());
    assert!(parse_duration("s").is_err());
}
