use chrono::Local;
use linelog::{Encoder, JsonEncoder};
use std::time::Duration;

fn encode_one(f: impl FnOnce(&JsonEncoder, &mut Vec<u8>)) -> String {
    let enc = JsonEncoder::new();
    let mut buf = Vec::new();
    enc.begin(&mut buf);
    f(&enc, &mut buf);
    enc.end(&mut buf);
    String::from_utf8(buf).unwrap()
}

#[test]
fn mixed_fields_encode_in_order() {
    let out = encode_one(|enc, buf| {
        enc.append_bool(buf, "foo", true);
        enc.append_int(buf, "bar", 42);
        enc.append_str(buf, "baz", "hi\nworld");
    });
    assert_eq!(out, "{\"foo\":true,\"bar\":42,\"baz\":\"hi\\u000aworld\"}\n");
}

#[test]
fn float32_nan_is_the_quoted_literal() {
    let out = encode_one(|enc, buf| enc.append_float32(buf, "x", f32::NAN));
    assert_eq!(out, "{\"x\":\"NaN\"}\n");
}

#[test]
fn infinities_have_signed_literals() {
    let out = encode_one(|enc, buf| {
        enc.append_float64(buf, "up", f64::INFINITY);
        enc.append_float64(buf, "down", f64::NEG_INFINITY);
    });
    assert_eq!(out, "{\"up\":\"+Inf\",\"down\":\"-Inf\"}\n");
}

#[test]
fn finite_floats_round_trip_through_serde() {
    for x in [0.0f64, 1.5, -2.25, 1e-7, 12345.678_9, f64::MIN_POSITIVE] {
        let out = encode_one(|enc, buf| enc.append_float64(buf, "x", x));
        let parsed: serde_json::Value = serde_json::from_str(out.trim_end()).unwrap();
        assert_eq!(parsed["x"].as_f64().unwrap(), x, "round-trip of {x}");
    }
}

#[test]
fn control_and_quote_bytes_round_trip_through_serde() {
    let nasty: String = (0u8..0x20)
        .map(char::from)
        .chain(['"', '\\', 'a', '\u{e9}'])
        .collect();
    let out = encode_one(|enc, buf| enc.append_str(buf, "s", &nasty));
    let parsed: serde_json::Value = serde_json::from_str(out.trim_end()).unwrap();
    assert_eq!(parsed["s"].as_str().unwrap(), nasty);
}

#[test]
fn exactly_one_trailing_newline() {
    let out = encode_one(|enc, buf| {
        enc.append_str(buf, "m", "no newline here");
        enc.append_ints(buf, "xs", &[1, 2, 3]);
    });
    assert_eq!(out.bytes().filter(|&b| b == b'\n').count(), 1);
    assert!(out.ends_with('\n'));
}

#[test]
fn empty_record_is_an_empty_object() {
    let out = encode_one(|_, _| {});
    assert_eq!(out, "{}\n");
}

#[test]
fn concatenated_records_stay_legal() {
    let enc = JsonEncoder::new();
    let mut buf = Vec::new();
    for i in 0..3 {
        enc.begin(&mut buf);
        enc.append_int(&mut buf, "i", i);
        enc.end(&mut buf);
    }
    let text = String::from_utf8(buf).unwrap();
    for (i, line) in text.lines().enumerate() {
        let parsed: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(parsed["i"].as_i64().unwrap(), i as i64);
    }
}

#[test]
fn typed_scalars() {
    let out = encode_one(|enc, buf| {
        enc.append_uint(buf, "u", u64::MAX);
        enc.append_int(buf, "i", i64::MIN);
        enc.append_byte(buf, "b", b'x');
        enc.append_byte(buf, "q", b'"');
        enc.append_duration(buf, "d", Duration::from_millis(1500));
    });
    assert_eq!(
        out,
        format!(
            "{{\"u\":{},\"i\":{},\"b\":\"x\",\"q\":\"\\\"\",\"d\":\"1.5s\"}}\n",
            u64::MAX,
            i64::MIN
        )
    );
}

#[test]
fn duration_units_scale_down() {
    let cases = [
        (Duration::from_nanos(15), "\"15ns\""),
        (Duration::from_micros(20), "\"20us\""),
        (Duration::from_millis(250), "\"250ms\""),
        (Duration::from_secs(3), "\"3s\""),
        (Duration::ZERO, "\"0s\""),
    ];
    for (d, expected) in cases {
        let out = encode_one(|enc, buf| enc.append_duration(buf, "d", d));
        assert_eq!(out, format!("{{\"d\":{expected}}}\n"));
    }
}

#[test]
fn arrays_use_bracket_lookback() {
    let out = encode_one(|enc, buf| {
        enc.append_bools(buf, "bs", &[true, false]);
        enc.append_floats64(buf, "fs", &[1.5, f64::NAN]);
        enc.append_strs(buf, "ss", &["a", "b\"c"]);
        enc.append_uints(buf, "empty", &[]);
    });
    assert_eq!(
        out,
        "{\"bs\":[true,false],\"fs\":[1.5,\"NaN\"],\"ss\":[\"a\",\"b\\\"c\"],\"empty\":[]}\n"
    );
}

#[test]
fn byte_arrays_are_single_char_strings() {
    let out = encode_one(|enc, buf| enc.append_bytes(buf, "bs", &[b'h', b'"', 0x0a]));
    assert_eq!(out, "{\"bs\":[\"h\",\"\\\"\",\"\\u000a\"]}\n");
}

#[test]
fn time_empty_format_is_unix_seconds() {
    let now = Local::now();
    let out = encode_one(|enc, buf| enc.append_time(buf, "ts", now));
    assert_eq!(out, format!("{{\"ts\":{}}}\n", now.timestamp()));
}

#[test]
fn time_with_format_is_a_quoted_string() {
    let enc = JsonEncoder::new().time_format("%Y-%m-%d");
    let now = Local::now();
    let mut buf = Vec::new();
    enc.begin(&mut buf);
    enc.append_time(&mut buf, "ts", now);
    enc.end(&mut buf);
    let out = String::from_utf8(buf).unwrap();
    assert_eq!(out, format!("{{\"ts\":\"{}\"}}\n", now.format("%Y-%m-%d")));
}

#[test]
fn any_embeds_structured_json() {
    let value = serde_json::json!({"a": [1, 2], "b": "x"});
    let out = encode_one(|enc, buf| enc.append_any(buf, "v", &value));
    assert_eq!(out, "{\"v\":{\"a\":[1,2],\"b\":\"x\"}}\n");
}
