/// Tests that print and parse agree with each other across whole trees
use crate::*;

fn roundtrip(value: &Value) -> Value {
    let text = print(value).unwrap();
    parse(&text).unwrap_or_else(|e| panic!("Failed to reparse {}: {}", text, e))
}

#[test]
fn test_roundtrip_safe_integers() {
    let mut samples = vec![
        0,
        1,
        -1,
        42,
        1280,
        1 << 31,
        -(1 << 31),
        MAX_SAFE_INTEGER,
        -MAX_SAFE_INTEGER,
    ];
    // Spread over the whole range, not just the interesting edges
    let mut n: i64 = 7;
    while n < MAX_SAFE_INTEGER / 3 {
        samples.push(n);
        samples.push(-n);
        n = n * 3 + 1;
    }

    for sample in samples {
        let value = Value::number(sample);
        let text = print(&value).unwrap();
        assert_eq!(text, sample.to_string());
        assert_eq!(roundtrip(&value).as_i64(), Some(sample), "sample {}", sample);
    }
}

#[test]
fn test_roundtrip_fractions() {
    for sample in [0.5, -0.25, 0.30000000000000004, 1e-7, 1.5e300, 123456.789] {
        let value = Value::number(sample);
        assert_eq!(roundtrip(&value).as_f64(), Some(sample), "sample {}", sample);
    }
}

#[test]
fn test_roundtrip_containers() {
    let source = r#"{"a":[1,[2,[3,{}]],[]],"b":{"c":"d\n","e":null},"f":false,"g":"\u00e9"}"#;
    let value = parse(source).unwrap();

    assert_eq!(roundtrip(&value), value);
    assert_eq!(parse(&print_pretty(&value).unwrap()).unwrap(), value);
}

#[test]
fn test_roundtrip_built_tree() {
    let mut body = Value::object();
    body.add_string("url", "https://example.com/?q=\"x\"").unwrap();
    body.add_number("quality", 85).unwrap();
    body.add_bool("block_ads", false).unwrap();
    let clip = body.add_member("clip", Value::object()).unwrap();
    clip.add_number("x", 0.5).unwrap();

    let back = roundtrip(&body);
    assert_eq!(back, body);
    assert_eq!(back.get_path("clip.x").and_then(Value::as_f64), Some(0.5));
}

#[test]
fn test_roundtrip_keeps_duplicate_keys() {
    let value = parse(r#"{"k":1,"k":2}"#).unwrap();
    let back = roundtrip(&value);

    assert_eq!(back.len(), 2);
    assert_eq!(back.get("k").and_then(Value::as_i64), Some(1));
}

#[test]
fn test_malformed_inputs_fail() {
    let inputs = [
        "", "   ", "[", "]", "{", "{\"a\"}", "{\"a\":}", "{\"a\" 1}", "[1,]", "[1 2]",
        "{,}", "{1:2}", "nul", "tru", "-", "\"abc", "\"\\u12\"", "@",
    ];

    for input in inputs {
        assert!(parse(input).is_err(), "Expected failure for {:?}", input);
    }
}

#[test]
fn test_malformed_errors_have_kind() {
    let error = JsonError::from(parse("[1,").unwrap_err());
    assert_eq!(error.kind(), ErrorKind::MalformedInput);
}

#[test]
fn test_empty_containers_roundtrip() {
    for source in ["[]", "{}", "[[]]", "{\"a\":{}}"] {
        let value = parse(source).unwrap();
        assert_eq!(print(&value).unwrap(), source);
    }
}

#[test]
fn test_roundtrip_at_nesting_limit_on_small_stack() {
    // Spawned threads default to a 2 MiB stack
    let result = std::thread::Builder::new()
        .stack_size(2 * 1024 * 1024)
        .spawn(|| {
            let source = format!(
                "{}{}",
                "[".repeat(DEFAULT_MAX_DEPTH),
                "]".repeat(DEFAULT_MAX_DEPTH)
            );
            let value = parse(&source).unwrap();
            let compact = print(&value).unwrap();
            let pretty = print_pretty(&value).unwrap();
            (source, compact, parse(&pretty).unwrap() == value)
        })
        .unwrap()
        .join()
        .unwrap();

    let (source, compact, pretty_roundtrips) = result;
    assert_eq!(compact, source);
    assert!(pretty_roundtrips);
}
