use json_path_extract::{ExtractError, JsonPathEvaluator, MAX_PARSING_DEPTH};
use test_log::test;

fn normalize(input: &str) -> String {
    input.chars().filter(|c| !c.is_whitespace()).collect()
}

const NESTED_DOC: &str = r#"{"a": {"b": [ { "c" : "foo" } ] } }"#;

#[test]
fn json_extract() {
    let cases = [
        ("$", r#"{"a":{"b":[{"c":"foo"}]}}"#),
        ("$.a", r#"{"b":[{"c":"foo"}]}"#),
        ("$.a.b", r#"[{"c":"foo"}]"#),
        ("$.a.b[0]", r#"{"c":"foo"}"#),
        ("$.a.b[0].c", r#""foo""#),
    ];
    for (path, expected) in cases {
        let mut evaluator =
            JsonPathEvaluator::new(path, false).expect("valid legacy path");
        let result = evaluator.extract(NESTED_DOC).expect("scan succeeds");
        assert_eq!(result.value, expected, "path {path:?}");
        assert!(!result.is_null, "path {path:?}");
    }
}

#[test]
fn json_extract_scalar() {
    let cases = [
        ("$", ""),
        ("$.a", ""),
        ("$.a.b", ""),
        ("$.a.b[0]", ""),
        ("$.a.b[0].c", "foo"),
    ];
    for (path, expected) in cases {
        let mut evaluator =
            JsonPathEvaluator::new(path, false).expect("valid legacy path");
        let result = evaluator.extract_scalar(NESTED_DOC).expect("scan succeeds");
        if expected.is_empty() {
            assert!(result.is_null, "path {path:?}");
        } else {
            assert_eq!(result.value, expected, "path {path:?}");
            assert!(!result.is_null, "path {path:?}");
        }
    }
}

#[test]
fn paths_ending_with_a_dot() {
    let cases = [
        ("$.", r#"{"a":{"b":[{"c":"foo"}]}}"#),
        ("$.a.", r#"{"b":[{"c":"foo"}]}"#),
        ("$.a.b.", r#"[{"c":"foo"}]"#),
        ("$.a.b[0].", r#"{"c":"foo"}"#),
        ("$.a.b[0].c.", r#""foo""#),
    ];
    for sql_standard_mode in [false, true] {
        for (path, expected) in cases {
            let mut evaluator = JsonPathEvaluator::new(path, sql_standard_mode)
                .expect("trailing dot is tolerated");
            let result = evaluator.extract(NESTED_DOC).expect("scan succeeds");
            assert_eq!(result.value, expected, "path {path:?}");
            assert!(!result.is_null);
        }
    }
}

fn expect_scalar(json: &str, path: &str, expected: &str) {
    let mut evaluator = JsonPathEvaluator::new(path, true).expect("valid path");
    let result = evaluator.extract_scalar(json).expect("scan succeeds");
    if expected.is_empty() {
        assert!(result.is_null, "{path:?} over {json:?}");
    } else {
        assert!(!result.is_null, "{path:?} over {json:?}");
        assert_eq!(result.value, expected, "{path:?} over {json:?}");
    }
}

// Scalar extraction stops the moment the scalar's lexeme is read, so
// malformed content after it goes unnoticed and a number is cut at the end
// of its longest valid prefix. Load-bearing behavior, kept as is.
#[test]
fn scalar_extraction_is_lax_about_trailing_garbage() {
    expect_scalar(r#"{"a": 0001}"#, "$.a", "0");
    expect_scalar(r#"{"a": 123abc}"#, "$.a", "123");
    expect_scalar(r#"{"a": 1ab\\unicorn\0{{{{{{)"#, "$.a", "1");
}

#[test]
fn very_long_integers_pass_through() {
    let long_integer = "1".repeat(500);
    expect_scalar(&format!(r#"{{"a": {long_integer}}}"#), "$.a", &long_integer);
}

#[test]
fn scalar_booleans() {
    expect_scalar(r#"{"a": true}"#, "$.a", "true");
    expect_scalar(r#"{"a": false}"#, "$.a", "false");
    expect_scalar(r#"{"a": null}"#, "$.a", "");
}

#[test]
fn first_match_wins_and_resolves_to_null() {
    let json = r#"{ "a" : { "b" : 1 }, "a" : { "c" : null }, "a" : { "c" : 2 } }"#;
    let mut evaluator = JsonPathEvaluator::new("$.a.c", true).expect("valid path");
    let result = evaluator.extract(json).expect("scan succeeds");
    assert_eq!(result.value, "null");
    assert!(result.is_null);
    assert!(result.stopped_on_first_match);

    let mut evaluator = JsonPathEvaluator::new("$.a.c.d", true).expect("valid path");
    let result = evaluator.extract(json).expect("scan succeeds");
    assert!(result.is_null);
    assert!(!result.stopped_on_first_match);
    assert_eq!(result.value, "");
}

#[test]
fn quoted_and_negative_indexes() {
    let json = r#"[2,1,0,{"a":"3"},4]"#;
    let mut evaluator = JsonPathEvaluator::new("$[3]", false).expect("valid path");
    let result = evaluator.extract(json).expect("scan succeeds");
    assert_eq!(result.value, r#"{"a":"3"}"#);

    let mut evaluator = JsonPathEvaluator::new("$['-0']", false).expect("valid path");
    let result = evaluator.extract(json).expect("scan succeeds");
    assert_eq!(result.value, "2");
    assert!(!result.is_null);

    let mut evaluator = JsonPathEvaluator::new("$['-5']", false).expect("valid path");
    let result = evaluator.extract(json).expect("scan succeeds");
    assert!(result.is_null);
    assert!(!result.stopped_on_first_match);
}

#[test]
fn compiled_path_reuse_does_not_cross_contaminate() {
    let mut evaluator = JsonPathEvaluator::new("$.a", false).expect("valid path");
    let documents = [
        (r#"{"a": 1}"#, "1", false),
        (r#"{"b": 2}"#, "", true),
        (r#"{"a": [1, 2]}"#, "[1,2]", false),
        (r#"{"a": null}"#, "null", true),
        (r#"{"a": "x"}"#, r#""x""#, false),
    ];
    for _ in 0..3 {
        for (json, expected, is_null) in documents {
            let result = evaluator.extract(json).expect("scan succeeds");
            assert_eq!(result.value, expected, "doc {json:?}");
            assert_eq!(result.is_null, is_null, "doc {json:?}");
        }
    }
}

#[test]
fn cloned_evaluators_extract_independently() {
    let evaluator = JsonPathEvaluator::new("$.a[0]", true).expect("valid path");
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let mut evaluator = evaluator.clone();
            std::thread::spawn(move || {
                let json = format!(r#"{{"a": [{i}]}}"#);
                let result = evaluator.extract(&json).expect("scan succeeds");
                assert_eq!(result.value, i.to_string());
                assert!(!result.is_null);
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("extraction thread");
    }
}

#[test]
fn root_extraction_only_normalizes_whitespace() {
    let json = r#"
        { "store" : {
            "books" : [ { "title" : "moby-dick", "price" : 8.99 },
                        { "title" : "honour", "price" : 12.99 } ],
            "open" : true
        } }
    "#;
    let mut evaluator = JsonPathEvaluator::new("$", true).expect("valid path");
    let result = evaluator.extract(json).expect("scan succeeds");
    assert_eq!(result.value, normalize(json));
    let reparsed: serde_json::Value =
        serde_json::from_str(&result.value).expect("output is valid JSON");
    let original: serde_json::Value = serde_json::from_str(json).expect("input is valid JSON");
    assert_eq!(reparsed, original);
}

#[test]
fn extract_array_of_scalars() {
    let mut evaluator = JsonPathEvaluator::new("$.a", false).expect("valid path");
    let result = evaluator
        .extract_array(r#"{"a": [1, "two", [3], {"four": 4}]}"#)
        .expect("scan succeeds");
    assert!(!result.is_null);
    assert_eq!(result.elements, ["1", "\"two\"", "[3]", r#"{"four":4}"#]);

    let result = evaluator
        .extract_array(r#"{"a": "not an array"}"#)
        .expect("scan succeeds");
    assert!(result.is_null);
    assert!(result.stopped_on_first_match);
    assert!(result.elements.is_empty());
}

#[test]
fn special_character_escaping_is_explicit() {
    let json = r#"{"a": "quote:\" backslash:\\"}"#;
    let mut evaluator = JsonPathEvaluator::new("$.a", false).expect("valid path");
    let unescaped = evaluator.extract(json).expect("scan succeeds");
    assert_eq!(unescaped.value, "\"quote:\" backslash:\\\"");

    evaluator.enable_special_character_escaping();
    let escaped = evaluator.extract(json).expect("scan succeeds");
    assert_eq!(escaped.value, r#""quote:\" backslash:\\""#);

    evaluator.set_special_character_escaping(false);
    let unescaped_again = evaluator.extract(json).expect("scan succeeds");
    assert_eq!(unescaped_again.value, unescaped.value);
}

#[test]
fn nesting_close_to_the_limit_succeeds() {
    let nested_arrays = "[".repeat(MAX_PARSING_DEPTH);
    let mut nested_objects = String::new();
    for _ in 0..MAX_PARSING_DEPTH {
        nested_objects.push_str("{\"x\":");
    }
    for json in [nested_arrays.as_str(), nested_objects.as_str()] {
        // The brackets are never closed, so extraction finds null; the
        // nesting guard itself does not trip
        let mut evaluator = JsonPathEvaluator::new("$", true).expect("valid path");
        assert!(evaluator.extract(json).expect("no depth error").is_null);
        assert!(evaluator.extract_scalar(json).expect("no depth error").is_null);
        let mut evaluator = JsonPathEvaluator::new("$", false).expect("valid path");
        assert!(evaluator.extract_array(json).expect("no depth error").is_null);
    }
}

#[test]
fn deeply_nested_arrays_fail() {
    let json = "[".repeat(MAX_PARSING_DEPTH + 1);
    let mut path = String::from("$");
    for _ in 0..MAX_PARSING_DEPTH + 1 {
        path.push_str("[0]");
    }
    let mut evaluator = JsonPathEvaluator::new(&path, true).expect("valid path");
    let message = "JSON parsing failed due to deeply nested array/struct. \
                   Maximum nesting depth is 1000";
    let err = evaluator.extract(&json).expect_err("depth error");
    assert_eq!(err, ExtractError::DeeplyNested);
    assert_eq!(err.to_string(), message);
    assert!(evaluator.extract_scalar(&json).is_err());
    let mut evaluator = JsonPathEvaluator::new(&path, false).expect("valid path");
    assert!(evaluator.extract_array(&json).is_err());
}

#[test]
fn deeply_nested_objects_fail() {
    let mut json = String::new();
    let mut path = String::from("$");
    for _ in 0..MAX_PARSING_DEPTH + 1 {
        json.push_str("{\"x\":");
        path.push_str(".x");
    }
    let mut evaluator = JsonPathEvaluator::new(&path, true).expect("valid path");
    assert_eq!(
        evaluator.extract(&json).expect_err("depth error"),
        ExtractError::DeeplyNested
    );
    assert_eq!(
        evaluator.extract_scalar(&json).expect_err("depth error"),
        ExtractError::DeeplyNested
    );
    let mut evaluator = JsonPathEvaluator::new(&path, false).expect("valid path");
    assert_eq!(
        evaluator.extract_array(&json).expect_err("depth error"),
        ExtractError::DeeplyNested
    );
}
