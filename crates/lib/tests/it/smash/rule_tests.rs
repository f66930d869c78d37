//! Rule resolution tests
//!
//! Covers each rule shape: path rules in their several spellings, function
//! rules, and spec rules with fallbacks and transformers.

use remold::smash::{Rule, Smash, Spec};
use remold::tree::{Map, PathBuf, Value, path};

use crate::helpers::sample_source;

// ===== PATH RULE SHAPES =====

#[test]
fn test_path_rule_spellings_are_equivalent() {
    let source = sample_source();
    let expected = Some(Value::Text("got it".to_string()));

    let rules: Vec<Rule> = vec![
        Rule::from("blah.more.wait.there"),
        Rule::from("blah.more.wait.there".to_string()),
        Rule::from(["blah", "more", "wait", "there"]),
        Rule::from(vec!["blah", "more", "wait", "there"]),
        Rule::from(vec!["blah".to_string(), "more.wait.there".to_string()]),
        Rule::from(PathBuf::from("blah.more.wait.there")),
        Rule::from(path!("blah.more.wait.there")),
        Rule::path("blah.more.wait.there"),
        Rule::segments(["blah", "more", "wait", "there"]),
    ];

    for rule in &rules {
        assert_eq!(rule.resolve(&source), expected);
    }
}

#[test]
fn test_path_rule_miss_is_none() {
    let source = sample_source();

    assert_eq!(Rule::path("no.such.path").resolve(&source), None);
    // Traversal through a scalar is a miss, not an error
    assert_eq!(Rule::path("num.deeper").resolve(&source), None);
}

#[test]
fn test_path_rule_reads_into_lists() {
    let source = sample_source();
    let resolved = Rule::path("gist.1").resolve(&source);
    assert_eq!(resolved, Some(Value::Text("more".to_string())));
}

// ===== FUNCTION RULES =====

#[test]
fn test_func_rule_derives_from_whole_source() {
    let rule = Rule::func(|src: &Map| {
        let name = src.get_as::<&str>("info.name").unwrap_or("nobody");
        let age = src.get_as::<i64>("info.age").unwrap_or(0);
        Value::Text(format!("{name} ({age})"))
    });

    let resolved = rule.resolve(&sample_source());
    assert_eq!(resolved, Some(Value::Text("Arturo (30)".to_string())));
}

#[test]
#[should_panic(expected = "rule boom")]
fn test_func_rule_panic_propagates_through_apply() {
    let smasher = Smash::new().rule("x", Rule::func(|_| panic!("rule boom")));
    smasher.apply(&Map::new());
}

// ===== SPEC FALLBACKS =====

#[test]
fn test_fallback_substitutes_on_absent_and_null() {
    let source = Map::from_json(r#"{"explicit": null, "present": "here"}"#).unwrap();

    let resolved = Spec::new("absent").or("fallback").resolve(&source);
    assert_eq!(resolved, Some(Value::Text("fallback".to_string())));

    let resolved = Spec::new("explicit").or("fallback").resolve(&source);
    assert_eq!(resolved, Some(Value::Text("fallback".to_string())));

    let resolved = Spec::new("present").or("fallback").resolve(&source);
    assert_eq!(resolved, Some(Value::Text("here".to_string())));
}

#[test]
fn test_spec_without_fallback_misses_as_none() {
    assert_eq!(Spec::new("absent").resolve(&Map::new()), None);
}

#[test]
fn test_fallback_runs_before_function_transformer() {
    // The transformer must observe the fallback, not the miss
    let spec = Spec::new("missing").or("dave").map(|value, _| {
        assert_eq!(value, Some(Value::Text("dave".to_string())));
        Value::Text("seen".to_string())
    });

    assert_eq!(
        spec.resolve(&Map::new()),
        Some(Value::Text("seen".to_string()))
    );
}

#[test]
fn test_fallback_runs_before_named_method() {
    let resolved = Spec::new("missing")
        .or(5)
        .method("to_string")
        .resolve(&Map::new());
    assert_eq!(resolved, Some(Value::Text("5".to_string())));
}

// ===== SPEC TRANSFORMERS =====

#[test]
fn test_function_transformer_reaches_the_source() {
    let source = sample_source();

    // Cross-field derivation: the closure gets the read value and the map
    let spec = Spec::new("info.name").map(|name, src: &Map| {
        let greeting = src.get_as::<&str>("stone").unwrap_or("?");
        match name {
            Some(name) => Value::Text(format!("{greeting} {name}")),
            None => Value::Null,
        }
    });

    assert_eq!(
        spec.resolve(&source),
        Some(Value::Text("yes! Arturo".to_string()))
    );
}

#[test]
fn test_named_method_dispatches_by_type() {
    let source = Map::from_json(
        r#"{"num": 123, "digits": "123", "word": "hola", "padded": "  x  ", "truth": true}"#,
    )
    .unwrap();

    let resolve = |from: &str, method: &str| Spec::new(from).method(method).resolve(&source);

    // Numbers render, digit strings pass through case changes unchanged
    assert_eq!(resolve("num", "to_string"), Some(Value::Text("123".into())));
    assert_eq!(
        resolve("digits", "to_uppercase"),
        Some(Value::Text("123".into()))
    );
    assert_eq!(
        resolve("word", "to_uppercase"),
        Some(Value::Text("HOLA".into()))
    );
    assert_eq!(resolve("padded", "trim"), Some(Value::Text("x".into())));
    assert_eq!(
        resolve("truth", "to_string"),
        Some(Value::Text("true".into()))
    );
}

#[test]
fn test_named_method_on_wrong_type_is_absent() {
    let source = sample_source();

    // Case changes do not apply to numbers, nor anything to maps
    assert_eq!(Spec::new("num").method("to_uppercase").resolve(&source), None);
    assert_eq!(Spec::new("info").method("to_string").resolve(&source), None);
    assert_eq!(Spec::new("num").method("no_such_method").resolve(&source), None);

    // Absent source with no fallback never reaches the method
    assert_eq!(Spec::new("gone").method("to_string").resolve(&source), None);

    // Through the engine these all land as null at the destination
    let result = Smash::new()
        .rule("out", Spec::new("num").method("to_uppercase"))
        .apply(&source);
    assert_eq!(result.get("out"), Some(&Value::Null));
}

#[test]
fn test_spec_exposes_its_source_path() {
    let spec = Spec::new("info..name.");
    assert_eq!(spec.from().as_str(), "info.name");
}

// ===== SEGMENT-FORM SPECS =====

#[test]
fn test_spec_segments_form() {
    let resolved = Spec::segments(["info", "name"]).resolve(&sample_source());
    assert_eq!(resolved, Some(Value::Text("Arturo".to_string())));
}
