//! Sweep-removal integration tests
//!
//! Bottom-up cascading, the emptiness convenience, list participation, and
//! reuse of one bound sweep across maps.

use remold::tree::{Map, Value};
use remold::unset::{Unset, unset_empty_properties};
use serde_json::json;

use crate::helpers::{as_json, hollow_tree};

fn is_123_or_empty_map(value: &Value) -> bool {
    *value == 123 || value.as_map().map(|m| m.is_empty()).unwrap_or(false)
}

// ===== BOTTOM-UP CASCADE =====

#[test]
fn test_removal_cascades_to_the_root() {
    // Removing c empties b, which empties a, which is then removed too
    let mut map = Map::from_json(r#"{"a": {"b": {"c": 123}}}"#).unwrap();
    Unset::new(is_123_or_empty_map).apply(&mut map);
    assert!(map.is_empty());
}

#[test]
fn test_partial_cascade_keeps_survivors() {
    let mut map = Map::from_json(
        r#"{
            "a": {"b": {"c": 123}, "keep": "here"},
            "foo": 123,
            "bar": true
        }"#,
    )
    .unwrap();

    Unset::new(is_123_or_empty_map).apply(&mut map);

    assert_eq!(
        as_json(&map),
        json!({"a": {"keep": "here"}, "bar": true})
    );
}

#[test]
fn test_predicate_sees_leaves_and_containers() {
    // A container predicate fires on subtrees after their children settle
    let mut map = Map::from_json(r#"{"drop": {"tag": "x"}, "keep": {"tag": "y"}}"#).unwrap();

    Unset::new(|v| {
        v.as_map()
            .map(|m| m.get_as::<&str>("tag") == Some("x"))
            .unwrap_or(false)
    })
    .apply(&mut map);

    assert!(map.get("drop").is_none());
    assert!(map.get("keep").is_some());
}

// ===== EMPTINESS SWEEP =====

#[test]
fn test_unset_empty_properties_clears_hollow_maps() {
    let mut map = Map::from_json(r#"{"foo": null, "bar": {}, "baz": {"deep": null}}"#).unwrap();
    unset_empty_properties(&mut map);
    assert!(map.is_empty());
}

#[test]
fn test_emptiness_spares_falsy_scalars() {
    let mut map = Map::from_json(
        r#"{"zero": 0, "blank": "", "no": false, "nil": null, "hollow": {}, "void": []}"#,
    )
    .unwrap();

    unset_empty_properties(&mut map);

    assert_eq!(as_json(&map), json!({"zero": 0, "blank": "", "no": false}));
}

#[test]
fn test_emptiness_sweep_over_mixed_depths() {
    let mut map = hollow_tree();
    unset_empty_properties(&mut map);

    assert_eq!(
        as_json(&map),
        json!({
            "keep": 1,
            "deep": {"stay": "here"},
            "rows": ["kept"]
        })
    );
}

// ===== LISTS =====

#[test]
fn test_list_elements_are_removed_positionally() {
    let mut map = Map::from_json(r#"{"gist": [123, "keep", 123, "also"]}"#).unwrap();

    Unset::new(is_123_or_empty_map).apply(&mut map);

    assert_eq!(as_json(&map), json!({"gist": ["keep", "also"]}));
}

#[test]
fn test_maps_inside_lists_cascade() {
    let mut map = Map::from_json(r#"{"rows": [{"x": 123}, {"x": 1}]}"#).unwrap();

    Unset::new(is_123_or_empty_map).apply(&mut map);

    // The first row lost its only key and was removed as an empty map
    assert_eq!(as_json(&map), json!({"rows": [{"x": 1}]}));
}

// ===== BINDING AND REUSE =====

#[test]
fn test_root_survives_an_always_true_predicate() {
    let mut map = Map::from_json(r#"{"a": 1, "b": {"c": 2}}"#).unwrap();
    Unset::new(|_| true).apply(&mut map);

    assert!(map.is_empty());
    // The map itself is still usable
    map.set("fresh", 1);
    assert_eq!(map.len(), 1);
}

#[test]
fn test_one_sweep_across_many_maps() {
    let sweeper = Unset::empty();

    let mut first = Map::from_json(r#"{"a": null}"#).unwrap();
    let mut second = Map::from_json(r#"{"a": null, "b": 2}"#).unwrap();

    sweeper.apply(&mut first);
    sweeper.clone().apply(&mut second);

    assert!(first.is_empty());
    assert_eq!(as_json(&second), json!({"b": 2}));
}

#[test]
fn test_apply_returns_the_root_for_chaining() {
    let mut map = hollow_tree();
    let remaining = unset_empty_properties(&mut map).len();
    assert_eq!(remaining, 3);
}

#[test]
#[should_panic(expected = "predicate boom")]
fn test_predicate_panic_propagates() {
    let mut map = Map::from_json(r#"{"a": 1}"#).unwrap();
    Unset::new(|_| panic!("predicate boom")).apply(&mut map);
}
