//! Delegation integration tests
//!
//! Copying provider methods onto consumers, aliasing, and the
//! provider-context guarantee.

use std::sync::{Arc, Mutex};

use remold::delegate::{MethodNames, MethodTable, delegate, delegate_as};
use remold::tree::Value;

// ===== DEFINING AND CALLING =====

#[test]
fn test_absent_method_stays_absent() {
    let provider = MethodTable::new();
    let mut consumer = MethodTable::new();

    delegate(&provider, "report", &mut consumer);

    assert!(!consumer.contains("report"));
    assert_eq!(consumer.call("report", &[]), None);
}

#[test]
fn test_consumer_calls_observe_provider_state() {
    // The provider's closure owns a handle to provider-side state; calls
    // through the consumer keep reading that state, not a copy of it
    let inventory = Arc::new(Mutex::new(vec!["hammer".to_string()]));

    let mut provider = MethodTable::new();
    let handle = inventory.clone();
    provider.define("stock", move |_| {
        let items = handle.lock().unwrap();
        Value::Int(items.len() as i64)
    });

    let mut consumer = MethodTable::new();
    delegate(&provider, "stock", &mut consumer);

    assert_eq!(consumer.call("stock", &[]), Some(Value::Int(1)));

    inventory.lock().unwrap().push("wrench".to_string());
    assert_eq!(consumer.call("stock", &[]), Some(Value::Int(2)));
    // Both tables dispatch to the same closure
    assert_eq!(provider.call("stock", &[]), Some(Value::Int(2)));
}

#[test]
fn test_list_form_delegates_each_name() {
    let mut provider = MethodTable::new()
        .with_method("report", |_| Value::from("r"))
        .with_method("examine", |_| Value::from("e"));
    provider.define("ignored", |_| Value::Null);

    let mut consumer = MethodTable::new();
    delegate(&provider, ["report", "examine"], &mut consumer);

    assert_eq!(consumer.len(), 2);
    assert_eq!(consumer.call("report", &[]), Some(Value::from("r")));
    assert_eq!(consumer.call("examine", &[]), Some(Value::from("e")));
    assert!(!consumer.contains("ignored"));
}

#[test]
fn test_list_form_skips_missing_names_individually() {
    let mut provider = MethodTable::new();
    provider.define("real", |_| Value::Bool(true));

    let mut consumer = MethodTable::new();
    delegate(&provider, vec!["real", "imaginary"], &mut consumer);

    assert!(consumer.contains("real"));
    assert!(!consumer.contains("imaginary"));
}

// ===== ALIASING =====

#[test]
fn test_delegate_as_defines_only_the_alias() {
    let mut provider = MethodTable::new();
    provider.define("report", |_| Value::from("ok"));

    let mut consumer = MethodTable::new();
    delegate_as(&provider, "report", &mut consumer, "present");

    assert_eq!(consumer.call("present", &[]), Some(Value::from("ok")));
    assert!(!consumer.contains("report"));

    // Aliasing an absent method defines nothing either
    delegate_as(&provider, "ghost", &mut consumer, "spirit");
    assert!(!consumer.contains("spirit"));
}

// ===== ARGUMENTS =====

#[test]
fn test_arguments_flow_through_delegated_calls() {
    let mut provider = MethodTable::new();
    provider.define("join", |args| {
        let parts: Vec<&str> = args.iter().filter_map(|v| v.as_text()).collect();
        Value::Text(parts.join("-"))
    });

    let mut consumer = MethodTable::new();
    delegate(&provider, "join", &mut consumer);

    let args = [Value::from("a"), Value::from("b")];
    assert_eq!(consumer.call("join", &args), Some(Value::from("a-b")));
}

// ===== NAME CONVERSIONS =====

#[test]
fn test_method_names_conversions() {
    assert_eq!(
        MethodNames::from("report"),
        MethodNames::Single("report".to_string())
    );
    assert_eq!(
        MethodNames::from("report".to_string()),
        MethodNames::Single("report".to_string())
    );

    let many = MethodNames::Many(vec!["a".to_string(), "b".to_string()]);
    assert_eq!(MethodNames::from(["a", "b"]), many);
    assert_eq!(MethodNames::from(vec!["a", "b"]), many);
    assert_eq!(MethodNames::from(vec!["a".to_string(), "b".to_string()]), many);
    assert_eq!(MethodNames::from(&["a", "b"][..]), many);
}

#[test]
fn test_table_introspection() {
    let table = MethodTable::new()
        .with_method("beta", |_| Value::Null)
        .with_method("alpha", |_| Value::Null);

    assert_eq!(table.len(), 2);
    assert!(!table.is_empty());
    assert_eq!(table.names().collect::<Vec<_>>(), ["alpha", "beta"]);
    assert_eq!(format!("{table:?}"), r#"MethodTable(["alpha", "beta"])"#);
}
