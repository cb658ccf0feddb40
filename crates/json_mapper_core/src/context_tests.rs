use super::*;
use serde_json::json;

fn source() -> Value {
    json!({
        "orders": [
            {"id": "X", "qty": 1},
            {"id": "Y", "qty": 2}
        ],
        "user": {"name": "Ann", "tier": "gold"},
        "statistics": {"totalOrders": 15},
        "currency": "EUR",
        "tags": ["a", "b"]
    })
}

#[test]
fn test_secondary_source_keys_are_one_based() {
    assert_eq!(secondary_source_key(1), "source2");
    assert_eq!(secondary_source_key(2), "source3");
    assert_eq!(secondary_source_key(9), "source10");
}

#[test]
fn test_single_source_object_fields_are_top_level() {
    let context = single_source(&json!({"name": "Jo", "age": 3}));
    assert_eq!(context.into_value(), json!({"name": "Jo", "age": 3}));
}

#[test]
fn test_single_source_scalar_is_exposed_as_value() {
    let context = single_source(&json!(42));
    assert_eq!(context.into_value(), json!({"value": 42}));
}

#[test]
fn test_single_source_array_is_exposed_as_value() {
    let context = single_source(&json!([1, 2]));
    assert_eq!(context.into_value(), json!({"value": [1, 2]}));
}

#[test]
fn test_multi_source_primary_and_secondary() {
    let data = source();
    let context = multi_source(&data, &["$.user", "$.statistics"], None);

    assert_eq!(
        context.into_value(),
        json!({
            "name": "Ann",
            "tier": "gold",
            "source2": {"totalOrders": 15}
        })
    );
}

#[test]
fn test_multi_source_scalar_secondary_is_wrapped() {
    let data = source();
    let context = multi_source(&data, &["$.user", "$.currency", "$.tags"], None);

    assert_eq!(context.get("source2"), Some(&json!({"value": "EUR"})));
    assert_eq!(context.get("source3"), Some(&json!({"value": ["a", "b"]})));
}

#[test]
fn test_multi_source_scalar_primary_is_value() {
    let data = source();
    let context = multi_source(&data, &["$.currency", "$.user"], None);

    assert_eq!(context.get("value"), Some(&json!("EUR")));
    assert_eq!(context.get("source2"), Some(&json!({"name": "Ann", "tier": "gold"})));
}

#[test]
fn test_multi_source_missing_sources_contribute_nothing() {
    let data = source();
    let context = multi_source(&data, &["$.missing", "$.user", "$.nope"], None);

    let keys: Vec<&String> = context.keys().collect();
    assert_eq!(keys, vec!["source2"]);
}

#[test]
fn test_multi_source_current_item_replaces_primary_extraction() {
    let data = source();
    let item = json!({"id": "Y", "qty": 2});
    let context = multi_source(&data, &["$.orders[*]", "$.user"], Some(&item));

    assert_eq!(
        context.into_value(),
        json!({"id": "Y", "qty": 2, "source2": {"name": "Ann", "tier": "gold"}})
    );
}

#[test]
fn test_secondary_paths_resolve_against_root_not_current_item() {
    let data = source();
    // "$.id" exists on the item but not on the root, so it must not resolve.
    let item = json!({"id": "X", "user": {"name": "Item-local"}});
    let context = multi_source(&data, &["$.orders[*]", "$.id", "$.user"], Some(&item));

    assert_eq!(context.get("source2"), None);
    assert_eq!(context.get("source3"), Some(&json!({"name": "Ann", "tier": "gold"})));
}

#[test]
fn test_primary_key_collision_with_source_key() {
    let data = json!({"a": {"source2": "primary"}, "b": {"k": 1}});
    let context = multi_source(&data, &["$.a", "$.b"], None);

    // The secondary source is inserted after the primary fields.
    assert_eq!(context.get("source2"), Some(&json!({"k": 1})));
}
