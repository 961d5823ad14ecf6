//! Serde round-trip tests.

use dotmap::{DotMap, List, Value};
use serde_json::json;

use super::helpers::sample;

#[test]
fn test_map_round_trip() {
    let data = sample();

    let encoded = serde_json::to_string(&data).unwrap();
    let decoded: DotMap = serde_json::from_str(&encoded).unwrap();

    assert_eq!(decoded, data);
    assert!(!decoded.ptr_eq(&data));

    // Nested structure came back as converted types, not plain values
    assert!(matches!(decoded.get("bar"), Some(Value::Map(_))));
    assert!(matches!(decoded.get("baz"), Some(Value::List(_))));

    // A second round trip is stable
    let encoded_again = serde_json::to_string(&decoded).unwrap();
    let decoded_again: DotMap = serde_json::from_str(&encoded_again).unwrap();
    assert_eq!(decoded_again, data);
}

#[test]
fn test_round_trip_preserves_key_order() {
    let map = DotMap::new();
    map.set("zebra", 1);
    map.set("apple", 2);

    let encoded = serde_json::to_string(&map).unwrap();
    let decoded: DotMap = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded.keys(), vec!["zebra", "apple"]);
}

#[test]
fn test_value_deserialization_covers_scalars() {
    let value: Value = serde_json::from_value(json!(null)).unwrap();
    assert!(value.is_null());

    let value: Value = serde_json::from_value(json!(42)).unwrap();
    assert_eq!(value, 42);

    let value: Value = serde_json::from_value(json!(2.5)).unwrap();
    assert_eq!(value, 2.5);

    let value: Value = serde_json::from_value(json!("hi")).unwrap();
    assert_eq!(value, "hi");

    let value: Value = serde_json::from_value(json!([1, [2]])).unwrap();
    let list = value.into_list().unwrap();
    assert_eq!(list.get(0).unwrap(), 1);
    assert!(matches!(list.get(1), Some(Value::List(_))));
}

#[test]
fn test_list_round_trip() {
    let list: List = vec![json!({"a": 1}), json!(true)].into();

    let encoded = serde_json::to_string(&list).unwrap();
    let decoded: List = serde_json::from_str(&encoded).unwrap();

    assert_eq!(decoded, list);
    assert!(matches!(decoded.get(0), Some(Value::Map(_))));
}

#[test]
fn test_serializing_cyclic_map_fails() {
    let map = DotMap::new();
    map.set("me", map.clone());

    let err = serde_json::to_string(&map).unwrap_err();
    assert!(err.to_string().contains("cyclic"));
}

#[test]
fn test_serialize_matches_plain_form() {
    let data = sample();
    let via_serde: serde_json::Value = serde_json::to_value(&data).unwrap();
    assert_eq!(via_serde, data.to_plain().unwrap());
}
