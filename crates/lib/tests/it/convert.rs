//! Plain-structure conversion tests: shape, ordering, independence, and
//! cycle detection.

use dotmap::{DotMap, List};
use serde_json::json;

use super::helpers::sample;

#[test]
fn test_to_plain_produces_plain_tree() {
    let data = sample();
    let plain = data.to_plain().unwrap();

    assert_eq!(
        plain,
        json!({
            "foo": 1,
            "bar": {"fee": 2},
            "baz": [{"foo": 1, "bar": 2}],
        })
    );

    // Every nested level is a plain object/array now
    assert!(plain["bar"].is_object());
    assert!(plain["baz"].is_array());
    assert!(plain["baz"][0].is_object());

    // And the original still compares equal to the plain form
    assert_eq!(data, plain);
}

#[test]
fn test_to_plain_preserves_key_order() {
    let map = DotMap::new();
    map.set("zebra", 1);
    map.set("apple", 2);
    map.set("mango", 3);

    let plain = map.to_plain().unwrap();
    let keys: Vec<&String> = plain.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["zebra", "apple", "mango"]);
}

#[test]
fn test_to_plain_is_independent_of_the_original() {
    let data = sample();
    let plain = data.to_plain().unwrap();

    data.set("foo", 100);
    data.attr("bar").unwrap().into_map().unwrap().set("fee", 200);

    assert_eq!(plain["foo"], json!(1));
    assert_eq!(plain["bar"]["fee"], json!(2));
}

#[test]
fn test_to_plain_rejects_direct_cycle() {
    let map = DotMap::new();
    map.set("name", "loop");
    map.set("me", map.clone());

    let err = map.to_plain().unwrap_err();
    assert!(err.is_cyclic());
    assert_eq!(err.path(), Some(".me"));
}

#[test]
fn test_to_plain_rejects_cycle_through_list() {
    let map = DotMap::new();
    let list = List::new();
    map.set("c", list.clone());
    list.push(map.clone());

    let err = map.to_plain().unwrap_err();
    assert!(err.is_cyclic());
    assert_eq!(err.path(), Some(".c[0]"));
}

#[test]
fn test_to_plain_allows_acyclic_sharing() {
    // The same node appearing twice as a sibling is sharing, not a cycle
    let shared = DotMap::new();
    shared.set("x", 1);

    let map = DotMap::new();
    map.set("a", shared.clone());
    map.set("b", shared);

    let plain = map.to_plain().unwrap();
    assert_eq!(plain, json!({"a": {"x": 1}, "b": {"x": 1}}));
}

#[test]
fn test_value_and_list_to_plain() {
    let list: List = vec![json!({"k": true}), json!(7)].into();
    let plain = list.to_plain().unwrap();
    assert_eq!(plain, json!([{"k": true}, 7]));

    let value = dotmap::Value::from(2.5);
    assert_eq!(value.to_plain().unwrap(), json!(2.5));
}
