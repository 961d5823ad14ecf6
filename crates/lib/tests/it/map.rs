//! Map-level integration tests: dual access, fuzzy lookup, ordering,
//! copying, and construction equivalences.

use dotmap::{DotMap, Value};
use serde_json::json;

use super::helpers::sample;

// ===== BASIC ACCESS =====

#[test]
fn test_assignment_and_access_both_modes() {
    let map = DotMap::new();

    // Values set by key are readable as attributes and vice versa
    map.set("foo", 3.14);
    map.set("bar", 3.14);
    assert_eq!(map.attr("foo").unwrap(), map.try_get("bar").unwrap());
    assert_eq!(map.try_get("foo").unwrap(), 3.14);
    assert_eq!(map.attr("bar").unwrap(), 3.14);
}

#[test]
fn test_non_existing_key() {
    let map = DotMap::new();

    // Attribute-style read resolves to the absent sentinel
    assert!(map.attr("foo").is_none());

    // Key-style read is an error
    let err = map.try_get("foo").unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.key(), Some("foo"));
}

#[test]
fn test_deletion_is_exact_key() {
    let map = DotMap::new();
    map.set("bar", 42);

    let old = map.try_remove("bar").unwrap();
    assert_eq!(old, 42);
    assert!(!map.contains_key("bar"));
    assert!(map.attr("bar").is_none());
    assert!(map.try_get("bar").unwrap_err().is_not_found());

    // Deleting again is an error, same as key-style get
    assert!(map.try_remove("bar").unwrap_err().is_not_found());

    // Deletion never falls back to the fuzzy rule
    map.set("fuzzy-key", 1);
    assert!(map.try_remove("fuzzy_key").unwrap_err().is_not_found());
    assert!(map.contains_key("fuzzy-key"));
}

#[test]
fn test_method_names_are_ordinary_keys() {
    let map = DotMap::new();

    // A key colliding with a method name is plain data reachable by key
    // access; the method itself stays callable (separate namespaces).
    map.set("copy", 5);
    map.set("find", "needle");
    assert_eq!(map.try_get("copy").unwrap(), 5);
    assert_eq!(map.try_get("find").unwrap(), "needle");

    let copied = map.copy();
    assert_eq!(copied, map);
    assert_eq!(map.find().key("copy").into_iter().count(), 1);
}

// ===== FUZZY ATTRIBUTE LOOKUP =====

#[test]
fn test_keys_with_special_characters() {
    let map = DotMap::new();
    map.set("test-key", "hyphen");
    assert_eq!(map.attr("test_key").unwrap(), "hyphen");
}

#[test]
fn test_fuzzy_lookup_insertion_order_precedence() {
    let map = DotMap::new();
    map.set("test-key", "hyphen");
    map.set("test.key", "dot");

    // First fuzzy match in insertion order wins
    assert_eq!(map.attr("test_key").unwrap(), "hyphen");

    // An exact key beats every fuzzy match regardless of position
    map.set("test_key", "underscore");
    assert_eq!(map.attr("test_key").unwrap(), "underscore");
    assert_eq!(map.try_get("test.key").unwrap(), "dot");

    // Deleting the exact key reveals the earlier fuzzy match again
    map.remove("test_key").unwrap();
    assert_eq!(map.attr("test_key").unwrap(), "hyphen");
}

#[test]
fn test_fuzzy_lookup_skips_literal_underscores() {
    let map = DotMap::new();
    map.set("a.b_c", 1);

    // The second `_` in the name faces a literal `_` in the key, which the
    // wildcard (strictly `.` or `-`) does not cover
    assert!(map.attr("a_b_c").is_none());
    assert_eq!(map.try_get("a.b_c").unwrap(), 1);

    // An exact match still resolves, through the exact lookup
    map.set("a_b_c", 2);
    assert_eq!(map.attr("a_b_c").unwrap(), 2);
}

#[test]
fn test_fuzzy_lookup_never_partial() {
    let map = DotMap::new();
    map.set("test-key-longer", 1);
    assert!(map.attr("test_key").is_none());
}

// ===== ORDERING =====

#[test]
fn test_iteration_follows_insertion_order() {
    let map = DotMap::new();
    map.set("c", 1);
    map.set("a", 2);
    map.set("b", 3);
    assert_eq!(map.keys(), vec!["c", "a", "b"]);

    let entries: Vec<(String, Value)> = map.iter().collect();
    assert_eq!(entries[0], ("c".to_string(), Value::Int(1)));
    assert_eq!(entries[2], ("b".to_string(), Value::Int(3)));
}

// ===== COPY =====

#[test]
fn test_copy_is_shallow_with_fresh_identity() {
    let data = sample();
    let copied = data.copy();

    assert_eq!(copied, data);
    assert!(!copied.ptr_eq(&data));

    // Top level is independent
    copied.set("extra", true);
    assert!(!data.contains_key("extra"));

    // Nested maps are shared by handle
    let nested = data.attr("bar").unwrap().into_map().unwrap();
    let nested_copy = copied.attr("bar").unwrap().into_map().unwrap();
    assert!(nested.ptr_eq(&nested_copy));
    nested_copy.set("fee", 99);
    assert_eq!(data.attr("bar").unwrap().into_map().unwrap().try_get("fee").unwrap(), 99);
}

// ===== NESTED CONVERSION =====

#[test]
fn test_nested_plain_structures_convert() {
    let map = DotMap::try_from(json!({
        "a": {"x": 0, "y": 0},
        "b": [{"w": 1}, {"z": 2}],
    }))
    .unwrap();

    let a = map.attr("a").unwrap().into_map().unwrap();
    assert_eq!(a.attr("x").unwrap(), 0);

    let b = map.attr("b").unwrap().into_list().unwrap();
    let b0 = b.get(0).unwrap().into_map().unwrap();
    let b1 = b.get(1).unwrap().into_map().unwrap();
    assert_eq!(b0.attr("w").unwrap(), 1);
    assert!(b0.attr("z").is_none());
    assert_eq!(b1.attr("z").unwrap(), 2);
}

#[test]
fn test_conversion_applies_after_construction_too() {
    let map = DotMap::new();
    map.set("foo", json!([{"bar": 2}, 2]));

    let foo = map.attr("foo").unwrap().into_list().unwrap();
    let first = foo.get(0).unwrap().into_map().unwrap();
    assert_eq!(first.attr("bar").unwrap(), foo.get(1).unwrap());
}

#[test]
fn test_already_converted_values_keep_identity() {
    let inner = DotMap::new();
    inner.set("x", 1);

    let outer = DotMap::new();
    outer.set("inner", inner.clone());

    // The stored value is the same node, not a re-wrapped copy
    let stored = outer.attr("inner").unwrap().into_map().unwrap();
    assert!(stored.ptr_eq(&inner));
    inner.set("y", 2);
    assert_eq!(stored.try_get("y").unwrap(), 2);
}

// ===== CONSTRUCTION =====

#[test]
fn test_construction_equivalence() {
    let keys = ["foo", "bar", "baz"];
    let values = 0..3;

    let zipped: DotMap = keys.iter().copied().zip(values).collect();
    let from_array = DotMap::from([("foo", 0), ("bar", 1), ("baz", 2)]);
    let from_json = DotMap::try_from(json!({"foo": 0, "bar": 1, "baz": 2})).unwrap();

    assert_eq!(zipped, from_array);
    assert_eq!(zipped, from_json);
    assert_eq!(zipped, json!({"foo": 0, "bar": 1, "baz": 2}));
}

#[test]
fn test_builder_style_construction() {
    let map = DotMap::new().with("name", "Alice").with("age", 30);
    assert_eq!(map.get_as::<String>("name"), Some("Alice".to_string()));
    assert_eq!(map.get_as::<i64>("age"), Some(30));
}

// ===== MISC =====

#[test]
fn test_len_is_empty_clear() {
    let map = DotMap::new();
    assert!(map.is_empty());
    map.set("a", 1);
    map.set("b", 2);
    assert_eq!(map.len(), 2);
    map.clear();
    assert!(map.is_empty());
    assert!(map.attr("a").is_none());
}

#[test]
fn test_typed_access() {
    let map = DotMap::new();
    map.set("name", "Alice");
    map.set("age", 30);
    map.set("active", true);

    assert_eq!(map.get_as::<String>("name"), Some("Alice".to_string()));
    assert_eq!(map.get_as::<i64>("age"), Some(30));
    assert_eq!(map.get_as::<bool>("active"), Some(true));
    assert_eq!(map.get_as::<i64>("name"), None);
    assert_eq!(map.get_as::<String>("missing"), None);
}
