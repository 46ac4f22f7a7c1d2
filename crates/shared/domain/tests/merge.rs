use ormlink_domain::deep_merge;
use serde_json::json;

#[test]
fn scalars_and_arrays_replace_wholesale() {
    let mut base = json!({ "port": 1, "tags": ["a", "b"], "name": "x" });
    deep_merge(&mut base, json!({ "port": 2, "tags": ["c"] }));
    assert_eq!(base, json!({ "port": 2, "tags": ["c"], "name": "x" }));
}

#[test]
fn nested_objects_merge_key_by_key() {
    let mut base = json!({ "db": { "url": "mem://", "pool": { "min": 1, "max": 4 } } });
    deep_merge(&mut base, json!({ "db": { "pool": { "max": 8 } } }));
    assert_eq!(base, json!({ "db": { "url": "mem://", "pool": { "min": 1, "max": 8 } } }));
}

#[test]
fn keys_absent_from_the_patch_survive() {
    let mut base = json!({ "a": { "keep": true } });
    deep_merge(&mut base, json!({ "b": 1 }));
    assert_eq!(base, json!({ "a": { "keep": true }, "b": 1 }));
}

#[test]
fn null_replaces_like_any_scalar() {
    let mut base = json!({ "ssl": { "cert": "a.pem" } });
    deep_merge(&mut base, json!({ "ssl": null }));
    assert_eq!(base, json!({ "ssl": null }));
}

#[test]
fn object_replaces_a_scalar_slot() {
    let mut base = json!({ "pool": 4 });
    deep_merge(&mut base, json!({ "pool": { "max": 8 } }));
    assert_eq!(base, json!({ "pool": { "max": 8 } }));
}
