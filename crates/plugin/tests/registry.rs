use ormlink_engine::LiveModel;
use ormlink_plugin::{ModelRegistry, PluginError, Strictness};
use serde_json::Map;
use std::sync::Arc;

fn live(identity: &str, global_id: Option<&str>) -> Arc<LiveModel> {
    Arc::new(LiveModel {
        identity: identity.to_owned(),
        global_id: global_id.map(str::to_owned),
        connection: "mem".to_owned(),
        attributes: Map::new(),
        associations: Vec::new(),
    })
}

#[test]
fn identity_and_global_id_resolve_to_the_same_object() {
    let registry = ModelRegistry::new(Strictness::Strict);
    registry.set([live("user", Some("User"))]).expect("set");

    let by_identity = registry.get("user").expect("by identity");
    let by_alias = registry.get("User").expect("by alias");

    assert!(Arc::ptr_eq(&by_identity, &by_alias));
    assert!(registry.has("user") && registry.has("User"));
    assert_eq!(registry.len(), 1);
}

#[test]
fn set_merges_incrementally_and_overwrites_same_keys() {
    let registry = ModelRegistry::new(Strictness::Strict);
    registry.set([live("user", None)]).expect("first set");
    registry.set([live("pet", None)]).expect("second set");

    assert_eq!(registry.len(), 2);

    let replacement = live("user", Some("User"));
    registry.set([Arc::clone(&replacement)]).expect("overwrite");

    assert_eq!(registry.len(), 2);
    assert!(Arc::ptr_eq(&registry.get("user").expect("user"), &replacement));
}

#[test]
fn clear_empties_both_indices() {
    let registry = ModelRegistry::new(Strictness::Strict);
    registry.set([live("user", Some("User")), live("pet", None)]).expect("set");

    registry.clear();

    assert!(registry.is_empty());
    assert!(registry.get("user").is_none());
    assert!(registry.get("User").is_none());
    assert!(registry.identities().is_empty());
}

#[test]
fn strict_mode_rejects_a_model_without_identity_atomically() {
    let registry = ModelRegistry::new(Strictness::Strict);

    let err = registry.set([live("user", None), live("", None)]).unwrap_err();

    assert!(matches!(err, PluginError::InvalidModel { .. }));
    // Nothing was inserted: validation precedes every write.
    assert!(registry.is_empty());
}

#[test]
fn permissive_mode_indexes_only_the_keys_present() {
    let registry = ModelRegistry::new(Strictness::Permissive);
    registry.set([live("", Some("Ghost"))]).expect("global-id only");

    // Reachable through the alias, absent from the identity enumeration.
    assert!(registry.get("Ghost").is_some());
    assert_eq!(registry.len(), 0);
    assert!(registry.identities().is_empty());
}

#[test]
fn permissive_model_without_any_key_is_unreachable() {
    let registry = ModelRegistry::new(Strictness::Permissive);
    registry.set([live("", None)]).expect("keyless model");

    assert!(registry.is_empty());
    assert!(registry.get("").is_none());
}
