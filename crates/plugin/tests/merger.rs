use ormlink_domain::{Environment, Scope};
use ormlink_plugin::{ConfigMerger, PluginError, Strictness};
use serde_json::json;
use std::sync::Arc;

fn merger() -> ConfigMerger {
    ConfigMerger::new(Strictness::Strict)
}

#[test]
fn effective_is_common_overridden_by_the_requested_scope() {
    let mut merger = merger();
    merger
        .merge_scope(
            Scope::Common,
            json!({
                "connections": { "mem": { "adapter": "memAdapter", "poolSize": 4 } }
            }),
        )
        .expect("common");
    merger
        .merge_scope(
            Scope::Server,
            json!({
                "connections": { "mem": { "poolSize": 16 } }
            }),
        )
        .expect("server");
    merger
        .merge_scope(
            Scope::Client,
            json!({
                "connections": { "mem": { "poolSize": 1 } }
            }),
        )
        .expect("client");

    let server = merger.effective(Environment::Server).expect("server effective");
    let client = merger.effective(Environment::Client).expect("client effective");

    assert_eq!(server.connections["mem"].adapter, "memAdapter");
    assert_eq!(server.connections["mem"].settings["poolSize"], json!(16));
    assert_eq!(client.connections["mem"].settings["poolSize"], json!(1));
}

#[test]
fn duplicate_identity_across_scopes_collapses_to_one_entry() {
    let mut merger = merger();
    merger
        .merge_scope(
            Scope::Common,
            json!({
                "models": [{
                    "identity": "user",
                    "connection": "mem",
                    "attributes": { "username": { "type": "string" } }
                }]
            }),
        )
        .expect("common");
    merger
        .merge_scope(
            Scope::Server,
            json!({
                "models": [{
                    "identity": "user",
                    "connection": "disk",
                    "attributes": { "passwordHash": { "type": "string" } }
                }]
            }),
        )
        .expect("server");

    let effective = merger.effective(Environment::Server).expect("effective");

    assert_eq!(effective.models.len(), 1);
    let user = &effective.models[0];
    // Server wins on conflicting leaves; untouched common fields survive.
    assert_eq!(user.connection, "disk");
    assert!(user.attributes.contains_key("username"));
    assert!(user.attributes.contains_key("passwordHash"));
}

#[test]
fn list_and_map_model_forms_normalize_identically() {
    let mut from_list = merger();
    from_list
        .merge_scope(
            Scope::Common,
            json!({ "models": [{ "identity": "user", "connection": "mem" }] }),
        )
        .expect("list form");

    let mut from_map = merger();
    from_map
        .merge_scope(
            Scope::Common,
            json!({ "models": { "user": { "connection": "mem" } } }),
        )
        .expect("map form");

    let a = from_list.effective(Environment::Server).expect("effective");
    let b = from_map.effective(Environment::Server).expect("effective");

    assert_eq!(a.models.len(), 1);
    assert_eq!(b.models.len(), 1);
    // Map form fills the identity from its key.
    assert_eq!(a.models[0].identity, b.models[0].identity);
    assert_eq!(a.models[0].connection, b.models[0].connection);
}

#[test]
fn model_defaults_apply_under_every_definition() {
    let mut merger = merger();
    merger
        .merge_scope(
            Scope::Common,
            json!({
                "modelDefaults": { "connection": "mem", "attributes": { "id": { "type": "string" } } },
                "models": {
                    "user": { "attributes": { "username": { "type": "string" } } },
                    "audit": { "connection": "disk" }
                }
            }),
        )
        .expect("common");

    let effective = merger.effective(Environment::Server).expect("effective");
    let user = effective.models.iter().find(|m| m.identity == "user").expect("user");
    let audit = effective.models.iter().find(|m| m.identity == "audit").expect("audit");

    assert_eq!(user.connection, "mem");
    assert!(user.attributes.contains_key("id"));
    assert!(user.attributes.contains_key("username"));
    // The definition wins over the defaults on conflict.
    assert_eq!(audit.connection, "disk");
}

#[test]
fn locked_merger_rejects_mutation() {
    let mut merger = merger();
    merger.merge_scope(Scope::Common, json!({})).expect("before lock");

    merger.lock();
    let err = merger.merge_scope(Scope::Common, json!({})).unwrap_err();
    assert!(matches!(err, PluginError::ConfigurationLocked { .. }));
    let err = merger.model_hook("user", "beforeCreate", Arc::new(|_| {})).unwrap_err();
    assert!(matches!(err, PluginError::ConfigurationLocked { .. }));

    merger.unlock();
    merger.merge_scope(Scope::Common, json!({})).expect("after unlock");
}

#[test]
fn non_object_patch_is_a_validation_error() {
    let err = merger().merge_scope(Scope::Common, json!([1, 2, 3])).unwrap_err();
    assert!(matches!(err, PluginError::Validation { .. }));
}

#[test]
fn strict_mode_rejects_a_listed_model_without_identity() {
    let err = merger()
        .merge_scope(Scope::Common, json!({ "models": [{ "connection": "mem" }] }))
        .unwrap_err();
    assert!(matches!(err, PluginError::InvalidModel { .. }));
}

#[test]
fn permissive_mode_skips_a_listed_model_without_identity() {
    let mut merger = ConfigMerger::new(Strictness::Permissive);
    merger
        .merge_scope(
            Scope::Common,
            json!({ "models": [{ "connection": "mem" }, { "identity": "user", "connection": "mem" }] }),
        )
        .expect("permissive merge");

    let effective = merger.effective(Environment::Server).expect("effective");
    assert_eq!(effective.models.len(), 1);
    assert_eq!(effective.models[0].identity, "user");
}

#[test]
fn registered_hooks_attach_to_effective_definitions() {
    let mut merger = merger();
    merger
        .merge_scope(Scope::Common, json!({ "models": { "user": { "connection": "mem" } } }))
        .expect("merge");
    merger.model_hook("user", "beforeCreate", Arc::new(|_| {})).expect("hook");

    let effective = merger.effective(Environment::Server).expect("effective");
    let user = &effective.models[0];

    assert_eq!(user.hooks.len(), 1);
    assert!(user.hooks.get("beforeCreate").is_some());
}

#[test]
fn malformed_connection_config_surfaces_as_serialization_error() {
    let mut merger = merger();
    merger
        .merge_scope(Scope::Common, json!({ "connections": { "mem": { "adapter": 42 } } }))
        .expect("merge");

    let err = merger.effective(Environment::Server).unwrap_err();
    assert!(matches!(err, PluginError::Serialization { .. }));
}
