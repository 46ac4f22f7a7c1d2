use ormlink_domain::{ConnectionConfig, ModelDefinition};
use serde_json::json;

#[test]
fn definition_deserializes_from_camel_case() {
    let def: ModelDefinition = serde_json::from_value(json!({
        "identity": "user",
        "globalId": "User",
        "connection": "mem",
        "attributes": { "username": { "type": "string" } }
    }))
    .expect("model definition");

    assert_eq!(def.identity, "user");
    assert_eq!(def.global_id.as_deref(), Some("User"));
    assert!(def.attributes.contains_key("username"));
    assert!(def.hooks.is_empty());
}

#[test]
fn attributes_keep_declaration_order() {
    let def: ModelDefinition = serde_json::from_value(json!({
        "identity": "user",
        "connection": "mem",
        "attributes": {
            "zulu": "string",
            "alpha": "string",
            "mike": "string"
        }
    }))
    .expect("model definition");

    assert_eq!(def.attributes.keys().collect::<Vec<_>>(), vec!["zulu", "alpha", "mike"]);
}

#[test]
fn hooks_never_serialize() {
    let def = ModelDefinition::new("user", "mem").hook("beforeCreate", |_| {});
    assert_eq!(def.hooks.len(), 1);

    let raw = serde_json::to_value(&def).expect("serialize");
    assert!(raw.get("hooks").is_none());
    assert_eq!(raw["identity"], json!("user"));
}

#[test]
fn hook_merge_is_last_write_wins_by_name() {
    let mut base = ModelDefinition::new("user", "mem").hook("beforeCreate", |_| {}).hooks;
    let replacement = ModelDefinition::new("user", "mem")
        .hook("beforeCreate", |payload| {
            if let Some(map) = payload.as_object_mut() {
                map.insert("stamped".to_owned(), json!(true));
            }
        })
        .hooks;

    base.merge(&replacement);
    assert_eq!(base.len(), 1);

    let mut payload = json!({});
    let hook = base.get("beforeCreate").expect("hook");
    hook.as_ref()(&mut payload);
    assert_eq!(payload, json!({ "stamped": true }));
}

#[test]
fn connection_keeps_driver_settings_flat() {
    let conn: ConnectionConfig = serde_json::from_value(json!({
        "adapter": "memAdapter",
        "maxPool": 8
    }))
    .expect("connection config");

    assert_eq!(conn.adapter, "memAdapter");
    assert_eq!(conn.settings.get("maxPool"), Some(&json!(8)));
}
