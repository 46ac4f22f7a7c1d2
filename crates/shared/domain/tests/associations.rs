use ormlink_domain::{
    AssociationKind, AttributeKind, attribute_kind, derive_associations,
};
use serde_json::{Map, Value, json};

fn attributes(raw: Value) -> Map<String, Value> {
    raw.as_object().expect("attribute map").clone()
}

#[test]
fn relationship_attributes_derive_in_declaration_order() {
    let attrs = attributes(json!({
        "owner": { "model": "user" },
        "pets": { "collection": "pet", "via": "owner" },
        "name": { "type": "string" }
    }));

    let derived = derive_associations(&attrs);

    assert_eq!(derived.len(), 2);
    assert_eq!(derived[0].alias, "owner");
    assert_eq!(derived[0].kind, AssociationKind::Model);
    assert_eq!(derived[0].model.as_deref(), Some("user"));
    assert!(derived[0].via.is_none());
    assert_eq!(derived[1].alias, "pets");
    assert_eq!(derived[1].kind, AssociationKind::Collection);
    assert_eq!(derived[1].collection.as_deref(), Some("pet"));
    assert_eq!(derived[1].via.as_deref(), Some("owner"));
}

#[test]
fn model_wins_when_both_relationship_keys_are_present() {
    let attrs = attributes(json!({
        "odd": { "model": "user", "collection": "pet" }
    }));

    let derived = derive_associations(&attrs);

    assert_eq!(derived.len(), 1);
    assert_eq!(derived[0].kind, AssociationKind::Model);
    assert_eq!(derived[0].model.as_deref(), Some("user"));
    assert!(derived[0].collection.is_none());
}

#[test]
fn malformed_declarations_are_skipped_not_rejected() {
    let attrs = attributes(json!({
        "broken": 42,
        "nested": { "model": 7 },
        "fine": { "collection": "pet" }
    }));

    let derived = derive_associations(&attrs);

    assert_eq!(derived.len(), 1);
    assert_eq!(derived[0].alias, "fine");
}

#[test]
fn attribute_kind_resolves_relationships_semantically() {
    let attrs = attributes(json!({
        "username": "string",
        "age": { "type": "number" },
        "owner": { "model": "user" },
        "pets": { "collection": "pet", "via": "owner" }
    }));

    assert_eq!(attribute_kind(&attrs, "username"), Some(AttributeKind::Scalar("string".into())));
    assert_eq!(attribute_kind(&attrs, "age"), Some(AttributeKind::Scalar("number".into())));
    assert_eq!(attribute_kind(&attrs, "owner"), Some(AttributeKind::Model));
    assert_eq!(attribute_kind(&attrs, "pets"), Some(AttributeKind::Collection));
    assert_eq!(attribute_kind(&attrs, "missing"), None);
}

#[test]
fn descriptors_serialize_with_wire_field_names() {
    let attrs = attributes(json!({
        "pets": { "collection": "pet", "via": "owner" }
    }));

    let raw = serde_json::to_value(derive_associations(&attrs)).expect("serialize");

    assert_eq!(raw, json!([{ "alias": "pets", "type": "collection", "collection": "pet", "via": "owner" }]));
}
