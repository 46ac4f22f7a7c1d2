//! Attribute interpretation and association derivation.
//!
//! Model attributes arrive as raw JSON declarations. This module gives them
//! meaning: a declaration is either a scalar (a primitive type tag) or a
//! relationship (`model`/`collection` reference). Relationship declarations
//! are distilled into [`AssociationDescriptor`]s in declaration order.
//! Anything malformed is skipped, never rejected—strict validation belongs
//! to the ORM engine, not this layer.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A parsed attribute declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeSpec {
    /// A primitive type tag, e.g. `"string"` or `{ "type": "number" }`.
    Scalar(String),
    /// A to-one relationship: `{ "model": "<identity>" }`.
    Model { target: String, via: Option<String> },
    /// A to-many relationship: `{ "collection": "<identity>", "via": "<attr>" }`.
    Collection { target: String, via: Option<String> },
}

impl AttributeSpec {
    /// Interprets a raw attribute value. Returns `None` for declarations
    /// this layer cannot make sense of.
    ///
    /// A `model` key wins over a `collection` key when both are present.
    #[must_use]
    pub fn parse(value: &Value) -> Option<Self> {
        match value {
            Value::String(tag) => Some(Self::Scalar(tag.clone())),
            Value::Object(spec) => {
                let via = spec.get("via").and_then(Value::as_str).map(str::to_owned);
                if let Some(target) = spec.get("model").and_then(Value::as_str) {
                    Some(Self::Model { target: target.to_owned(), via })
                } else if let Some(target) = spec.get("collection").and_then(Value::as_str) {
                    Some(Self::Collection { target: target.to_owned(), via })
                } else {
                    spec.get("type").and_then(Value::as_str).map(|tag| Self::Scalar(tag.to_owned()))
                }
            },
            _ => None,
        }
    }
}

/// The semantic kind of an attribute, with relationships resolved to their
/// relationship nature rather than their raw declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeKind {
    Model,
    Collection,
    Scalar(String),
}

/// The kind of a derived association.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssociationKind {
    Model,
    Collection,
}

/// A normalized relationship descriptor derived from an attribute
/// declaration. Never authored directly; recomputed on every ORM build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociationDescriptor {
    pub alias: String,
    #[serde(rename = "type")]
    pub kind: AssociationKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub via: Option<String>,
}

/// Derives the association list for a model from its raw attribute map.
///
/// Output order matches attribute declaration order. Non-relationship and
/// malformed entries are skipped.
#[must_use]
pub fn derive_associations(attributes: &Map<String, Value>) -> Vec<AssociationDescriptor> {
    attributes
        .iter()
        .filter_map(|(alias, value)| match AttributeSpec::parse(value)? {
            AttributeSpec::Model { target, via } => Some(AssociationDescriptor {
                alias: alias.clone(),
                kind: AssociationKind::Model,
                model: Some(target),
                collection: None,
                via,
            }),
            AttributeSpec::Collection { target, via } => Some(AssociationDescriptor {
                alias: alias.clone(),
                kind: AssociationKind::Collection,
                model: None,
                collection: Some(target),
                via,
            }),
            AttributeSpec::Scalar(_) => None,
        })
        .collect()
}

/// Resolves the semantic kind of a named attribute.
///
/// Relationship attributes resolve to [`AttributeKind::Model`] or
/// [`AttributeKind::Collection`] rather than their raw declarations.
/// Returns `None` for unknown or uninterpretable attributes.
#[must_use]
pub fn attribute_kind(attributes: &Map<String, Value>, name: &str) -> Option<AttributeKind> {
    match AttributeSpec::parse(attributes.get(name)?)? {
        AttributeSpec::Model { .. } => Some(AttributeKind::Model),
        AttributeSpec::Collection { .. } => Some(AttributeKind::Collection),
        AttributeSpec::Scalar(tag) => Some(AttributeKind::Scalar(tag)),
    }
}
