//! Relationship linkage data.
//!
//! Linkage is recorded and returned as found in the document. Nothing here
//! loads or resolves the related resources.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt;

/// A `{type, id}` pair identifying one resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub id: String,
}

impl ResourceIdentifier {
    pub fn new(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            id: id.into(),
        }
    }

    /// Parse an identifier object; both members must be strings.
    pub fn from_value(value: &Value) -> Option<Self> {
        Some(Self {
            resource_type: value.get("type")?.as_str()?.to_string(),
            id: value.get("id")?.as_str()?.to_string(),
        })
    }

    pub fn to_value(&self) -> Value {
        json!({"type": self.resource_type, "id": self.id})
    }
}

impl fmt::Display for ResourceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.resource_type, self.id)
    }
}

/// Resource linkage of one relationship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Linkage {
    /// `null` or a single identifier
    ToOne(Option<ResourceIdentifier>),
    /// An array of identifiers, possibly empty
    ToMany(Vec<ResourceIdentifier>),
}

impl Linkage {
    /// Interpret a relationship's `data` member.
    ///
    /// Returns `None` when the value is not valid linkage, including arrays
    /// with any malformed element.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(Self::ToOne(None)),
            Value::Object(_) => ResourceIdentifier::from_value(value).map(|id| Self::ToOne(Some(id))),
            Value::Array(items) => items
                .iter()
                .map(ResourceIdentifier::from_value)
                .collect::<Option<Vec<_>>>()
                .map(Self::ToMany),
            _ => None,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Self::ToOne(None) => Value::Null,
            Self::ToOne(Some(identifier)) => identifier.to_value(),
            Self::ToMany(identifiers) => {
                Value::Array(identifiers.iter().map(ResourceIdentifier::to_value).collect())
            }
        }
    }

    /// All identifiers in linkage order.
    pub fn identifiers(&self) -> Vec<&ResourceIdentifier> {
        match self {
            Self::ToOne(identifier) => identifier.iter().collect(),
            Self::ToMany(identifiers) => identifiers.iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::ToOne(identifier) => identifier.is_none(),
            Self::ToMany(identifiers) => identifiers.is_empty(),
        }
    }
}

impl From<ResourceIdentifier> for Linkage {
    fn from(identifier: ResourceIdentifier) -> Self {
        Self::ToOne(Some(identifier))
    }
}

impl From<Vec<ResourceIdentifier>> for Linkage {
    fn from(identifiers: Vec<ResourceIdentifier>) -> Self {
        Self::ToMany(identifiers)
    }
}
