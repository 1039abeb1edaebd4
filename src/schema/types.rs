//! Resource kind definitions.
//!
//! A resource kind is described by a fixed [`ResourceSchema`]: its type
//! discriminator, a coding-key table mapping public field names to storage
//! keys, and a property-type table declaring the expected value kind of each
//! storage key. The tables belong to the kind, never to an instance.

use crate::context::Context;
use crate::resource::Resource;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Declared value kinds for resource properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyType {
    /// JSON object
    Dictionary,
    /// JSON string
    String,
    /// JSON number
    Number,
    /// Array whose elements are all JSON objects
    ArrayOfDictionaries,
    /// Array whose elements are all JSON strings
    ArrayOfStrings,
    /// JSON boolean
    Bool,
}

impl PropertyType {
    /// The name reported to diagnostic hooks.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Dictionary => "dictionary",
            Self::String => "string",
            Self::Number => "number",
            Self::ArrayOfDictionaries => "arrayOfDictionaries",
            Self::ArrayOfStrings => "arrayOfStrings",
            Self::Bool => "bool",
        }
    }

    /// Whether `value` structurally matches this kind.
    ///
    /// Empty arrays match both array kinds.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::Dictionary => value.is_object(),
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Bool => value.is_boolean(),
            Self::ArrayOfDictionaries => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_object)),
            Self::ArrayOfStrings => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fixed description of one resource kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceSchema {
    resource_type: String,
    coding_keys: HashMap<String, String>,
    property_types: HashMap<String, PropertyType>,
}

impl ResourceSchema {
    /// A schema with no coding keys and no declared types.
    ///
    /// Every read through an untyped schema passes the raw value through.
    pub fn untyped(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            coding_keys: HashMap::new(),
            property_types: HashMap::new(),
        }
    }

    pub fn builder(resource_type: impl Into<String>) -> ResourceSchemaBuilder {
        ResourceSchemaBuilder {
            schema: Self::untyped(resource_type),
        }
    }

    /// The JSON:API `type` discriminator.
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    /// Resolve a public field name to its storage key.
    ///
    /// Names without a coding-key entry are their own storage key.
    pub fn storage_key<'a>(&'a self, key: &'a str) -> &'a str {
        self.coding_keys.get(key).map(String::as_str).unwrap_or(key)
    }

    /// Declared kind for a storage key, if any.
    pub fn property_type(&self, storage_key: &str) -> Option<PropertyType> {
        self.property_types.get(storage_key).copied()
    }

    pub fn coding_keys(&self) -> &HashMap<String, String> {
        &self.coding_keys
    }

    pub fn property_types(&self) -> &HashMap<String, PropertyType> {
        &self.property_types
    }

    /// Whether this schema declares neither coding keys nor property types.
    pub fn is_untyped(&self) -> bool {
        self.coding_keys.is_empty() && self.property_types.is_empty()
    }
}

/// Builder for [`ResourceSchema`].
#[derive(Debug, Clone)]
pub struct ResourceSchemaBuilder {
    schema: ResourceSchema,
}

impl ResourceSchemaBuilder {
    /// Map a public field name onto a storage key.
    pub fn coding_key(mut self, public: impl Into<String>, storage: impl Into<String>) -> Self {
        self.schema.coding_keys.insert(public.into(), storage.into());
        self
    }

    /// Declare the expected kind of a storage key.
    pub fn property(mut self, storage_key: impl Into<String>, kind: PropertyType) -> Self {
        self.schema.property_types.insert(storage_key.into(), kind);
        self
    }

    pub fn build(self) -> ResourceSchema {
        self.schema
    }
}

/// A concrete, strongly typed resource kind.
///
/// Implementors wrap a [`Resource`] handle and supply the type discriminator.
/// The lookup tables default to empty, which makes every field pass through
/// unchecked.
///
/// ```rust
/// use jsonapi_mapper::{PropertyType, Resource, ResourceKind};
///
/// struct Article(Resource);
///
/// impl From<Resource> for Article {
///     fn from(resource: Resource) -> Self {
///         Self(resource)
///     }
/// }
///
/// impl AsRef<Resource> for Article {
///     fn as_ref(&self) -> &Resource {
///         &self.0
///     }
/// }
///
/// impl ResourceKind for Article {
///     const RESOURCE_TYPE: &'static str = "articles";
///
///     fn coding_keys() -> Vec<(&'static str, &'static str)> {
///         vec![("headline", "title")]
///     }
///
///     fn property_types() -> Vec<(&'static str, PropertyType)> {
///         vec![("title", PropertyType::String)]
///     }
/// }
///
/// let article = Article::new();
/// article.resource().write("headline", "Hello");
/// assert_eq!(article.resource().string("headline").as_deref(), Some("Hello"));
/// ```
pub trait ResourceKind: From<Resource> + AsRef<Resource> {
    /// The JSON:API `type` discriminator for this kind.
    const RESOURCE_TYPE: &'static str;

    /// Public field name to storage key pairs.
    fn coding_keys() -> Vec<(&'static str, &'static str)> {
        Vec::new()
    }

    /// Storage key to declared kind pairs.
    fn property_types() -> Vec<(&'static str, PropertyType)> {
        Vec::new()
    }

    fn schema() -> ResourceSchema {
        let builder = Self::coding_keys()
            .into_iter()
            .fold(ResourceSchema::builder(Self::RESOURCE_TYPE), |b, (public, storage)| {
                b.coding_key(public, storage)
            });
        Self::property_types()
            .into_iter()
            .fold(builder, |b, (key, kind)| b.property(key, kind))
            .build()
    }

    /// A standalone resource owning a private, empty store.
    fn new() -> Self {
        Self::from(Resource::of::<Self>())
    }

    /// A resource bound to a shared context.
    fn new_in(context: &Context) -> Self {
        Self::from(context.create_kind::<Self>())
    }

    fn resource(&self) -> &Resource {
        self.as_ref()
    }
}
