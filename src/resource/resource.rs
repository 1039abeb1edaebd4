//! The typed façade over one resource object in a store.
//!
//! A [`Resource`] holds no field data of its own. It is a handle made of the
//! resource's internal key, its kind's schema, and the [`Context`] whose store
//! owns the raw object. Reads pass through the schema's coding keys and
//! declared property types; writes are stored as given.

use crate::context::Context;
use crate::diagnostics::PropertyMismatch;
use crate::error::{JsonApiError, JsonApiResult};
use crate::resource::linkage::{Linkage, ResourceIdentifier};
use crate::schema::{Coerced, ResourceKind, ResourceSchema, coerce};
use crate::storage::{DocumentStore, Member, ResourceKey};
use log::{debug, trace};
use serde_json::{Map, Number, Value, json};
use std::fmt;
use std::sync::Arc;

/// How the `id` member is treated when building a resource object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IdMember {
    /// Include the id when the resource has one
    IfPresent,
    /// Fail when the resource has no id; `position` names it in the error
    Required { position: usize },
    /// Never include the id
    Omitted,
}

/// Handle to one JSON:API resource object.
///
/// Cloning a `Resource` yields another handle to the same stored object.
///
/// # Example
///
/// ```rust
/// use jsonapi_mapper::{PropertyType, Resource, ResourceSchema};
/// use serde_json::json;
///
/// let schema = ResourceSchema::builder("articles")
///     .property("title", PropertyType::String)
///     .build();
/// let article = Resource::new(schema);
/// article.write("title", "Hello");
///
/// assert_eq!(
///     article.to_document().unwrap(),
///     json!({"data": {"type": "articles", "attributes": {"title": "Hello"}}})
/// );
/// ```
#[derive(Clone)]
pub struct Resource {
    key: ResourceKey,
    schema: Arc<ResourceSchema>,
    context: Context,
}

impl Resource {
    /// A standalone resource that owns a private, empty store.
    pub fn new(schema: ResourceSchema) -> Self {
        Context::new().create_with_schema(Arc::new(schema))
    }

    /// A standalone resource of kind `K`.
    pub fn of<K: ResourceKind>() -> Self {
        Context::new().create_kind::<K>()
    }

    pub(crate) fn bind(context: Context, key: ResourceKey, schema: Arc<ResourceSchema>) -> Self {
        Self {
            key,
            schema,
            context,
        }
    }

    /// Internal identity within the store.
    pub fn key(&self) -> &ResourceKey {
        &self.key
    }

    pub fn resource_type(&self) -> &str {
        self.schema.resource_type()
    }

    pub fn schema(&self) -> &ResourceSchema {
        &self.schema
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    fn store(&self) -> &dyn DocumentStore {
        self.context.store()
    }

    pub fn id(&self) -> Option<String> {
        self.store().identifier(&self.key)
    }

    pub fn set_id(&self, id: impl Into<String>) {
        self.store().set_identifier(&self.key, Some(id.into()));
    }

    pub fn clear_id(&self) {
        self.store().set_identifier(&self.key, None);
    }

    /// The `{type, id}` pair, once the resource has an id.
    pub fn identifier(&self) -> Option<ResourceIdentifier> {
        self.id()
            .map(|id| ResourceIdentifier::new(self.resource_type(), id))
    }

    /// Read a field by its public name.
    ///
    /// The name is resolved through the coding keys. When the storage key
    /// has a declared kind and the stored value does not match it, the
    /// mismatch is reported to the context's diagnostics and `None` is
    /// returned.
    pub fn read(&self, key: &str) -> Option<Value> {
        let storage_key = self.schema.storage_key(key);
        let raw = self.store().get(&self.key, storage_key);

        match coerce(self.schema.property_type(storage_key), raw) {
            Coerced::Mismatch { expected, value } => {
                self.context.diagnostics().report(&PropertyMismatch {
                    resource_type: self.resource_type().to_string(),
                    id: self.id().unwrap_or_default(),
                    key: storage_key.to_string(),
                    expected,
                    value,
                });
                None
            }
            coerced => coerced.into_option(),
        }
    }

    /// Write an attribute by its public name.
    ///
    /// Writes are not type checked.
    pub fn write(&self, key: &str, value: impl Into<Value>) {
        let storage_key = self.schema.storage_key(key);
        self.store().set(&self.key, storage_key, value.into());
    }

    /// Remove a field by its public name.
    ///
    /// Clears both the attribute and a relationship of the same name, so a
    /// following [`read`](Self::read) yields `None`.
    pub fn remove(&self, key: &str) {
        let storage_key = self.schema.storage_key(key);
        for member in [Member::Attributes, Member::Relationships] {
            self.store()
                .set_member_value(&self.key, member, storage_key, None);
        }
    }

    pub fn string(&self, key: &str) -> Option<String> {
        match self.read(key)? {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn number(&self, key: &str) -> Option<Number> {
        match self.read(key)? {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn bool(&self, key: &str) -> Option<bool> {
        self.read(key)?.as_bool()
    }

    pub fn strings(&self, key: &str) -> Option<Vec<String>> {
        match self.read(key)? {
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
            _ => None,
        }
    }

    pub fn dictionary(&self, key: &str) -> Option<Map<String, Value>> {
        match self.read(key)? {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn dictionaries(&self, key: &str) -> Option<Vec<Map<String, Value>>> {
        match self.read(key)? {
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::Object(map) => Some(map),
                    _ => None,
                })
                .collect(),
            _ => None,
        }
    }

    pub fn attributes(&self) -> Option<Map<String, Value>> {
        self.store().member(&self.key, Member::Attributes)
    }

    pub fn relationships(&self) -> Option<Map<String, Value>> {
        self.store().member(&self.key, Member::Relationships)
    }

    pub fn meta(&self) -> Option<Map<String, Value>> {
        self.store().member(&self.key, Member::Meta)
    }

    pub fn links(&self) -> Option<Map<String, Value>> {
        self.store().member(&self.key, Member::Links)
    }

    /// Linkage recorded for a relationship, if it is well formed.
    pub fn relationship(&self, name: &str) -> Option<Linkage> {
        let storage_key = self.schema.storage_key(name);
        let relationships = self.relationships()?;
        Linkage::from_value(relationships.get(storage_key)?.get("data")?)
    }

    /// Replace a relationship with `{"data": linkage}`.
    pub fn set_relationship(&self, name: &str, linkage: impl Into<Linkage>) {
        let storage_key = self.schema.storage_key(name);
        let relationship = json!({"data": linkage.into().to_value()});
        self.store().set_member_value(
            &self.key,
            Member::Relationships,
            storage_key,
            Some(relationship),
        );
    }

    pub fn remove_relationship(&self, name: &str) {
        let storage_key = self.schema.storage_key(name);
        self.store()
            .set_member_value(&self.key, Member::Relationships, storage_key, None);
    }

    pub(crate) fn resource_object(&self, id_member: IdMember) -> JsonApiResult<Map<String, Value>> {
        let mut object = Map::new();
        object.insert("type".to_string(), json!(self.resource_type()));

        match id_member {
            IdMember::IfPresent => {
                if let Some(id) = self.id() {
                    object.insert("id".to_string(), Value::String(id));
                }
            }
            IdMember::Required { position } => {
                let Some(id) = self.id() else {
                    debug!(
                        "Refusing to serialize {} at position {} without an id",
                        self.resource_type(),
                        position
                    );
                    return Err(JsonApiError::missing_id(self.resource_type(), position));
                };
                object.insert("id".to_string(), Value::String(id));
            }
            IdMember::Omitted => {}
        }

        if let Some(attributes) = self.attributes().filter(|a| !a.is_empty()) {
            object.insert("attributes".to_string(), Value::Object(attributes));
        }
        if let Some(relationships) = self.relationships().filter(|r| !r.is_empty()) {
            object.insert("relationships".to_string(), Value::Object(relationships));
        }

        trace!("Built resource object for {} {}", self.resource_type(), self.key);
        Ok(object)
    }

    /// Build the single-resource document `{"data": {...}}`.
    ///
    /// `id`, `attributes` and `relationships` appear only when present and
    /// non-empty.
    pub fn to_document(&self) -> JsonApiResult<Value> {
        let object = self.resource_object(IdMember::IfPresent)?;
        Ok(json!({"data": Value::Object(object)}))
    }

    /// The single-resource document encoded as JSON bytes.
    pub fn to_document_data(&self) -> JsonApiResult<Vec<u8>> {
        Ok(serde_json::to_vec(&self.to_document()?)?)
    }

    /// Move this handle into another context's store.
    ///
    /// The raw object is carried over with [`Context::adopt`], so reads and
    /// writes keep working against the new store.
    pub fn reassign_context(&mut self, context: Context) {
        context.adopt(self);
    }

    pub(crate) fn rebind(&mut self, context: Context, key: ResourceKey) {
        self.key = key;
        self.context = context;
    }

    /// Convert into a typed kind when the type discriminator matches.
    ///
    /// The handle picks up the schema registered for `K` in its context.
    pub fn into_kind<K: ResourceKind>(self) -> Option<K> {
        if self.resource_type() != K::RESOURCE_TYPE {
            return None;
        }
        let schema = self.context.registry().kind::<K>();
        Some(K::from(Self { schema, ..self }))
    }
}

impl AsRef<Resource> for Resource {
    fn as_ref(&self) -> &Resource {
        self
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("key", &self.key.to_string())
            .field("type", &self.resource_type())
            .field("id", &self.id())
            .finish()
    }
}
