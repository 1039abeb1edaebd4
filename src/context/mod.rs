//! Shared context for one resource graph.
//!
//! A [`Context`] owns the store holding the raw objects of one parsed
//! document graph, the registry of resource kinds used to type its resources,
//! and the diagnostic hook for read-time mismatches. It is cheap to clone and
//! every clone refers to the same state, so many resource handles can share
//! one store; the store lives as long as its longest holder.

pub mod builder;

pub use builder::{ContextBuilder, ContextConfig};

use crate::diagnostics::{Diagnostics, PropertyMismatch};
use crate::document::Document;
use crate::error::JsonApiResult;
use crate::resource::Resource;
use crate::schema::{ResourceKind, ResourceSchema, SchemaRegistry};
use crate::storage::{DocumentStore, ResourceKey};
use log::debug;
use serde_json::{Map, Value, json};
use std::fmt;
use std::sync::Arc;

struct ContextInner {
    store: Arc<dyn DocumentStore>,
    registry: SchemaRegistry,
    diagnostics: Diagnostics,
    config: ContextConfig,
}

/// Handle to a shared store, schema registry and diagnostics channel.
#[derive(Clone)]
pub struct Context {
    inner: Arc<ContextInner>,
}

impl Context {
    /// A context with an empty in-memory store and default configuration.
    pub fn new() -> Self {
        ContextBuilder::new().build()
    }

    pub fn builder() -> ContextBuilder {
        ContextBuilder::new()
    }

    pub(crate) fn from_parts(
        store: Arc<dyn DocumentStore>,
        registry: SchemaRegistry,
        diagnostics: Diagnostics,
        config: ContextConfig,
    ) -> Self {
        Self {
            inner: Arc::new(ContextInner {
                store,
                registry,
                diagnostics,
                config,
            }),
        }
    }

    pub fn store(&self) -> &dyn DocumentStore {
        self.inner.store.as_ref()
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.inner.registry
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.inner.diagnostics
    }

    pub fn config(&self) -> &ContextConfig {
        &self.inner.config
    }

    /// Whether both handles refer to the same context.
    pub fn ptr_eq(&self, other: &Context) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn register<K: ResourceKind>(&self) -> Arc<ResourceSchema> {
        self.inner.registry.register(K::schema())
    }

    pub fn register_schema(&self, schema: ResourceSchema) -> Arc<ResourceSchema> {
        self.inner.registry.register(schema)
    }

    /// Replace the active diagnostic hook. Last registration wins.
    pub fn set_diagnostic_hook<F>(&self, hook: F)
    where
        F: Fn(&PropertyMismatch) + Send + Sync + 'static,
    {
        self.inner.diagnostics.set_hook(Arc::new(hook));
    }

    pub fn clear_diagnostic_hook(&self) {
        self.inner.diagnostics.clear_hook();
    }

    /// A new resource of a registered type (untyped when unknown).
    pub fn create(&self, resource_type: &str) -> Resource {
        self.create_with_schema(self.inner.registry.get_or_untyped(resource_type))
    }

    /// A new resource of kind `K`, registering the kind on first use.
    pub fn create_kind<K: ResourceKind>(&self) -> Resource {
        self.create_with_schema(self.inner.registry.kind::<K>())
    }

    pub(crate) fn create_with_schema(&self, schema: Arc<ResourceSchema>) -> Resource {
        let key = ResourceKey::generate();
        let mut object = Map::new();
        object.insert("type".to_string(), json!(schema.resource_type()));
        self.store().insert_object(key.clone(), object);
        Resource::bind(self.clone(), key, schema)
    }

    /// Handle to the stored resource with the given type and id.
    pub fn find(&self, resource_type: &str, id: &str) -> Option<Resource> {
        let key = self.store().find(resource_type, id)?;
        let schema = self.inner.registry.get_or_untyped(resource_type);
        Some(Resource::bind(self.clone(), key, schema))
    }

    /// Number of resource objects in the store.
    pub fn len(&self) -> usize {
        self.store().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store().is_empty()
    }

    /// Copy a resource's raw object into this context and rebind the handle.
    ///
    /// When this store already holds an object with the same type and id, the
    /// incoming members are merged into it under the existing key, so handles
    /// already bound here see the fresh data. The source store is left
    /// untouched.
    pub fn adopt(&self, resource: &mut Resource) {
        if self.ptr_eq(resource.context()) {
            return;
        }

        let object = resource
            .context()
            .store()
            .object(resource.key())
            .unwrap_or_else(|| {
                let mut object = Map::new();
                object.insert("type".to_string(), json!(resource.resource_type()));
                object
            });

        let id = object.get("id").and_then(Value::as_str).map(str::to_string);
        let key = match id {
            Some(id) => {
                let key = self.store().upsert(resource.resource_type(), &id, object);
                debug!("Adopted {} '{}' as {}", resource.resource_type(), id, key);
                key
            }
            None => {
                self.store().merge_object(resource.key().clone(), object);
                resource.key().clone()
            }
        };

        resource.rebind(self.clone(), key);
    }

    /// Parse a JSON:API document into this context's store.
    pub fn parse_document(&self, document: Value) -> JsonApiResult<Document> {
        Document::parse(self, document)
    }

    /// Decode and parse a JSON:API document.
    pub fn parse_slice(&self, bytes: &[u8]) -> JsonApiResult<Document> {
        self.parse_document(serde_json::from_slice(bytes)?)
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("objects", &self.len())
            .field("resource_types", &self.inner.registry.resource_types())
            .field("diagnostics", &self.inner.diagnostics)
            .field("config", &self.inner.config)
            .finish()
    }
}
