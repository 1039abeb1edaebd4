//! Registry of resource kinds known to a context.

use super::types::{ResourceKind, ResourceSchema};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Thread-safe map from resource type name to its schema.
///
/// Schemas are shared behind `Arc` so every resource of one kind points at the
/// same tables.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: RwLock<HashMap<String, Arc<ResourceSchema>>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a schema, replacing any previous schema of the same type.
    pub fn register(&self, schema: ResourceSchema) -> Arc<ResourceSchema> {
        let schema = Arc::new(schema);
        self.schemas
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(schema.resource_type().to_string(), Arc::clone(&schema));
        schema
    }

    /// Schema for a kind, registering it on first use.
    pub fn kind<K: ResourceKind>(&self) -> Arc<ResourceSchema> {
        if let Some(schema) = self.get(K::RESOURCE_TYPE) {
            return schema;
        }
        let mut schemas = self.schemas.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            schemas
                .entry(K::RESOURCE_TYPE.to_string())
                .or_insert_with(|| Arc::new(K::schema())),
        )
    }

    /// Registered schema for a type name.
    pub fn get(&self, resource_type: &str) -> Option<Arc<ResourceSchema>> {
        self.schemas
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(resource_type)
            .cloned()
    }

    /// Registered schema, or an untyped one for unknown types.
    pub fn get_or_untyped(&self, resource_type: &str) -> Arc<ResourceSchema> {
        self.get(resource_type)
            .unwrap_or_else(|| Arc::new(ResourceSchema::untyped(resource_type)))
    }

    pub fn contains(&self, resource_type: &str) -> bool {
        self.schemas
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(resource_type)
    }

    /// Names of all registered types, sorted.
    pub fn resource_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self
            .schemas
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        types.sort();
        types
    }
}
