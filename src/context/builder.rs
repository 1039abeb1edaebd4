//! Builder pattern for configuring contexts.
//!
//! A context bundles the store that owns a document graph with the resource
//! kinds it knows and the diagnostic hook that receives type mismatches.

use crate::context::Context;
use crate::diagnostics::{DiagnosticHook, Diagnostics, PropertyMismatch};
use crate::schema::{ResourceKind, ResourceSchema, SchemaRegistry};
use crate::storage::{DocumentStore, InMemoryStore};
use std::sync::Arc;

/// Behavioural switches for a context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextConfig {
    /// Log every type mismatch at warn level, in addition to the hook.
    pub log_mismatches: bool,

    /// Fail parsing when a document names a type that was never registered.
    /// When false, such resources get an untyped schema.
    pub reject_unknown_types: bool,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            log_mismatches: true,
            reject_unknown_types: false,
        }
    }
}

/// Builder for [`Context`].
///
/// # Examples
///
/// ```rust
/// use jsonapi_mapper::{Context, ResourceSchema};
///
/// let context = Context::builder()
///     .register_schema(ResourceSchema::untyped("tags"))
///     .reject_unknown_types(true)
///     .diagnostic_hook(|mismatch| eprintln!("{}", mismatch))
///     .build();
///
/// assert!(context.registry().contains("tags"));
/// assert!(context.config().reject_unknown_types);
/// ```
#[derive(Default)]
pub struct ContextBuilder {
    config: ContextConfig,
    store: Option<Arc<dyn DocumentStore>>,
    schemas: Vec<ResourceSchema>,
    hook: Option<DiagnosticHook>,
}

impl ContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom store instead of a fresh [`InMemoryStore`].
    pub fn store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn config(mut self, config: ContextConfig) -> Self {
        self.config = config;
        self
    }

    pub fn log_mismatches(mut self, enabled: bool) -> Self {
        self.config.log_mismatches = enabled;
        self
    }

    pub fn reject_unknown_types(mut self, enabled: bool) -> Self {
        self.config.reject_unknown_types = enabled;
        self
    }

    /// Register a resource kind.
    pub fn register<K: ResourceKind>(self) -> Self {
        self.register_schema(K::schema())
    }

    pub fn register_schema(mut self, schema: ResourceSchema) -> Self {
        self.schemas.push(schema);
        self
    }

    pub fn diagnostic_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&PropertyMismatch) + Send + Sync + 'static,
    {
        self.hook = Some(Arc::new(hook));
        self
    }

    pub fn build(self) -> Context {
        let registry = SchemaRegistry::new();
        for schema in self.schemas {
            registry.register(schema);
        }
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(InMemoryStore::new()));
        let diagnostics = Diagnostics::new(self.hook, self.config.log_mismatches);

        Context::from_parts(store, registry, diagnostics, self.config)
    }
}
