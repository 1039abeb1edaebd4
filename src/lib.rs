//! Bidirectional mapping between JSON:API documents and typed resources.
//!
//! Resources are thin, typed handles over raw resource objects kept in a
//! shared, synchronized store. Reads are checked against each resource kind's
//! declared property types and report mismatches through a diagnostic hook
//! instead of failing; documents are built straight from the stored objects.
//!
//! # Core Components
//!
//! - [`Context`] - shared store, resource kind registry and diagnostic hook
//! - [`Resource`] - typed field access over one stored resource object
//! - [`ResourceKind`] - trait for declaring concrete resource kinds
//! - [`ResourceCollection`] - general and creation documents for many resources
//! - [`ErrorObject`] - normalized JSON:API error members
//!
//! # Quick Start
//!
//! ```rust
//! use jsonapi_mapper::{Context, PropertyType, Resource, ResourceCollection, ResourceKind};
//! use serde_json::json;
//! use std::sync::{Arc, Mutex};
//!
//! struct Person(Resource);
//!
//! impl From<Resource> for Person {
//!     fn from(resource: Resource) -> Self {
//!         Self(resource)
//!     }
//! }
//!
//! impl AsRef<Resource> for Person {
//!     fn as_ref(&self) -> &Resource {
//!         &self.0
//!     }
//! }
//!
//! impl ResourceKind for Person {
//!     const RESOURCE_TYPE: &'static str = "people";
//!
//!     fn property_types() -> Vec<(&'static str, PropertyType)> {
//!         vec![("name", PropertyType::String), ("age", PropertyType::Number)]
//!     }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mismatches = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&mismatches);
//! let context = Context::builder()
//!     .register::<Person>()
//!     .diagnostic_hook(move |mismatch| sink.lock().unwrap().push(mismatch.key.clone()))
//!     .build();
//!
//! let document = context.parse_document(json!({
//!     "data": [{"type": "people", "id": "1", "attributes": {"name": "Ada", "age": "old"}}]
//! }))?;
//! let person = document.resources()[0].clone().into_kind::<Person>().unwrap();
//!
//! assert_eq!(person.resource().string("name").as_deref(), Some("Ada"));
//! assert_eq!(person.resource().read("age"), None);
//! assert_eq!(mismatches.lock().unwrap().as_slice(), &["age".to_string()]);
//!
//! let new_person = Person::new_in(&context);
//! new_person.resource().write("name", "Grace");
//! assert_eq!(
//!     [new_person].to_creation_document()?,
//!     json!({"data": [{"type": "people", "attributes": {"name": "Grace"}}]})
//! );
//! # Ok(())
//! # }
//! ```

pub mod context;
pub mod diagnostics;
pub mod document;
pub mod error;
pub mod resource;
pub mod schema;
pub mod storage;

// Re-export commonly used types for convenience
pub use context::{Context, ContextBuilder, ContextConfig};
pub use diagnostics::{DiagnosticHook, PropertyMismatch};
pub use document::{Document, ErrorObject, ErrorSource, PrimaryData};
pub use error::{JsonApiError, JsonApiResult, SerializationError};
pub use resource::{Linkage, Resource, ResourceCollection, ResourceIdentifier};
pub use schema::{PropertyType, ResourceKind, ResourceSchema};
pub use storage::{DocumentStore, InMemoryStore};
