//! Resource kind schemas and read-time type coercion.
//!
//! - [`types`] - property kinds, per-kind schemas and the [`ResourceKind`] trait
//! - [`coercion`] - narrowing raw values to declared kinds
//! - [`registry`] - resource type name to schema lookup

pub mod coercion;
pub mod registry;
pub mod types;

pub use coercion::{Coerced, coerce};
pub use registry::SchemaRegistry;
pub use types::{PropertyType, ResourceKind, ResourceSchema, ResourceSchemaBuilder};
