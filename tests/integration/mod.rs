//! Integration tests for the JSON:API mapper.
//!
//! Each module covers one surface of the public API. Tests build their own
//! [`Context`](jsonapi_mapper::Context) so stores and diagnostic hooks never
//! leak between tests.

pub mod coercion_properties;
pub mod document_building;
