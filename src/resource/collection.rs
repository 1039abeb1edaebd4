//! Document builders for ordered sequences of resources.
//!
//! Two shapes exist. The general document describes persisted resources, so
//! every element must carry an id and a single missing id fails the whole
//! call. The creation document describes resources the server has yet to
//! create, so ids are always left out.

use crate::error::JsonApiResult;
use crate::resource::resource::{IdMember, Resource};
use serde_json::{Value, json};

/// Multi-resource document builders.
///
/// Implemented for any slice of resources or typed resource kinds, in input
/// order.
///
/// ```rust
/// use jsonapi_mapper::{Resource, ResourceCollection, ResourceSchema};
/// use serde_json::json;
///
/// let first = Resource::new(ResourceSchema::untyped("tags"));
/// first.set_id("1");
/// let second = Resource::new(ResourceSchema::untyped("tags"));
///
/// assert!(vec![first.clone(), second.clone()].to_document().is_err());
/// assert_eq!(
///     [first, second].to_creation_document().unwrap(),
///     json!({"data": [{"type": "tags"}, {"type": "tags"}]})
/// );
/// ```
pub trait ResourceCollection {
    /// `{"data": [...]}` where every element includes its `id`.
    ///
    /// Fails with a serialization error naming the first resource without
    /// an id; nothing is produced in that case.
    fn to_document(&self) -> JsonApiResult<Value>;

    /// `{"data": [...]}` with `id` omitted from every element.
    fn to_creation_document(&self) -> JsonApiResult<Value>;

    fn to_document_data(&self) -> JsonApiResult<Vec<u8>> {
        Ok(serde_json::to_vec(&self.to_document()?)?)
    }

    fn to_creation_document_data(&self) -> JsonApiResult<Vec<u8>> {
        Ok(serde_json::to_vec(&self.to_creation_document()?)?)
    }
}

impl<R: AsRef<Resource>> ResourceCollection for [R] {
    fn to_document(&self) -> JsonApiResult<Value> {
        let data = self
            .iter()
            .enumerate()
            .map(|(position, resource)| {
                resource
                    .as_ref()
                    .resource_object(IdMember::Required { position })
                    .map(Value::Object)
            })
            .collect::<JsonApiResult<Vec<_>>>()?;
        Ok(json!({"data": data}))
    }

    fn to_creation_document(&self) -> JsonApiResult<Value> {
        let data = self
            .iter()
            .map(|resource| {
                resource
                    .as_ref()
                    .resource_object(IdMember::Omitted)
                    .map(Value::Object)
            })
            .collect::<JsonApiResult<Vec<_>>>()?;
        Ok(json!({"data": data}))
    }
}
