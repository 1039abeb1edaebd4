//! Parsed JSON:API documents.
//!
//! Parsing places every resource object of a payload (primary `data` and
//! `included`) into the context's store and hands back [`Resource`] handles.
//! Error members are normalized into [`ErrorObject`]s.
//!
//! # Example Usage
//!
//! ```rust
//! use jsonapi_mapper::{Context, PrimaryData};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let context = Context::new();
//! let document = context.parse_document(json!({
//!     "data": {
//!         "type": "articles",
//!         "id": "1",
//!         "attributes": {"title": "JSON:API paints my bikeshed!"},
//!         "relationships": {"author": {"data": {"type": "people", "id": "9"}}}
//!     },
//!     "included": [
//!         {"type": "people", "id": "9", "attributes": {"name": "Dan"}}
//!     ]
//! }))?;
//!
//! let Some(PrimaryData::Single(article)) = document.data() else {
//!     panic!("expected a single resource");
//! };
//! assert_eq!(article.string("title").as_deref(), Some("JSON:API paints my bikeshed!"));
//! assert_eq!(document.included().len(), 1);
//! assert_eq!(context.len(), 2);
//! # Ok(())
//! # }
//! ```

pub mod error_object;

pub use error_object::{ErrorObject, ErrorSource};

use crate::context::Context;
use crate::error::{JsonApiError, JsonApiResult};
use crate::resource::Resource;
use crate::schema::ResourceSchema;
use crate::storage::ResourceKey;
use log::debug;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Primary data of a document.
#[derive(Debug, Clone)]
pub enum PrimaryData {
    Single(Resource),
    Many(Vec<Resource>),
    /// `"data": null`
    Null,
}

impl PrimaryData {
    /// Primary resources in document order.
    pub fn resources(&self) -> Vec<&Resource> {
        match self {
            Self::Single(resource) => vec![resource],
            Self::Many(resources) => resources.iter().collect(),
            Self::Null => Vec::new(),
        }
    }
}

/// A parsed top-level JSON:API document.
#[derive(Debug, Clone)]
pub struct Document {
    data: Option<PrimaryData>,
    included: Vec<Resource>,
    errors: Vec<ErrorObject>,
    meta: Option<Map<String, Value>>,
    links: Option<Map<String, Value>>,
    context: Context,
}

/// A resource object that passed validation but is not yet stored.
struct StagedObject {
    object: Map<String, Value>,
    schema: Arc<ResourceSchema>,
}

enum StagedData {
    Single(StagedObject),
    Many(Vec<StagedObject>),
    Null,
}

impl Document {
    /// Validate a top-level document, then store its resources in `context`.
    ///
    /// No store mutation happens unless the whole document is valid.
    pub(crate) fn parse(context: &Context, document: Value) -> JsonApiResult<Self> {
        let Value::Object(mut top) = document else {
            return Err(JsonApiError::invalid_document(
                "top-level value must be an object",
            ));
        };

        if !["data", "errors", "meta"].iter().any(|k| top.contains_key(*k)) {
            return Err(JsonApiError::invalid_document(
                "document must contain at least one of 'data', 'errors' or 'meta'",
            ));
        }
        if top.contains_key("data") && top.contains_key("errors") {
            return Err(JsonApiError::invalid_document(
                "'data' and 'errors' must not coexist",
            ));
        }

        let errors = match top.remove("errors") {
            None => Vec::new(),
            Some(Value::Array(items)) => parse_errors(items),
            Some(_) => return Err(JsonApiError::invalid_document("'errors' must be an array")),
        };

        let data = match top.remove("data") {
            None => None,
            Some(Value::Null) => Some(StagedData::Null),
            Some(value @ Value::Object(_)) => Some(StagedData::Single(stage(context, value, "data")?)),
            Some(Value::Array(items)) => Some(StagedData::Many(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(i, item)| stage(context, item, &format!("data[{}]", i)))
                    .collect::<JsonApiResult<Vec<_>>>()?,
            )),
            Some(_) => {
                return Err(JsonApiError::invalid_document(
                    "'data' must be an object, an array or null",
                ));
            }
        };

        let included = match top.remove("included") {
            None => Vec::new(),
            Some(Value::Array(items)) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| stage(context, item, &format!("included[{}]", i)))
                .collect::<JsonApiResult<Vec<_>>>()?,
            Some(_) => {
                return Err(JsonApiError::invalid_document(
                    "'included' must be an array",
                ));
            }
        };

        let data = data.map(|staged| match staged {
            StagedData::Single(object) => PrimaryData::Single(store(context, object)),
            StagedData::Many(objects) => PrimaryData::Many(
                objects.into_iter().map(|object| store(context, object)).collect(),
            ),
            StagedData::Null => PrimaryData::Null,
        });
        let included: Vec<Resource> = included
            .into_iter()
            .map(|object| store(context, object))
            .collect();

        debug!(
            "Parsed document: {} primary, {} included, {} errors",
            data.as_ref().map_or(0, |d| d.resources().len()),
            included.len(),
            errors.len()
        );

        Ok(Self {
            data,
            included,
            errors,
            meta: into_object(top.remove("meta")),
            links: into_object(top.remove("links")),
            context: context.clone(),
        })
    }

    /// Primary data; `None` when the document has no `data` member.
    pub fn data(&self) -> Option<&PrimaryData> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> Option<PrimaryData> {
        self.data
    }

    /// Primary resources in document order.
    pub fn resources(&self) -> Vec<&Resource> {
        self.data
            .as_ref()
            .map(PrimaryData::resources)
            .unwrap_or_default()
    }

    pub fn included(&self) -> &[Resource] {
        &self.included
    }

    pub fn errors(&self) -> &[ErrorObject] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn meta(&self) -> Option<&Map<String, Value>> {
        self.meta.as_ref()
    }

    pub fn links(&self) -> Option<&Map<String, Value>> {
        self.links.as_ref()
    }

    /// The context whose store holds this document's resources.
    pub fn context(&self) -> &Context {
        &self.context
    }
}

fn parse_errors(items: Vec<Value>) -> Vec<ErrorObject> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| match item {
            Value::Object(map) => Some(ErrorObject::from_map(map)),
            _ => {
                debug!("Skipping non-object error member at position {}", i);
                None
            }
        })
        .collect()
}

fn stage(context: &Context, value: Value, location: &str) -> JsonApiResult<StagedObject> {
    let Value::Object(object) = value else {
        return Err(JsonApiError::invalid_document(format!(
            "{} must be a resource object",
            location
        )));
    };

    let resource_type = object
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            JsonApiError::invalid_document(format!("{} is missing a string 'type'", location))
        })?;

    if object.get("id").is_some_and(|id| !id.is_string()) {
        return Err(JsonApiError::invalid_document(format!(
            "{} has a non-string 'id'",
            location
        )));
    }

    let schema = match context.registry().get(resource_type) {
        Some(schema) => schema,
        None if context.config().reject_unknown_types => {
            return Err(JsonApiError::UnknownResourceType(resource_type.to_string()));
        }
        None => {
            debug!("No schema registered for '{}', reading it untyped", resource_type);
            Arc::new(ResourceSchema::untyped(resource_type))
        }
    };

    Ok(StagedObject { object, schema })
}

/// Insert a staged object, merging it into an existing object with the same
/// type and id.
fn store(context: &Context, staged: StagedObject) -> Resource {
    let id = staged
        .object
        .get("id")
        .and_then(Value::as_str)
        .map(str::to_string);

    let key = match id {
        Some(id) => {
            let key = context
                .store()
                .upsert(staged.schema.resource_type(), &id, staged.object);
            debug!("Stored parsed {} '{}' as {}", staged.schema.resource_type(), id, key);
            key
        }
        None => {
            let key = ResourceKey::generate();
            context.store().insert_object(key.clone(), staged.object);
            key
        }
    };

    Resource::bind(context.clone(), key, staged.schema)
}

fn into_object(value: Option<Value>) -> Option<Map<String, Value>> {
    match value? {
        Value::Object(map) => Some(map),
        _ => None,
    }
}
