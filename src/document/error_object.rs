//! JSON:API error objects.
//!
//! Error members are parsed best-effort: each known field is taken when it
//! has the expected shape and ignored otherwise, and the raw mapping is kept
//! for anything outside the normalized set.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Location of the cause of an error in the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorSource {
    /// JSON Pointer to the offending value, e.g. `/data/attributes/title`
    pub pointer: Option<String>,
    /// Name of the offending query parameter
    pub parameter: Option<String>,
}

/// One member of a document's `errors` array.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorObject {
    pub id: Option<String>,
    pub links: Option<Map<String, Value>>,
    /// HTTP status, always in string form
    pub status: Option<String>,
    pub code: Option<String>,
    pub title: Option<String>,
    pub detail: Option<String>,
    /// Present only when the input has a `source` object
    pub source: Option<ErrorSource>,
    pub meta: Option<Map<String, Value>>,
    raw: Map<String, Value>,
}

impl ErrorObject {
    /// Parse an error member.
    ///
    /// `status` is accepted as either a JSON string or a JSON number.
    ///
    /// ```rust
    /// use jsonapi_mapper::ErrorObject;
    /// use serde_json::json;
    ///
    /// let error = ErrorObject::from_value(&json!({"status": 422, "title": "Invalid"})).unwrap();
    /// assert_eq!(error.status.as_deref(), Some("422"));
    /// assert_eq!(error.status_code(), Some(422));
    /// assert!(error.source.is_none());
    /// ```
    pub fn from_map(raw: Map<String, Value>) -> Self {
        let source = raw
            .get("source")
            .and_then(Value::as_object)
            .map(|source| ErrorSource {
                pointer: string_member(source, "pointer"),
                parameter: string_member(source, "parameter"),
            });

        Self {
            id: string_member(&raw, "id"),
            links: object_member(&raw, "links"),
            status: raw.get("status").and_then(status_string),
            code: string_member(&raw, "code"),
            title: string_member(&raw, "title"),
            detail: string_member(&raw, "detail"),
            source,
            meta: object_member(&raw, "meta"),
            raw,
        }
    }

    /// Parse an error member from a value; `None` unless it is an object.
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_object().cloned().map(Self::from_map)
    }

    /// The unmodified error member.
    pub fn raw(&self) -> &Map<String, Value> {
        &self.raw
    }

    /// The status as an HTTP status code, when it parses as one.
    pub fn status_code(&self) -> Option<u16> {
        self.status.as_deref()?.parse().ok()
    }
}

impl From<Map<String, Value>> for ErrorObject {
    fn from(raw: Map<String, Value>) -> Self {
        Self::from_map(raw)
    }
}

fn string_member(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key)?.as_str().map(str::to_string)
}

fn object_member(map: &Map<String, Value>, key: &str) -> Option<Map<String, Value>> {
    map.get(key)?.as_object().cloned()
}

fn status_string(value: &Value) -> Option<String> {
    match value {
        Value::String(status) => Some(status.clone()),
        Value::Number(number) => Some(number_string(number)),
        _ => None,
    }
}

/// Floats at or above this magnitude may not be exact integers.
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

/// Canonical string form of a numeric status.
///
/// Integral floats drop `.0` only while they are exactly representable as
/// integers; anything larger keeps its JSON form.
fn number_string(number: &Number) -> String {
    match number.as_f64() {
        Some(float)
            if number.is_f64() && float.fract() == 0.0 && float.abs() < MAX_EXACT_FLOAT =>
        {
            format!("{}", float as i64)
        }
        _ => number.to_string(),
    }
}
