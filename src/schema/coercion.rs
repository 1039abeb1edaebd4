//! Read-time narrowing of raw store values to declared property kinds.
//!
//! Coercion is opt-in per storage key: keys without a declared kind pass
//! through untouched. A present value that does not match its declared kind is
//! a mismatch, which callers report and then treat as absent.

use super::types::PropertyType;
use serde_json::Value;

/// Outcome of coercing one raw value.
#[derive(Debug, Clone, PartialEq)]
pub enum Coerced {
    /// No value was stored (or it was JSON `null`)
    Absent,
    /// The value matched its declared kind, or no kind was declared
    Value(Value),
    /// The value is present but does not match the declared kind
    Mismatch {
        expected: PropertyType,
        value: Value,
    },
}

impl Coerced {
    /// The narrowed value, treating a mismatch as absence.
    pub fn into_option(self) -> Option<Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::Absent | Self::Mismatch { .. } => None,
        }
    }

    pub fn is_mismatch(&self) -> bool {
        matches!(self, Self::Mismatch { .. })
    }
}

/// Narrow `raw` to `declared`.
///
/// ```rust
/// use jsonapi_mapper::schema::{Coerced, PropertyType, coerce};
/// use serde_json::json;
///
/// assert_eq!(coerce(Some(PropertyType::String), Some(json!("a"))), Coerced::Value(json!("a")));
/// assert!(coerce(Some(PropertyType::String), Some(json!(1))).is_mismatch());
/// assert_eq!(coerce(None, Some(json!(1))), Coerced::Value(json!(1)));
/// assert_eq!(coerce(Some(PropertyType::Bool), None), Coerced::Absent);
/// ```
pub fn coerce(declared: Option<PropertyType>, raw: Option<Value>) -> Coerced {
    let value = match raw {
        None | Some(Value::Null) => return Coerced::Absent,
        Some(value) => value,
    };

    match declared {
        Some(expected) if !expected.matches(&value) => Coerced::Mismatch { expected, value },
        _ => Coerced::Value(value),
    }
}
