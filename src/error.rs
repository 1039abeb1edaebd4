//! Error types for JSON:API document mapping.
//!
//! Two failure channels exist and are kept apart. Read-time type mismatches are
//! never errors: they are reported through [`crate::diagnostics`] and the read
//! yields `None`. Everything in this module is for failures that abort a
//! specific call, such as building a collection document from a resource
//! without an id or parsing a payload that is not a JSON:API document.

/// Main error type for document building and parsing.
#[derive(Debug, thiserror::Error)]
pub enum JsonApiError {
    /// A structural invariant required for serialization was violated
    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),

    /// JSON encoding/decoding errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload is not a well-formed JSON:API document
    #[error("Invalid document: {message}")]
    InvalidDocument { message: String },

    /// The payload names a resource type that was never registered
    #[error("Unknown resource type: {0}")]
    UnknownResourceType(String),
}

/// Structural failures raised while assembling a document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SerializationError {
    /// A collection document requires every resource to carry an id
    #[error("resource of type '{resource_type}' at position {position} has no id")]
    MissingId {
        resource_type: String,
        position: usize,
    },
}

/// Result type for fallible document operations.
pub type JsonApiResult<T> = Result<T, JsonApiError>;

impl JsonApiError {
    /// Create an invalid document error
    pub fn invalid_document(message: impl Into<String>) -> Self {
        Self::InvalidDocument {
            message: message.into(),
        }
    }

    /// Create a missing id serialization error
    pub fn missing_id(resource_type: impl Into<String>, position: usize) -> Self {
        Self::Serialization(SerializationError::MissingId {
            resource_type: resource_type.into(),
            position,
        })
    }

    /// Whether this error came from a violated serialization invariant.
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization(_))
    }
}
