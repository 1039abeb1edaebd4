//! Common test utilities for JSON:API mapping tests.
//!
//! Provides resource kinds, document fixtures, a recorder for diagnostic
//! mismatches and assertion macros shared by the integration tests.

use jsonapi_mapper::{Context, PropertyMismatch};
use std::sync::{Arc, Mutex};

pub mod fixtures;
pub mod kinds;

/// Initialize logging once per test binary.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Collects every mismatch delivered to a context's diagnostic hook.
#[derive(Debug, Clone, Default)]
pub struct MismatchRecorder {
    mismatches: Arc<Mutex<Vec<PropertyMismatch>>>,
}

impl MismatchRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install this recorder as the context's active hook.
    pub fn install(&self, context: &Context) {
        let sink = Arc::clone(&self.mismatches);
        context.set_diagnostic_hook(move |mismatch| sink.lock().unwrap().push(mismatch.clone()));
    }

    /// A hook closure suitable for `ContextBuilder::diagnostic_hook`.
    pub fn hook(&self) -> impl Fn(&PropertyMismatch) + Send + Sync + 'static {
        let sink = Arc::clone(&self.mismatches);
        move |mismatch| sink.lock().unwrap().push(mismatch.clone())
    }

    pub fn mismatches(&self) -> Vec<PropertyMismatch> {
        self.mismatches.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.mismatches.lock().unwrap().len()
    }
}

/// Assert that a document build failed with a missing id at `position`.
#[macro_export]
macro_rules! assert_missing_id {
    ($result:expr, $position:expr) => {
        match $result {
            Err(jsonapi_mapper::JsonApiError::Serialization(
                jsonapi_mapper::SerializationError::MissingId { position, .. },
            )) => assert_eq!(position, $position, "missing id reported at wrong position"),
            Ok(value) => panic!("Expected a missing id error, but built {}", value),
            Err(other) => panic!("Expected a missing id error, got {:?}", other),
        }
    };
}

/// Assert that parsing failed because the document is malformed.
#[macro_export]
macro_rules! assert_invalid_document {
    ($result:expr, $substring:expr) => {
        match $result {
            Err(jsonapi_mapper::JsonApiError::InvalidDocument { message }) => assert!(
                message.contains($substring),
                "Error message '{}' does not contain '{}'",
                message,
                $substring
            ),
            Ok(_) => panic!("Expected an invalid document error, but parsing succeeded"),
            Err(other) => panic!("Expected an invalid document error, got {:?}", other),
        }
    };
}
