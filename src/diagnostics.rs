//! Side channel for read-time type mismatches.
//!
//! A mismatch never fails a read. The read yields `None` and a
//! [`PropertyMismatch`] is handed to the hook registered on the owning
//! [`Context`](crate::Context), exactly once per detected mismatch.

use crate::schema::PropertyType;
use log::warn;
use serde_json::Value;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Details of one value that failed its declared kind.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyMismatch {
    /// The resource's `type`
    pub resource_type: String,
    /// The resource's id, or an empty string when it has none
    pub id: String,
    /// Storage key that was read
    pub key: String,
    /// Declared kind for the key
    pub expected: PropertyType,
    /// The raw value found in the store
    pub value: Value,
}

impl PropertyMismatch {
    pub fn expected_name(&self) -> &'static str {
        self.expected.name()
    }
}

impl fmt::Display for PropertyMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}].{}: expected {}, found {}",
            self.resource_type, self.id, self.key, self.expected, self.value
        )
    }
}

/// Callback invoked for every mismatch.
pub type DiagnosticHook = Arc<dyn Fn(&PropertyMismatch) + Send + Sync>;

/// Holder for the active diagnostic hook. Last registration wins.
pub struct Diagnostics {
    hook: RwLock<Option<DiagnosticHook>>,
    log_mismatches: bool,
}

impl Diagnostics {
    pub fn new(hook: Option<DiagnosticHook>, log_mismatches: bool) -> Self {
        Self {
            hook: RwLock::new(hook),
            log_mismatches,
        }
    }

    pub fn set_hook(&self, hook: DiagnosticHook) {
        *self.hook.write().unwrap_or_else(PoisonError::into_inner) = Some(hook);
    }

    pub fn clear_hook(&self) {
        *self.hook.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn has_hook(&self) -> bool {
        self.hook
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Deliver a mismatch to the log and the active hook.
    ///
    /// The hook is called outside the lock so it may re-register itself.
    pub fn report(&self, mismatch: &PropertyMismatch) {
        if self.log_mismatches {
            warn!("Incorrect property value: {}", mismatch);
        }
        let hook = self
            .hook
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if let Some(hook) = hook {
            hook(mismatch);
        }
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new(None, true)
    }
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics")
            .field("has_hook", &self.has_hook())
            .field("log_mismatches", &self.log_mismatches)
            .finish()
    }
}
