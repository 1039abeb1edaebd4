//! Storage abstraction for raw resource objects.
//!
//! A store owns the mutable, untyped JSON:API resource objects of one document
//! graph. Resources never hold their own data: every access goes through the
//! store, keyed by the resource's [`ResourceKey`], and every store method is
//! synchronized so concurrent readers see consistent snapshots and concurrent
//! writers never interleave partially.
//!
//! # Example Usage
//!
//! ```rust
//! use jsonapi_mapper::storage::{DocumentStore, InMemoryStore, Member, ResourceKey};
//! use serde_json::{Map, json};
//!
//! let store = InMemoryStore::new();
//! let key = ResourceKey::generate();
//!
//! let mut object = Map::new();
//! object.insert("type".to_string(), json!("articles"));
//! store.insert_object(key.clone(), object);
//!
//! store.set(&key, "title", json!("JSON:API paints my bikeshed!"));
//! assert_eq!(store.get(&key, "title"), Some(json!("JSON:API paints my bikeshed!")));
//! assert!(store.member(&key, Member::Attributes).is_some());
//! ```

pub mod in_memory;

pub use in_memory::{InMemoryStore, InMemoryStoreStats};

use serde_json::{Map, Value};
use std::fmt;
use uuid::Uuid;

/// Internal identity of one resource within a store.
///
/// Stable for the lifetime of the resource object, independent of its
/// JSON:API id (which may be absent or assigned later).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceKey(Uuid);

impl ResourceKey {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Resource_{}>", self.0)
    }
}

/// Top-level members of a resource object that hold sub-mappings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Member {
    Attributes,
    Relationships,
    Meta,
    Links,
}

impl Member {
    pub const ALL: [Member; 4] = [
        Self::Attributes,
        Self::Relationships,
        Self::Meta,
        Self::Links,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Attributes => "attributes",
            Self::Relationships => "relationships",
            Self::Meta => "meta",
            Self::Links => "links",
        }
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Synchronized access to raw resource objects.
///
/// Each method is a single critical section; sequences of calls are not
/// atomic with respect to each other.
pub trait DocumentStore: Send + Sync {
    /// Raw value of a field.
    ///
    /// Looks in `attributes` first, then returns the linkage `data` of a
    /// relationship with the same name.
    fn get(&self, identity: &ResourceKey, key: &str) -> Option<Value>;

    /// Write an attribute, creating the `attributes` member if needed.
    ///
    /// Writes to unknown identities are dropped.
    fn set(&self, identity: &ResourceKey, key: &str, value: Value);

    /// Snapshot of one member mapping.
    fn member(&self, identity: &ResourceKey, member: Member) -> Option<Map<String, Value>>;

    /// Insert (`Some`) or remove (`None`) one entry of a member mapping.
    fn set_member_value(
        &self,
        identity: &ResourceKey,
        member: Member,
        key: &str,
        value: Option<Value>,
    );

    /// The JSON:API id of a stored object.
    fn identifier(&self, identity: &ResourceKey) -> Option<String>;

    fn set_identifier(&self, identity: &ResourceKey, id: Option<String>);

    /// Snapshot of the whole raw object.
    fn object(&self, identity: &ResourceKey) -> Option<Map<String, Value>>;

    /// Insert or replace a whole raw object.
    fn insert_object(&self, identity: ResourceKey, object: Map<String, Value>);

    fn remove_object(&self, identity: &ResourceKey) -> Option<Map<String, Value>>;

    /// Merge `object` into the object stored under `identity`, inserting it
    /// when the identity is unknown. See [`merge_members`].
    fn merge_object(&self, identity: ResourceKey, object: Map<String, Value>);

    /// Merge `object` into the stored object with the same `type` and `id`,
    /// or insert it under a fresh key. Lookup and write happen under one lock.
    fn upsert(&self, resource_type: &str, id: &str, object: Map<String, Value>) -> ResourceKey;

    /// Identity of the object with the given `type` and `id`.
    fn find(&self, resource_type: &str, id: &str) -> Option<ResourceKey>;

    fn contains(&self, identity: &ResourceKey) -> bool {
        self.object(identity).is_some()
    }

    /// Number of stored objects.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Merge a raw resource object into a stored one.
///
/// The `attributes`, `relationships`, `meta` and `links` members are merged
/// entry by entry, so entries the incoming object does not mention survive.
/// Any other member is replaced.
pub fn merge_members(stored: &mut Map<String, Value>, incoming: Map<String, Value>) {
    for (name, value) in incoming {
        let mergeable = Member::ALL.iter().any(|member| member.as_str() == name);
        match value {
            Value::Object(entries) if mergeable => match stored.get_mut(&name) {
                Some(Value::Object(current)) => current.extend(entries),
                _ => {
                    stored.insert(name, Value::Object(entries));
                }
            },
            value => {
                stored.insert(name, value);
            }
        }
    }
}
