//! In-memory document store.
//!
//! Thread-safe implementation of [`DocumentStore`] over a `HashMap` behind a
//! single `RwLock`. Cloning an `InMemoryStore` shares the same objects, so the
//! store lives as long as its longest holder.
//!
//! # Performance Characteristics
//!
//! * GET/SET/MEMBER: O(1) average case plus the cost of cloning the value
//! * FIND/UPSERT: O(n) over stored objects

use crate::storage::{DocumentStore, Member, ResourceKey, merge_members};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

type Objects = HashMap<ResourceKey, Map<String, Value>>;

/// Thread-safe in-memory store.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    objects: Arc<RwLock<Objects>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get storage statistics for debugging.
    pub fn stats(&self) -> InMemoryStoreStats {
        let objects = self.read();
        let mut stats = InMemoryStoreStats {
            object_count: objects.len(),
            ..Default::default()
        };
        for object in objects.values() {
            if object.get("id").is_some_and(Value::is_string) {
                stats.identified_count += 1;
            }
            stats.attribute_count += object
                .get("attributes")
                .and_then(Value::as_object)
                .map_or(0, Map::len);
            stats.relationship_count += object
                .get("relationships")
                .and_then(Value::as_object)
                .map_or(0, Map::len);
        }
        stats
    }

    /// Remove every object (useful for testing).
    pub fn clear(&self) {
        self.write().clear();
    }

    fn read(&self) -> RwLockReadGuard<'_, Objects> {
        self.objects.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Objects> {
        self.objects.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for InMemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryStore")
            .field("objects", &self.read().len())
            .finish()
    }
}

impl DocumentStore for InMemoryStore {
    fn get(&self, identity: &ResourceKey, key: &str) -> Option<Value> {
        let objects = self.read();
        let object = objects.get(identity)?;

        if let Some(value) = object
            .get(Member::Attributes.as_str())
            .and_then(|attributes| attributes.get(key))
        {
            return Some(value.clone());
        }

        object
            .get(Member::Relationships.as_str())
            .and_then(|relationships| relationships.get(key))
            .and_then(|relationship| relationship.get("data"))
            .cloned()
    }

    fn set(&self, identity: &ResourceKey, key: &str, value: Value) {
        self.set_member_value(identity, Member::Attributes, key, Some(value));
    }

    fn member(&self, identity: &ResourceKey, member: Member) -> Option<Map<String, Value>> {
        self.read()
            .get(identity)?
            .get(member.as_str())?
            .as_object()
            .cloned()
    }

    fn set_member_value(
        &self,
        identity: &ResourceKey,
        member: Member,
        key: &str,
        value: Option<Value>,
    ) {
        let mut objects = self.write();
        let Some(object) = objects.get_mut(identity) else {
            return;
        };

        if value.is_some() && !object.get(member.as_str()).is_some_and(Value::is_object) {
            object.insert(member.as_str().to_string(), Value::Object(Map::new()));
        }
        if let Some(Value::Object(map)) = object.get_mut(member.as_str()) {
            match value {
                Some(value) => {
                    map.insert(key.to_string(), value);
                }
                None => {
                    map.remove(key);
                }
            }
        }
    }

    fn identifier(&self, identity: &ResourceKey) -> Option<String> {
        self.read()
            .get(identity)?
            .get("id")?
            .as_str()
            .map(str::to_string)
    }

    fn set_identifier(&self, identity: &ResourceKey, id: Option<String>) {
        let mut objects = self.write();
        let Some(object) = objects.get_mut(identity) else {
            return;
        };
        match id {
            Some(id) => {
                object.insert("id".to_string(), Value::String(id));
            }
            None => {
                object.remove("id");
            }
        }
    }

    fn object(&self, identity: &ResourceKey) -> Option<Map<String, Value>> {
        self.read().get(identity).cloned()
    }

    fn insert_object(&self, identity: ResourceKey, object: Map<String, Value>) {
        self.write().insert(identity, object);
    }

    fn remove_object(&self, identity: &ResourceKey) -> Option<Map<String, Value>> {
        self.write().remove(identity)
    }

    fn merge_object(&self, identity: ResourceKey, object: Map<String, Value>) {
        match self.write().entry(identity) {
            Entry::Occupied(mut stored) => merge_members(stored.get_mut(), object),
            Entry::Vacant(slot) => {
                slot.insert(object);
            }
        }
    }

    fn upsert(&self, resource_type: &str, id: &str, object: Map<String, Value>) -> ResourceKey {
        let mut objects = self.write();
        match find_identity(&objects, resource_type, id) {
            Some(key) => {
                if let Some(stored) = objects.get_mut(&key) {
                    merge_members(stored, object);
                }
                key
            }
            None => {
                let key = ResourceKey::generate();
                objects.insert(key.clone(), object);
                key
            }
        }
    }

    fn find(&self, resource_type: &str, id: &str) -> Option<ResourceKey> {
        find_identity(&self.read(), resource_type, id)
    }

    fn contains(&self, identity: &ResourceKey) -> bool {
        self.read().contains_key(identity)
    }

    fn len(&self) -> usize {
        self.read().len()
    }
}

fn find_identity(objects: &Objects, resource_type: &str, id: &str) -> Option<ResourceKey> {
    objects.iter().find_map(|(key, object)| {
        let matches = object.get("type").and_then(Value::as_str) == Some(resource_type)
            && object.get("id").and_then(Value::as_str) == Some(id);
        matches.then(|| key.clone())
    })
}

/// Statistics about an in-memory store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryStoreStats {
    pub object_count: usize,
    pub identified_count: usize,
    pub attribute_count: usize,
    pub relationship_count: usize,
}
