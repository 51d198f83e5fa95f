//! In-memory store
//!
//! Documents per collection in id order, behind a process-wide lock.
//! Ids are monotonic across both collections, so id order is insertion
//! order.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use serde_json::Value;

use crate::model::{EntityId, ResourceKind, ID_FIELD};

use super::errors::{StoreError, StoreResult};
use super::Store;

type Collections = HashMap<ResourceKind, BTreeMap<EntityId, Value>>;

/// In-memory implementation of the store contract
pub struct MemoryStore {
    collections: RwLock<Collections>,
    next_id: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for MemoryStore {
    fn select_all(&self, kind: ResourceKind) -> StoreResult<Vec<Value>> {
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::internal("lock poisoned"))?;

        Ok(collections
            .get(&kind)
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default())
    }

    fn select(&self, kind: ResourceKind, id: EntityId) -> StoreResult<Value> {
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::internal("lock poisoned"))?;

        collections
            .get(&kind)
            .and_then(|docs| docs.get(&id))
            .cloned()
            .ok_or(StoreError::NotFound { kind, id })
    }

    fn insert(&self, kind: ResourceKind, mut entity: Value) -> StoreResult<EntityId> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);

        let obj = entity
            .as_object_mut()
            .ok_or_else(|| StoreError::internal("entity is not a JSON object"))?;
        obj.insert(ID_FIELD.to_string(), Value::from(id));

        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::internal("lock poisoned"))?;

        collections.entry(kind).or_default().insert(id, entity);

        Ok(id)
    }

    fn replace(&self, kind: ResourceKind, id: EntityId, mut fields: Value) -> StoreResult<()> {
        let obj = fields
            .as_object_mut()
            .ok_or_else(|| StoreError::internal("entity is not a JSON object"))?;
        obj.insert(ID_FIELD.to_string(), Value::from(id));

        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::internal("lock poisoned"))?;

        let docs = collections
            .get_mut(&kind)
            .ok_or(StoreError::NotFound { kind, id })?;

        let doc = docs.get_mut(&id).ok_or(StoreError::NotFound { kind, id })?;
        *doc = fields;

        Ok(())
    }

    fn remove(&self, kind: ResourceKind, id: EntityId) -> StoreResult<()> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::internal("lock poisoned"))?;

        collections
            .get_mut(&kind)
            .and_then(|docs| docs.remove(&id))
            .map(|_| ())
            .ok_or(StoreError::NotFound { kind, id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_assigns_fresh_ids_and_writes_id_field() {
        let store = MemoryStore::new();

        let first = store
            .insert(ResourceKind::Account, json!({"name": "a"}))
            .unwrap();
        let second = store
            .insert(ResourceKind::Tweet, json!({"text": "hi"}))
            .unwrap();

        assert!(second > first);

        let doc = store.select(ResourceKind::Account, first).unwrap();
        assert_eq!(doc["id"], json!(first));
        assert_eq!(doc["name"], "a");
    }

    #[test]
    fn test_insert_rejects_non_object_entities() {
        let store = MemoryStore::new();
        let result = store.insert(ResourceKind::Tweet, json!("not an object"));
        assert!(matches!(result, Err(StoreError::Internal(_))));
    }

    #[test]
    fn test_select_all_is_ordered_by_id() {
        let store = MemoryStore::new();
        for name in ["a", "b", "c"] {
            store
                .insert(ResourceKind::Account, json!({"name": name}))
                .unwrap();
        }

        let all = store.select_all(ResourceKind::Account).unwrap();
        let names: Vec<_> = all.iter().map(|d| d["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_select_all_unknown_kind_is_empty() {
        let store = MemoryStore::new();
        assert!(store.select_all(ResourceKind::Tweet).unwrap().is_empty());
    }

    #[test]
    fn test_select_missing_id_is_not_found() {
        let store = MemoryStore::new();
        let result = store.select(ResourceKind::Tweet, 101);
        assert!(matches!(
            result,
            Err(StoreError::NotFound {
                kind: ResourceKind::Tweet,
                id: 101
            })
        ));
    }

    #[test]
    fn test_replace_overwrites_fields_and_preserves_id() {
        let store = MemoryStore::new();
        let id = store
            .insert(ResourceKind::Tweet, json!({"text": "old", "mood": "calm"}))
            .unwrap();

        store
            .replace(ResourceKind::Tweet, id, json!({"text": "new"}))
            .unwrap();

        let doc = store.select(ResourceKind::Tweet, id).unwrap();
        assert_eq!(doc["id"], json!(id));
        assert_eq!(doc["text"], "new");
        assert!(doc.get("mood").is_none());
    }

    #[test]
    fn test_replace_missing_id_is_not_found() {
        let store = MemoryStore::new();
        let result = store.replace(ResourceKind::Account, 5, json!({}));
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }

    #[test]
    fn test_remove_then_select_is_not_found() {
        let store = MemoryStore::new();
        let id = store
            .insert(ResourceKind::Tweet, json!({"text": "gone"}))
            .unwrap();

        store.remove(ResourceKind::Tweet, id).unwrap();

        assert!(matches!(
            store.select(ResourceKind::Tweet, id),
            Err(StoreError::NotFound { .. })
        ));
        assert!(matches!(
            store.remove(ResourceKind::Tweet, id),
            Err(StoreError::NotFound { .. })
        ));
    }
}
