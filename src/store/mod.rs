//! # Store Adapter
//!
//! Collection access by resource kind and id. The HTTP layer treats the
//! store as an external collaborator providing select/insert/replace/
//! remove; `MemoryStore` is the in-process implementation.

mod errors;
mod memory;

pub use errors::{StoreError, StoreResult};
pub use memory::MemoryStore;

use serde_json::Value;

use crate::model::{EntityId, ResourceKind};

/// Store adapter contract
pub trait Store: Send + Sync {
    /// All entities of the kind, ordered by id.
    fn select_all(&self, kind: ResourceKind) -> StoreResult<Vec<Value>>;

    /// The single entity with that id.
    fn select(&self, kind: ResourceKind, id: EntityId) -> StoreResult<Value>;

    /// Assign a fresh unique id, write it into the document, store it,
    /// and return the id.
    fn insert(&self, kind: ResourceKind, entity: Value) -> StoreResult<EntityId>;

    /// Overwrite the entity's fields in place. The id is preserved.
    fn replace(&self, kind: ResourceKind, id: EntityId, fields: Value) -> StoreResult<()>;

    /// Delete the entity.
    fn remove(&self, kind: ResourceKind, id: EntityId) -> StoreResult<()>;
}
