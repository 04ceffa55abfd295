use async_trait::async_trait;
use uuid::Uuid;

use crate::tracking::errors::StoreError;

/// Generic persistence facade for tracking entities.
///
/// Pure pass-through plumbing: one facade per entity, no business rules.
/// `save` inserts or updates by id.
#[async_trait]
pub trait EntityStore<T>: Send + Sync + 'static {
    /// Retrieve all entities.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_all(&self) -> Result<Vec<T>, StoreError>;

    /// Retrieve an entity by identifier.
    ///
    /// # Returns
    /// Optional entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, StoreError>;

    /// Persist an entity, inserting or updating by id.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn save(&self, entity: T) -> Result<T, StoreError>;

    /// Remove an entity.
    ///
    /// # Errors
    /// * `NotFound` - Entity does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError>;
}
