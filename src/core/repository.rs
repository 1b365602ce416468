//! Repository trait: the capability set every storage backend provides

use crate::core::entity::{Data, EntityId};
use crate::core::error::{CatalogResult, Violation};
use crate::core::patch::Patch;
use crate::core::query::Query;
use crate::core::resolver::Patchable;
use async_trait::async_trait;

/// Check run on a merged candidate before an update is committed
pub type Guard<'a, T> = &'a (dyn Fn(&T) -> Result<(), Violation> + Send + Sync);

/// Repository trait for catalog entities
///
/// Implementations provide CRUD and search for a specific entity type. The
/// core is agnostic to the underlying storage mechanism; decorators such as
/// [`ValidatingRepository`](crate::storage::ValidatingRepository) wrap any
/// implementation.
#[async_trait]
pub trait Repository<T>: Send + Sync
where
    T: Data + Patchable,
{
    /// List all entities in ascending id order
    async fn get(&self) -> CatalogResult<Vec<T>>;

    /// Get an entity by ID
    async fn get_by_id(&self, id: EntityId) -> CatalogResult<T>;

    /// List the entities matching every filter set on `query`
    async fn search(&self, query: &Query) -> CatalogResult<Vec<T>>;

    /// Persist a new entity under a fresh id, ignoring any id it carries
    async fn create(&self, entity: T) -> CatalogResult<T>;

    /// Merge `patch` into the stored entity and persist the result
    async fn update(&self, id: EntityId, patch: &Patch) -> CatalogResult<T> {
        let accept = |_: &T| -> Result<(), Violation> { Ok(()) };
        self.update_with(id, patch, &accept).await
    }

    /// Like [`update`](Repository::update), running `guard` on the merged
    /// candidate inside the same critical section as the commit.
    ///
    /// A guard rejection leaves the stored entity untouched.
    async fn update_with(
        &self,
        id: EntityId,
        patch: &Patch,
        guard: Guard<'_, T>,
    ) -> CatalogResult<T>;

    /// Replace the entity stored under `entity.id()`, or insert it under that id
    async fn update_or_create(&self, entity: T) -> CatalogResult<T>;

    /// Delete an entity
    async fn delete(&self, id: EntityId) -> CatalogResult<()>;
}
