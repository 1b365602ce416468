//! In-memory repository implementation for testing and development

use crate::core::entity::{Data, EntityId};
use crate::core::error::{CatalogError, CatalogResult};
use crate::core::patch::{self, Patch};
use crate::core::query::Query;
use crate::core::repository::{Guard, Repository};
use crate::core::resolver::Patchable;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

struct StoreState<T> {
    entities: BTreeMap<EntityId, T>,
    last_id: EntityId,
}

/// In-memory repository implementation
///
/// Entities live in an id-ordered map behind an async `RwLock`: reads share
/// the lock, every mutation (including id assignment) holds it exclusively
/// for the whole operation. Clones share the same storage.
pub struct InMemoryRepository<T> {
    state: Arc<RwLock<StoreState<T>>>,
}

impl<T> Clone for InMemoryRepository<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T: Data> InMemoryRepository<T> {
    /// Create an empty store whose first id will be 1
    pub fn new() -> Self {
        Self::with_entities(std::iter::empty(), 0)
    }

    /// Create a store pre-populated with `(id, entity)` pairs
    ///
    /// The id counter starts at the larger of `last_id` and the highest
    /// seeded id, so new entities never collide with seeded ones.
    pub fn with_entities<I>(entities: I, last_id: EntityId) -> Self
    where
        I: IntoIterator<Item = (EntityId, T)>,
    {
        let entities: BTreeMap<EntityId, T> = entities
            .into_iter()
            .map(|(id, mut entity)| {
                entity.set_id(id);
                (id, entity)
            })
            .collect();
        let highest = entities.keys().next_back().copied().unwrap_or(0);

        Self {
            state: Arc::new(RwLock::new(StoreState {
                entities,
                last_id: last_id.max(highest),
            })),
        }
    }

    /// Number of stored entities
    pub async fn len(&self) -> usize {
        self.state.read().await.entities.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.entities.is_empty()
    }

    /// Highest id handed out so far
    pub async fn last_id(&self) -> EntityId {
        self.state.read().await.last_id
    }
}

impl<T: Data> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T> Repository<T> for InMemoryRepository<T>
where
    T: Data + Patchable,
{
    async fn get(&self) -> CatalogResult<Vec<T>> {
        let state = self.state.read().await;

        Ok(state.entities.values().cloned().collect())
    }

    async fn get_by_id(&self, id: EntityId) -> CatalogResult<T> {
        let state = self.state.read().await;

        state
            .entities
            .get(&id)
            .cloned()
            .ok_or_else(|| CatalogError::not_found(T::resource_name(), id))
    }

    async fn search(&self, query: &Query) -> CatalogResult<Vec<T>> {
        let state = self.state.read().await;

        Ok(state
            .entities
            .values()
            .filter(|entity| query.matches(*entity))
            .cloned()
            .collect())
    }

    async fn create(&self, mut entity: T) -> CatalogResult<T> {
        let mut state = self.state.write().await;

        let id = state.last_id.checked_add(1).ok_or_else(|| CatalogError::Internal {
            message: format!("{} id space exhausted", T::resource_name()),
        })?;
        state.last_id = id;
        entity.set_id(id);
        state.entities.insert(id, entity.clone());

        tracing::debug!(resource = T::resource_name(), id, "entity created");
        Ok(entity)
    }

    async fn update_with(
        &self,
        id: EntityId,
        patch: &Patch,
        guard: Guard<'_, T>,
    ) -> CatalogResult<T> {
        let mut state = self.state.write().await;

        let current = state
            .entities
            .get(&id)
            .ok_or_else(|| CatalogError::not_found(T::resource_name(), id))?;
        let candidate = patch::apply(current, patch)?;
        guard(&candidate)?;

        if tracing::enabled!(tracing::Level::DEBUG) {
            let changed = patch::changed_fields(current, &candidate);
            tracing::debug!(resource = T::resource_name(), id, ?changed, "entity patched");
        }

        state.entities.insert(id, candidate.clone());
        Ok(candidate)
    }

    async fn update_or_create(&self, entity: T) -> CatalogResult<T> {
        let id = entity.id();
        if id == 0 {
            return self.create(entity).await;
        }

        let mut state = self.state.write().await;

        let replaced = state.entities.insert(id, entity.clone()).is_some();
        state.last_id = state.last_id.max(id);

        tracing::debug!(resource = T::resource_name(), id, replaced, "entity upserted");
        Ok(entity)
    }

    async fn delete(&self, id: EntityId) -> CatalogResult<()> {
        let mut state = self.state.write().await;

        state
            .entities
            .remove(&id)
            .ok_or_else(|| CatalogError::not_found(T::resource_name(), id))?;

        tracing::debug!(resource = T::resource_name(), id, "entity deleted");
        Ok(())
    }
}
