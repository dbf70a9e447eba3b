//! Generic cached repository.
//!
//! Wraps a `Store<T>` with a read-through, write-invalidate cache.

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use fleetsync_core::cache::{
    create_invalidations, delete_invalidations, deserialize_collection, deserialize_entity,
    item_key, serialize_collection, serialize_entity, update_invalidations, Cache,
};
use fleetsync_core::fleet::Entity;
use fleetsync_core::storage::{RepositoryError, Repository, Result, Store};

/// Cached repository decorator.
///
/// Implements the cache-aside pattern:
/// - **Reads**: Check cache first, on miss fetch from the store and populate cache
/// - **Writes**: Persist to the store, then delete every cache entry the write
///   could have changed. Writes never populate the cache.
///
/// Cache failures never fail an operation. Reads fall back to the store and
/// failed invalidations are logged and skipped.
///
/// # Type Parameters
///
/// * `T` - The entity type
/// * `S` - The underlying store implementation
/// * `C` - The cache implementation
pub struct CachedRepository<T, S, C>
where
    T: Entity,
    S: Store<T>,
    C: Cache,
{
    store: Arc<S>,
    cache: Arc<C>,
    ttl: Duration,
    _entity: PhantomData<fn() -> T>,
}

impl<T, S, C> CachedRepository<T, S, C>
where
    T: Entity,
    S: Store<T>,
    C: Cache,
{
    /// Creates a new cached repository.
    ///
    /// # Arguments
    ///
    /// * `store` - The underlying store to cache
    /// * `cache` - The cache implementation
    /// * `ttl` - Time-to-live for every entry this repository writes
    pub fn new(store: Arc<S>, cache: Arc<C>, ttl: Duration) -> Self {
        Self {
            store,
            cache,
            ttl,
            _entity: PhantomData,
        }
    }

    /// Writes `bytes` under `key`, logging a failure instead of returning it.
    async fn populate(&self, key: &str, bytes: Vec<u8>) {
        if let Err(err) = self.cache.set(key, &bytes, Some(self.ttl)).await {
            tracing::warn!(
                entity = T::ENTITY_TYPE,
                key,
                error = %err,
                "Failed to populate cache"
            );
        }
    }

    /// Serves a list from `key`, or loads it with `load` and caches it.
    async fn read_collection<F>(&self, key: String, load: F) -> Result<Vec<T>>
    where
        F: Future<Output = Result<Vec<T>>> + Send,
    {
        match self.cache.get(&key).await {
            Ok(Some(bytes)) => match deserialize_collection::<T>(&bytes) {
                Ok(entities) => {
                    tracing::trace!(entity = T::ENTITY_TYPE, key = %key, "Cache hit for collection");
                    return Ok(entities);
                }
                // Deserialization failed - treat as cache miss
                Err(err) => tracing::warn!(
                    entity = T::ENTITY_TYPE,
                    key = %key,
                    error = %err,
                    "Cache collection deserialization failed"
                ),
            },
            Ok(None) => {}
            Err(err) => tracing::warn!(
                entity = T::ENTITY_TYPE,
                key = %key,
                error = %err,
                unavailable = err.is_unavailable(),
                "Cache read failed, falling back to store"
            ),
        }

        // Cache miss - fetch from store
        tracing::trace!(entity = T::ENTITY_TYPE, key = %key, "Cache miss for collection");
        let entities = load.await?;

        match serialize_collection(&entities) {
            Ok(bytes) => self.populate(&key, bytes).await,
            Err(err) => tracing::warn!(key = %key, error = %err, "Failed to serialize collection"),
        }

        Ok(entities)
    }

    /// Deletes every key in `keys`. A failed delete is logged and skipped.
    async fn invalidate(&self, keys: Vec<String>) {
        for key in keys {
            if let Err(err) = self.cache.delete(&key).await {
                tracing::warn!(
                    entity = T::ENTITY_TYPE,
                    key = %key,
                    error = %err,
                    "Failed to invalidate cache"
                );
            }
        }
    }
}

#[async_trait]
impl<T, S, C> Repository<T> for CachedRepository<T, S, C>
where
    T: Entity,
    S: Store<T> + 'static,
    C: Cache + 'static,
{
    async fn create(&self, entity: T) -> Result<T> {
        entity.validate()?;

        // 1. Persist to storage
        let created = self.store.insert(&entity).await?;

        // 2. Invalidate the collections that now include it
        self.invalidate(create_invalidations(&created)).await;

        tracing::debug!(entity = T::ENTITY_TYPE, id = %created.id(), "Entity created");
        Ok(created)
    }

    async fn get(&self, id: Uuid) -> Result<T> {
        let cache_key = item_key(T::KEY_PREFIX, id);

        // Check cache first
        match self.cache.get(&cache_key).await {
            Ok(Some(bytes)) => match deserialize_entity::<T>(&bytes) {
                Ok(entity) => {
                    tracing::trace!(entity = T::ENTITY_TYPE, id = %id, "Cache hit");
                    return Ok(entity);
                }
                // Deserialization failed - treat as cache miss
                Err(err) => tracing::warn!(
                    entity = T::ENTITY_TYPE,
                    id = %id,
                    error = %err,
                    "Cache entity deserialization failed"
                ),
            },
            Ok(None) => {}
            Err(err) => tracing::warn!(
                entity = T::ENTITY_TYPE,
                id = %id,
                error = %err,
                unavailable = err.is_unavailable(),
                "Cache read failed, falling back to store"
            ),
        }

        // Cache miss - fetch from store. Absent rows are not cached.
        tracing::trace!(entity = T::ENTITY_TYPE, id = %id, "Cache miss");
        let entity = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found(T::ENTITY_TYPE, id))?;

        match serialize_entity(&entity) {
            Ok(bytes) => self.populate(&cache_key, bytes).await,
            Err(err) => tracing::warn!(id = %id, error = %err, "Failed to serialize entity"),
        }

        Ok(entity)
    }

    async fn get_all(&self) -> Result<Vec<T>> {
        self.read_collection(T::ALL.key(), self.store.find_all())
            .await
    }

    async fn get_filtered(&self, key: T::ForeignKey, parent_id: Uuid) -> Result<Vec<T>> {
        match T::filtered_view(key, parent_id) {
            Some(view) => {
                self.read_collection(view.key(), self.store.find_by_foreign_key(key, parent_id))
                    .await
            }
            None => self.store.find_by_foreign_key(key, parent_id).await,
        }
    }

    async fn update(&self, id: Uuid, update: T::Update) -> Result<T> {
        // 1. Load through the cache; the pre-update entity decides which views to drop
        let before = self.get(id).await?;
        let mut entity = before.clone();
        entity.apply_update(update);
        entity.validate()?;

        // 2. Persist to storage
        let stored = self.store.update(&entity).await?;

        // 3. Invalidate cache (will be repopulated on next read)
        self.invalidate(update_invalidations(&before)).await;

        tracing::debug!(entity = T::ENTITY_TYPE, id = %id, "Entity updated");
        Ok(stored)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        // 1. Load first to learn which views the entity and its cascade touch
        let entity = self.get(id).await?;

        // 2. Persist deletion to storage; the store reports what its cascade removed
        let cascade = self.store.delete(id).await?;

        // 3. Invalidate item, collections, cascaded views and cascaded items
        self.invalidate(delete_invalidations(&entity, &cascade)).await;

        tracing::debug!(
            entity = T::ENTITY_TYPE,
            id = %id,
            cascaded_vehicles = cascade.vehicles.len(),
            cascaded_routes = cascade.routes.len(),
            "Entity deleted"
        );
        Ok(())
    }
}
