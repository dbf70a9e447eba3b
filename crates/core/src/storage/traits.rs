use async_trait::async_trait;
use uuid::Uuid;

use crate::fleet::Entity;

use super::{Cascade, Result};

/// Persistence operations for one entity type.
///
/// Every call is atomic. Implementations enforce the uniqueness and
/// foreign-key constraints of the entity and cascade deletes to dependents.
#[async_trait]
pub trait Store<T: Entity>: Send + Sync {
    /// Inserts a new row and returns it as stored.
    ///
    /// Returns `RepositoryError::ConstraintViolation` if a unique value is
    /// already taken or a referenced parent does not exist.
    async fn insert(&self, entity: &T) -> Result<T>;

    /// Finds a row by ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>>;

    /// Returns every row, in store order.
    async fn find_all(&self) -> Result<Vec<T>>;

    /// Returns the rows whose foreign key `key` references `parent_id`.
    async fn find_by_foreign_key(&self, key: T::ForeignKey, parent_id: Uuid) -> Result<Vec<T>>;

    /// Replaces an existing row and returns it as stored.
    ///
    /// Returns `RepositoryError::NotFound` if the row does not exist.
    async fn update(&self, entity: &T) -> Result<T>;

    /// Deletes a row and every row depending on it, returning the dependents
    /// removed along with it.
    ///
    /// Returns `RepositoryError::NotFound` if the row does not exist.
    async fn delete(&self, id: Uuid) -> Result<Cascade>;
}

/// Entity operations exposed to request handlers.
///
/// The production implementation keeps a cache in front of a [`Store`].
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Persists a newly built entity and returns it.
    async fn create(&self, entity: T) -> Result<T>;

    /// Gets an entity by ID, or `RepositoryError::NotFound`.
    async fn get(&self, id: Uuid) -> Result<T>;

    /// Lists every entity of this type.
    async fn get_all(&self) -> Result<Vec<T>>;

    /// Lists the entities whose foreign key `key` references `parent_id`.
    async fn get_filtered(&self, key: T::ForeignKey, parent_id: Uuid) -> Result<Vec<T>>;

    /// Applies a partial update and returns the entity as stored.
    async fn update(&self, id: Uuid, update: T::Update) -> Result<T>;

    /// Deletes an entity and its dependents.
    async fn delete(&self, id: Uuid) -> Result<()>;
}
