//! In-memory store implementation.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use fleetsync_core::fleet::{Driver, Entity, Fleet, Route, Vehicle};
use fleetsync_core::storage::{Cascade, RepositoryError, Result, Store};

/// The four entity tables, each kept in insertion order.
#[derive(Debug, Default)]
pub struct Tables {
    fleets: Vec<Fleet>,
    vehicles: Vec<Vehicle>,
    drivers: Vec<Driver>,
    routes: Vec<Route>,
}

/// Table access and relational rules for an entity kept in [`Tables`].
pub trait InMemoryEntity: Entity {
    fn rows(tables: &Tables) -> &Vec<Self>;

    fn rows_mut(tables: &mut Tables) -> &mut Vec<Self>;

    /// Fails with `ConstraintViolation` if a referenced parent is missing.
    fn check_references(&self, _tables: &Tables) -> Result<()> {
        Ok(())
    }

    /// Removes every row that depends on the deleted row `id`, recording the
    /// removed IDs in `removed`.
    fn cascade(_id: Uuid, _tables: &mut Tables, _removed: &mut Cascade) {}
}

/// In-memory storage backend.
///
/// Data is not persisted and will be lost when the store is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Fails if another row already holds one of `entity`'s unique values.
fn check_unique<T: Entity>(rows: &[T], entity: &T) -> Result<()> {
    for (field, value) in entity.unique_fields() {
        let taken = rows
            .iter()
            .filter(|row| row.id() != entity.id())
            .any(|row| {
                row.unique_fields()
                    .iter()
                    .any(|(other_field, other)| *other_field == field && *other == value)
            });

        if taken {
            return Err(RepositoryError::constraint(
                T::ENTITY_TYPE,
                format!("{field} already in use: {value}"),
            ));
        }
    }
    Ok(())
}

fn missing_parent(entity_type: &'static str, parent: &str, id: Uuid) -> RepositoryError {
    RepositoryError::constraint(entity_type, format!("{parent} does not exist: {id}"))
}

#[async_trait]
impl<T: InMemoryEntity> Store<T> for InMemoryStore {
    async fn insert(&self, entity: &T) -> Result<T> {
        let mut tables = self.tables.write().await;

        if T::rows(&tables).iter().any(|row| row.id() == entity.id()) {
            return Err(RepositoryError::constraint(
                T::ENTITY_TYPE,
                format!("id already in use: {}", entity.id()),
            ));
        }
        check_unique(T::rows(&tables), entity)?;
        entity.check_references(&tables)?;

        T::rows_mut(&mut tables).push(entity.clone());
        Ok(entity.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>> {
        let tables = self.tables.read().await;
        Ok(T::rows(&tables).iter().find(|row| row.id() == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<T>> {
        let tables = self.tables.read().await;
        Ok(T::rows(&tables).clone())
    }

    async fn find_by_foreign_key(&self, key: T::ForeignKey, parent_id: Uuid) -> Result<Vec<T>> {
        let tables = self.tables.read().await;
        Ok(T::rows(&tables)
            .iter()
            .filter(|row| row.foreign_key(key) == parent_id)
            .cloned()
            .collect())
    }

    async fn update(&self, entity: &T) -> Result<T> {
        let mut tables = self.tables.write().await;

        let Some(position) = T::rows(&tables)
            .iter()
            .position(|row| row.id() == entity.id())
        else {
            return Err(RepositoryError::not_found(T::ENTITY_TYPE, entity.id()));
        };
        check_unique(T::rows(&tables), entity)?;

        T::rows_mut(&mut tables)[position] = entity.clone();
        Ok(entity.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<Cascade> {
        let mut tables = self.tables.write().await;

        let rows = T::rows_mut(&mut tables);
        let Some(position) = rows.iter().position(|row| row.id() == id) else {
            return Err(RepositoryError::not_found(T::ENTITY_TYPE, id));
        };
        rows.remove(position);

        let mut removed = Cascade::default();
        T::cascade(id, &mut tables, &mut removed);
        Ok(removed)
    }
}

// ============================================================================
// Relational rules
// ============================================================================

fn remove_routes(tables: &mut Tables, removed: &mut Cascade, matches: impl Fn(&Route) -> bool) {
    tables.routes.retain(|route| {
        if matches(route) {
            removed.routes.push(route.id);
            return false;
        }
        true
    });
}

impl InMemoryEntity for Fleet {
    fn rows(tables: &Tables) -> &Vec<Self> {
        &tables.fleets
    }

    fn rows_mut(tables: &mut Tables) -> &mut Vec<Self> {
        &mut tables.fleets
    }

    fn cascade(id: Uuid, tables: &mut Tables, removed: &mut Cascade) {
        let vehicles: Vec<Uuid> = tables
            .vehicles
            .iter()
            .filter(|vehicle| vehicle.fleet_id == id)
            .map(|vehicle| vehicle.id)
            .collect();

        for vehicle_id in vehicles {
            tables.vehicles.retain(|vehicle| vehicle.id != vehicle_id);
            removed.vehicles.push(vehicle_id);
            Vehicle::cascade(vehicle_id, tables, removed);
        }
    }
}

impl InMemoryEntity for Vehicle {
    fn rows(tables: &Tables) -> &Vec<Self> {
        &tables.vehicles
    }

    fn rows_mut(tables: &mut Tables) -> &mut Vec<Self> {
        &mut tables.vehicles
    }

    fn check_references(&self, tables: &Tables) -> Result<()> {
        if !tables.fleets.iter().any(|fleet| fleet.id == self.fleet_id) {
            return Err(missing_parent(Self::ENTITY_TYPE, "Fleet", self.fleet_id));
        }
        Ok(())
    }

    fn cascade(id: Uuid, tables: &mut Tables, removed: &mut Cascade) {
        remove_routes(tables, removed, |route| route.vehicle_id == id);
    }
}

impl InMemoryEntity for Driver {
    fn rows(tables: &Tables) -> &Vec<Self> {
        &tables.drivers
    }

    fn rows_mut(tables: &mut Tables) -> &mut Vec<Self> {
        &mut tables.drivers
    }

    fn cascade(id: Uuid, tables: &mut Tables, removed: &mut Cascade) {
        remove_routes(tables, removed, |route| route.driver_id == id);
    }
}

impl InMemoryEntity for Route {
    fn rows(tables: &Tables) -> &Vec<Self> {
        &tables.routes
    }

    fn rows_mut(tables: &mut Tables) -> &mut Vec<Self> {
        &mut tables.routes
    }

    fn check_references(&self, tables: &Tables) -> Result<()> {
        if !tables.drivers.iter().any(|driver| driver.id == self.driver_id) {
            return Err(missing_parent(Self::ENTITY_TYPE, "Driver", self.driver_id));
        }
        if !tables
            .vehicles
            .iter()
            .any(|vehicle| vehicle.id == self.vehicle_id)
        {
            return Err(missing_parent(Self::ENTITY_TYPE, "Vehicle", self.vehicle_id));
        }
        Ok(())
    }
}
