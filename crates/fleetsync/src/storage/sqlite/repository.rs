//! SQLite store implementation.
//!
//! Implements `Store<T>` from `fleetsync_core::storage` for every entity that
//! describes its table through [`SqlEntity`].

use async_trait::async_trait;
use rusqlite::types::Value;
use rusqlite::Row;
use tokio_rusqlite::Connection;
use uuid::Uuid;

use fleetsync_core::fleet::{
    Driver, Entity, Fleet, NoForeignKey, Route, RouteForeignKey, Vehicle, VehicleForeignKey,
};
use fleetsync_core::storage::{Cascade, RepositoryError, Result, Store};

use super::conversions::{
    format_datetime, row_to_driver, row_to_fleet, row_to_id, row_to_route, row_to_vehicle,
};
use super::error::map_tokio_rusqlite_error;
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

fn text(value: impl ToString) -> Value {
    Value::Text(value.to_string())
}

/// Table statements and row mapping for an entity stored in SQLite.
///
/// `INSERT` binds `insert_params` in order. `UPDATE` binds `update_params`,
/// whose first value is always the row ID.
pub trait SqlEntity: Entity {
    const INSERT: &'static str;
    const SELECT_BY_ID: &'static str;
    const SELECT_ALL: &'static str;
    const UPDATE: &'static str;
    const DELETE: &'static str;
    /// IDs of the vehicles the schema cascade removes with row `?1`.
    const CASCADED_VEHICLE_IDS: Option<&'static str> = None;
    /// IDs of the routes the schema cascade removes with row `?1`.
    const CASCADED_ROUTE_IDS: Option<&'static str> = None;

    fn from_row(row: &Row) -> rusqlite::Result<Self>;

    fn insert_params(&self) -> Vec<Value>;

    fn update_params(&self) -> Vec<Value>;

    /// Query selecting the rows whose `key` column equals `?1`.
    fn select_by_foreign_key(key: Self::ForeignKey) -> &'static str;
}

/// SQLite-based store.
///
/// Provides async access to SQLite storage for all entity types. Foreign keys
/// are enforced and cascade deletes are handled by the schema.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Creates a new store with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new store with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Initialize the database schema.
    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    /// Runs a query returning many rows, bound to a single parameter if given.
    async fn query_rows<T: SqlEntity>(&self, query: &'static str, param: Option<String>) -> Result<Vec<T>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(query).map_err(wrap_err)?;
                let rows = stmt
                    .query_map(rusqlite::params_from_iter(param), T::from_row)
                    .map_err(wrap_err)?;

                let mut entities = Vec::new();
                for row_result in rows {
                    entities.push(row_result.map_err(wrap_err)?);
                }
                Ok(entities)
            })
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    /// Executes a write and reads the row back in the same connection call.
    async fn write_and_select<T: SqlEntity>(
        &self,
        statement: &'static str,
        params: Vec<Value>,
        id: Uuid,
    ) -> Result<T> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(statement, rusqlite::params_from_iter(params))
                    .map_err(wrap_err)?;
                if rows == 0 {
                    return Err(wrap_err(rusqlite::Error::QueryReturnedNoRows));
                }
                conn.query_row(T::SELECT_BY_ID, [&id_str], T::from_row)
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, T::ENTITY_TYPE, id.to_string()))
    }
}

#[async_trait]
impl<T: SqlEntity> Store<T> for SqliteStore {
    async fn insert(&self, entity: &T) -> Result<T> {
        self.write_and_select(T::INSERT, entity.insert_params(), entity.id())
            .await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(T::SELECT_BY_ID).map_err(wrap_err)?;
                match stmt.query_row([&id_str], T::from_row) {
                    Ok(entity) => Ok(Some(entity)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, T::ENTITY_TYPE, id.to_string()))
    }

    async fn find_all(&self) -> Result<Vec<T>> {
        self.query_rows(T::SELECT_ALL, None).await
    }

    async fn find_by_foreign_key(&self, key: T::ForeignKey, parent_id: Uuid) -> Result<Vec<T>> {
        self.query_rows(T::select_by_foreign_key(key), Some(parent_id.to_string()))
            .await
    }

    async fn update(&self, entity: &T) -> Result<T> {
        self.write_and_select(T::UPDATE, entity.update_params(), entity.id())
            .await
    }

    async fn delete(&self, id: Uuid) -> Result<Cascade> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;
                let cascade = Cascade {
                    vehicles: select_ids(&tx, T::CASCADED_VEHICLE_IDS, &id_str)?,
                    routes: select_ids(&tx, T::CASCADED_ROUTE_IDS, &id_str)?,
                };

                let rows = tx.execute(T::DELETE, [&id_str]).map_err(wrap_err)?;
                if rows == 0 {
                    return Err(wrap_err(rusqlite::Error::QueryReturnedNoRows));
                }
                tx.commit().map_err(wrap_err)?;
                Ok(cascade)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, T::ENTITY_TYPE, id.to_string()))
    }
}

// ============================================================================
// Table descriptions
// ============================================================================

impl SqlEntity for Fleet {
    const INSERT: &'static str = schema::INSERT_FLEET;
    const SELECT_BY_ID: &'static str = schema::SELECT_FLEET_BY_ID;
    const SELECT_ALL: &'static str = schema::SELECT_ALL_FLEETS;
    const UPDATE: &'static str = schema::UPDATE_FLEET;
    const DELETE: &'static str = schema::DELETE_FLEET;
    const CASCADED_VEHICLE_IDS: Option<&'static str> = Some(schema::SELECT_VEHICLE_IDS_BY_FLEET);
    const CASCADED_ROUTE_IDS: Option<&'static str> = Some(schema::SELECT_ROUTE_IDS_BY_FLEET);

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        row_to_fleet(row)
    }

    fn insert_params(&self) -> Vec<Value> {
        vec![
            text(self.id),
            text(&self.name),
            text(&self.info),
            text(&self.phone),
            text(format_datetime(&self.created_at)),
        ]
    }

    fn update_params(&self) -> Vec<Value> {
        vec![
            text(self.id),
            text(&self.name),
            text(&self.info),
            text(&self.phone),
        ]
    }

    fn select_by_foreign_key(key: NoForeignKey) -> &'static str {
        match key {}
    }}

impl SqlEntity for Vehicle {
    const INSERT: &'static str = schema::INSERT_VEHICLE;
    const SELECT_BY_ID: &'static str = schema::SELECT_VEHICLE_BY_ID;
    const SELECT_ALL: &'static str = schema::SELECT_ALL_VEHICLES;
    const UPDATE: &'static str = schema::UPDATE_VEHICLE;
    const DELETE: &'static str = schema::DELETE_VEHICLE;
    const CASCADED_ROUTE_IDS: Option<&'static str> = Some(schema::SELECT_ROUTE_IDS_BY_VEHICLE);

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        row_to_vehicle(row)
    }

    fn insert_params(&self) -> Vec<Value> {
        vec![
            text(self.id),
            text(self.fleet_id),
            text(&self.brand),
            text(&self.plate_number),
            text(format_datetime(&self.created_at)),
        ]
    }

    fn update_params(&self) -> Vec<Value> {
        vec![text(self.id), text(&self.brand), text(&self.plate_number)]
    }

    fn select_by_foreign_key(key: VehicleForeignKey) -> &'static str {
        match key {
            VehicleForeignKey::Fleet => schema::SELECT_VEHICLES_BY_FLEET,
        }
    }
}

impl SqlEntity for Driver {
    const INSERT: &'static str = schema::INSERT_DRIVER;
    const SELECT_BY_ID: &'static str = schema::SELECT_DRIVER_BY_ID;
    const SELECT_ALL: &'static str = schema::SELECT_ALL_DRIVERS;
    const UPDATE: &'static str = schema::UPDATE_DRIVER;
    const DELETE: &'static str = schema::DELETE_DRIVER;
    const CASCADED_ROUTE_IDS: Option<&'static str> = Some(schema::SELECT_ROUTE_IDS_BY_DRIVER);

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        row_to_driver(row)
    }

    fn insert_params(&self) -> Vec<Value> {
        vec![
            text(self.id),
            text(&self.name),
            text(&self.phone),
            text(format_datetime(&self.created_at)),
        ]
    }

    fn update_params(&self) -> Vec<Value> {
        vec![text(self.id), text(&self.name), text(&self.phone)]
    }

    fn select_by_foreign_key(key: NoForeignKey) -> &'static str {
        match key {}
    }
}

impl SqlEntity for Route {
    const INSERT: &'static str = schema::INSERT_ROUTE;
    const SELECT_BY_ID: &'static str = schema::SELECT_ROUTE_BY_ID;
    const SELECT_ALL: &'static str = schema::SELECT_ALL_ROUTES;
    const UPDATE: &'static str = schema::UPDATE_ROUTE;
    const DELETE: &'static str = schema::DELETE_ROUTE;

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        row_to_route(row)
    }

    fn insert_params(&self) -> Vec<Value> {
        vec![
            text(self.id),
            text(self.driver_id),
            text(self.vehicle_id),
            text(&self.name),
            text(&self.info),
            deadline_value(self),
            text(format_datetime(&self.created_at)),
        ]
    }

    fn update_params(&self) -> Vec<Value> {
        vec![
            text(self.id),
            text(&self.name),
            text(&self.info),
            deadline_value(self),
        ]
    }

    fn select_by_foreign_key(key: RouteForeignKey) -> &'static str {
        match key {
            RouteForeignKey::Driver => schema::SELECT_ROUTES_BY_DRIVER,
            RouteForeignKey::Vehicle => schema::SELECT_ROUTES_BY_VEHICLE,
        }
    }
}

/// Runs an optional ID lookup bound to `id`. A missing query yields no IDs.
fn select_ids(
    conn: &rusqlite::Connection,
    query: Option<&'static str>,
    id: &str,
) -> std::result::Result<Vec<Uuid>, tokio_rusqlite::Error> {
    let Some(query) = query else {
        return Ok(Vec::new());
    };

    let mut stmt = conn.prepare(query).map_err(wrap_err)?;
    let ids = stmt.query_map([id], row_to_id).map_err(wrap_err)?;
    ids.collect::<rusqlite::Result<Vec<_>>>().map_err(wrap_err)
}

fn deadline_value(route: &Route) -> Value {
    route
        .deadline
        .as_ref()
        .map_or(Value::Null, |deadline| text(format_datetime(deadline)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    async fn seeded() -> (SqliteStore, Fleet, Vehicle, Driver, Route) {
        let store = SqliteStore::new_in_memory().await.unwrap();
        let fleet = Fleet::new("Team A", "Night shift", "113");
        let vehicle = Vehicle::new(fleet.id, "Volvo", "ABC-123");
        let driver = Driver::new("Ana", "555-0100");
        let route = Route::new(driver.id, vehicle.id, "Downtown", "Morning loop");

        store.insert(&fleet).await.unwrap();
        store.insert(&vehicle).await.unwrap();
        store.insert(&driver).await.unwrap();
        store.insert(&route).await.unwrap();

        (store, fleet, vehicle, driver, route)
    }

    // ==================== CRUD Tests ====================

    #[tokio::test]
    async fn test_insert_returns_stored_row() {
        let store = SqliteStore::new_in_memory().await.unwrap();
        let fleet = Fleet::new("Team A", "Night shift", "113");

        let stored = store.insert(&fleet).await.unwrap();
        assert_eq!(stored, fleet);

        let found: Option<Fleet> = store.find_by_id(fleet.id).await.unwrap();
        assert_eq!(found, Some(fleet));
    }

    #[tokio::test]
    async fn test_find_missing_returns_none() {
        let store = SqliteStore::new_in_memory().await.unwrap();
        let found: Option<Vehicle> = store.find_by_id(Uuid::new_v4()).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_find_all_preserves_insertion_order() {
        let store = SqliteStore::new_in_memory().await.unwrap();
        let names = ["Zulu", "Alpha", "Mike"];
        for (i, name) in names.iter().enumerate() {
            store
                .insert(&Driver::new(*name, format!("555-{i}")))
                .await
                .unwrap();
        }

        let drivers: Vec<Driver> = store.find_all().await.unwrap();
        let found: Vec<&str> = drivers.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(found, names);
    }

    #[tokio::test]
    async fn test_route_deadline_is_persisted() {
        let (store, _, vehicle, driver, _) = seeded().await;
        let deadline = Utc.with_ymd_and_hms(2024, 6, 16, 8, 0, 0).unwrap();
        let route = Route::new(driver.id, vehicle.id, "Airport", "").with_deadline(deadline);

        let stored = store.insert(&route).await.unwrap();
        assert_eq!(stored.deadline, Some(deadline));
    }

    #[tokio::test]
    async fn test_update_replaces_row() {
        let (store, _, _, _, mut route) = seeded().await;
        route.name = "Uptown".to_string();
        route.deadline = Some(Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap());

        let stored = store.update(&route).await.unwrap();
        assert_eq!(stored, route);
    }

    #[tokio::test]
    async fn test_update_clears_route_deadline() {
        let (store, _, vehicle, driver, _) = seeded().await;
        let deadline = Utc.with_ymd_and_hms(2024, 6, 16, 8, 0, 0).unwrap();
        let mut route = Route::new(driver.id, vehicle.id, "Airport", "").with_deadline(deadline);
        store.insert(&route).await.unwrap();

        route.deadline = None;
        let stored = store.update(&route).await.unwrap();
        assert_eq!(stored.deadline, None);
    }

    #[tokio::test]
    async fn test_update_missing_returns_not_found() {
        let store = SqliteStore::new_in_memory().await.unwrap();
        let driver = Driver::new("Ana", "555");

        let result = store.update(&driver).await;
        assert_eq!(result, Err(RepositoryError::not_found("Driver", driver.id)));
    }

    #[tokio::test]
    async fn test_delete_missing_returns_not_found() {
        let store = SqliteStore::new_in_memory().await.unwrap();
        let id = Uuid::new_v4();
        let result = Store::<Fleet>::delete(&store, id).await;
        assert_eq!(result, Err(RepositoryError::not_found("Fleet", id)));
    }

    #[tokio::test]
    async fn test_find_by_foreign_key() {
        let (store, fleet, vehicle, _, route) = seeded().await;
        let other_fleet = Fleet::new("Team B", "", "114");
        store.insert(&other_fleet).await.unwrap();
        store
            .insert(&Vehicle::new(other_fleet.id, "MAN", "XYZ-789"))
            .await
            .unwrap();

        let vehicles: Vec<Vehicle> = store
            .find_by_foreign_key(VehicleForeignKey::Fleet, fleet.id)
            .await
            .unwrap();
        assert_eq!(vehicles, vec![vehicle.clone()]);

        let routes: Vec<Route> = store
            .find_by_foreign_key(RouteForeignKey::Vehicle, vehicle.id)
            .await
            .unwrap();
        assert_eq!(routes, vec![route]);
    }

    // ==================== Constraint Tests ====================

    #[tokio::test]
    async fn test_duplicate_driver_phone_is_rejected() {
        let (store, ..) = seeded().await;

        let result = store.insert(&Driver::new("Bea", "555-0100")).await;
        assert!(matches!(
            result,
            Err(RepositoryError::ConstraintViolation {
                entity_type: "Driver",
                ..
            })
        ));

        let drivers: Vec<Driver> = store.find_all().await.unwrap();
        assert_eq!(drivers.len(), 1);
    }

    #[tokio::test]
    async fn test_update_into_taken_fleet_name_is_rejected() {
        let (store, ..) = seeded().await;
        let mut other = Fleet::new("Team B", "", "114");
        store.insert(&other).await.unwrap();

        other.name = "Team A".to_string();
        let result = store.update(&other).await;
        assert!(matches!(
            result,
            Err(RepositoryError::ConstraintViolation { .. })
        ));
    }

    #[tokio::test]
    async fn test_vehicle_requires_existing_fleet() {
        let store = SqliteStore::new_in_memory().await.unwrap();
        let vehicle = Vehicle::new(Uuid::new_v4(), "Volvo", "ABC-123");

        let result = store.insert(&vehicle).await;
        assert!(matches!(
            result,
            Err(RepositoryError::ConstraintViolation {
                entity_type: "Vehicle",
                ..
            })
        ));
    }

    // ==================== Cascade Tests ====================

    #[tokio::test]
    async fn test_delete_fleet_cascades_to_vehicles_and_routes() {
        let (store, fleet, vehicle, driver, route) = seeded().await;

        let removed = Store::<Fleet>::delete(&store, fleet.id).await.unwrap();
        assert_eq!(removed.vehicles, vec![vehicle.id]);
        assert_eq!(removed.routes, vec![route.id]);

        let vehicles: Vec<Vehicle> = store.find_all().await.unwrap();
        let routes: Vec<Route> = store.find_all().await.unwrap();
        let drivers: Vec<Driver> = store.find_all().await.unwrap();
        assert!(vehicles.is_empty());
        assert!(routes.is_empty());
        assert_eq!(drivers, vec![driver]);
    }

    #[tokio::test]
    async fn test_delete_driver_cascades_to_routes() {
        let (store, _, vehicle, driver, route) = seeded().await;

        let removed = Store::<Driver>::delete(&store, driver.id).await.unwrap();
        assert_eq!(
            removed,
            Cascade {
                vehicles: Vec::new(),
                routes: vec![route.id],
            }
        );

        let routes: Vec<Route> = store.find_all().await.unwrap();
        let vehicles: Vec<Vehicle> = store.find_all().await.unwrap();
        assert!(routes.is_empty());
        assert_eq!(vehicles, vec![vehicle]);
    }

    #[tokio::test]
    async fn test_delete_vehicle_reports_its_routes() {
        let (store, _, vehicle, _, route) = seeded().await;

        let removed = Store::<Vehicle>::delete(&store, vehicle.id).await.unwrap();
        assert!(removed.vehicles.is_empty());
        assert_eq!(removed.routes, vec![route.id]);
    }

    #[tokio::test]
    async fn test_delete_route_reports_no_cascade() {
        let (store, _, _, _, route) = seeded().await;

        let removed = Store::<Route>::delete(&store, route.id).await.unwrap();
        assert!(removed.is_empty());
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_dependents() {
        let (store, fleet, vehicle, ..) = seeded().await;

        let result = Store::<Fleet>::delete(&store, Uuid::new_v4()).await;
        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));

        let vehicles: Vec<Vehicle> = store
            .find_by_foreign_key(VehicleForeignKey::Fleet, fleet.id)
            .await
            .unwrap();
        assert_eq!(vehicles, vec![vehicle]);
    }
}
