//! SQLite schema definitions and SQL query constants.
//!
//! This module contains all SQL statements used by the SQLite store,
//! following the Functional Core pattern - pure data, no I/O.

/// SQL statement to create all tables.
///
/// `foreign_keys` is a per-connection setting and must be on for the
/// cascade rules to fire.
pub const CREATE_TABLES: &str = r#"
PRAGMA foreign_keys = ON;

-- Fleets table
CREATE TABLE IF NOT EXISTS fleets (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    info TEXT NOT NULL,
    phone TEXT NOT NULL UNIQUE,
    created_at TEXT NOT NULL
);

-- Vehicles table
CREATE TABLE IF NOT EXISTS vehicles (
    id TEXT PRIMARY KEY,
    fleet_id TEXT NOT NULL,
    brand TEXT NOT NULL,
    plate_number TEXT NOT NULL UNIQUE,
    created_at TEXT NOT NULL,
    FOREIGN KEY (fleet_id) REFERENCES fleets(id) ON DELETE CASCADE
);

-- Drivers table
CREATE TABLE IF NOT EXISTS drivers (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    phone TEXT NOT NULL UNIQUE,
    created_at TEXT NOT NULL
);

-- Routes table
CREATE TABLE IF NOT EXISTS routes (
    id TEXT PRIMARY KEY,
    driver_id TEXT NOT NULL,
    vehicle_id TEXT NOT NULL,
    name TEXT NOT NULL,
    info TEXT NOT NULL,
    deadline TEXT,
    created_at TEXT NOT NULL,
    FOREIGN KEY (driver_id) REFERENCES drivers(id) ON DELETE CASCADE,
    FOREIGN KEY (vehicle_id) REFERENCES vehicles(id) ON DELETE CASCADE
);

-- Indexes for foreign key lookups and cascades
CREATE INDEX IF NOT EXISTS idx_vehicles_fleet_id ON vehicles(fleet_id);
CREATE INDEX IF NOT EXISTS idx_routes_driver_id ON routes(driver_id);
CREATE INDEX IF NOT EXISTS idx_routes_vehicle_id ON routes(vehicle_id);
"#;

// Fleet queries
pub const INSERT_FLEET: &str = r#"
INSERT INTO fleets (id, name, info, phone, created_at)
VALUES (?1, ?2, ?3, ?4, ?5)
"#;

pub const SELECT_FLEET_BY_ID: &str = r#"
SELECT id, name, info, phone, created_at
FROM fleets
WHERE id = ?1
"#;

pub const SELECT_ALL_FLEETS: &str = r#"
SELECT id, name, info, phone, created_at
FROM fleets
ORDER BY rowid
"#;

pub const UPDATE_FLEET: &str = r#"
UPDATE fleets
SET name = ?2, info = ?3, phone = ?4
WHERE id = ?1
"#;

pub const DELETE_FLEET: &str = "DELETE FROM fleets WHERE id = ?1";

// Vehicle queries
pub const INSERT_VEHICLE: &str = r#"
INSERT INTO vehicles (id, fleet_id, brand, plate_number, created_at)
VALUES (?1, ?2, ?3, ?4, ?5)
"#;

pub const SELECT_VEHICLE_BY_ID: &str = r#"
SELECT id, fleet_id, brand, plate_number, created_at
FROM vehicles
WHERE id = ?1
"#;

pub const SELECT_ALL_VEHICLES: &str = r#"
SELECT id, fleet_id, brand, plate_number, created_at
FROM vehicles
ORDER BY rowid
"#;

pub const SELECT_VEHICLES_BY_FLEET: &str = r#"
SELECT id, fleet_id, brand, plate_number, created_at
FROM vehicles
WHERE fleet_id = ?1
ORDER BY rowid
"#;

pub const UPDATE_VEHICLE: &str = r#"
UPDATE vehicles
SET brand = ?2, plate_number = ?3
WHERE id = ?1
"#;

pub const DELETE_VEHICLE: &str = "DELETE FROM vehicles WHERE id = ?1";

// Driver queries
pub const INSERT_DRIVER: &str = r#"
INSERT INTO drivers (id, name, phone, created_at)
VALUES (?1, ?2, ?3, ?4)
"#;

pub const SELECT_DRIVER_BY_ID: &str = r#"
SELECT id, name, phone, created_at
FROM drivers
WHERE id = ?1
"#;

pub const SELECT_ALL_DRIVERS: &str = r#"
SELECT id, name, phone, created_at
FROM drivers
ORDER BY rowid
"#;

pub const UPDATE_DRIVER: &str = r#"
UPDATE drivers
SET name = ?2, phone = ?3
WHERE id = ?1
"#;

pub const DELETE_DRIVER: &str = "DELETE FROM drivers WHERE id = ?1";

// Route queries
pub const INSERT_ROUTE: &str = r#"
INSERT INTO routes (id, driver_id, vehicle_id, name, info, deadline, created_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
"#;

pub const SELECT_ROUTE_BY_ID: &str = r#"
SELECT id, driver_id, vehicle_id, name, info, deadline, created_at
FROM routes
WHERE id = ?1
"#;

pub const SELECT_ALL_ROUTES: &str = r#"
SELECT id, driver_id, vehicle_id, name, info, deadline, created_at
FROM routes
ORDER BY rowid
"#;

pub const SELECT_ROUTES_BY_DRIVER: &str = r#"
SELECT id, driver_id, vehicle_id, name, info, deadline, created_at
FROM routes
WHERE driver_id = ?1
ORDER BY rowid
"#;

pub const SELECT_ROUTES_BY_VEHICLE: &str = r#"
SELECT id, driver_id, vehicle_id, name, info, deadline, created_at
FROM routes
WHERE vehicle_id = ?1
ORDER BY rowid
"#;

pub const UPDATE_ROUTE: &str = r#"
UPDATE routes
SET name = ?2, info = ?3, deadline = ?4
WHERE id = ?1
"#;

pub const DELETE_ROUTE: &str = "DELETE FROM routes WHERE id = ?1";

// Cascade lookups, run before a delete to learn which dependents go with it
pub const SELECT_VEHICLE_IDS_BY_FLEET: &str = r#"
SELECT id
FROM vehicles
WHERE fleet_id = ?1
ORDER BY rowid
"#;

pub const SELECT_ROUTE_IDS_BY_FLEET: &str = r#"
SELECT routes.id
FROM routes
JOIN vehicles ON vehicles.id = routes.vehicle_id
WHERE vehicles.fleet_id = ?1
ORDER BY routes.rowid
"#;

pub const SELECT_ROUTE_IDS_BY_VEHICLE: &str = r#"
SELECT id
FROM routes
WHERE vehicle_id = ?1
ORDER BY rowid
"#;

pub const SELECT_ROUTE_IDS_BY_DRIVER: &str = r#"
SELECT id
FROM routes
WHERE driver_id = ?1
ORDER BY rowid
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tables_is_valid_sql() {
        // Verify the SQL contains expected table names
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS fleets"));
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS vehicles"));
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS drivers"));
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS routes"));
    }

    #[test]
    fn test_schema_enables_cascades() {
        assert!(CREATE_TABLES.contains("PRAGMA foreign_keys = ON"));
        assert_eq!(CREATE_TABLES.matches("ON DELETE CASCADE").count(), 3);
    }

    #[test]
    fn test_queries_contain_expected_keywords() {
        assert!(INSERT_FLEET.contains("INSERT"));
        assert!(SELECT_FLEET_BY_ID.contains("WHERE id = ?1"));
        assert!(UPDATE_FLEET.contains("UPDATE"));
        assert!(DELETE_FLEET.contains("DELETE"));

        assert!(SELECT_VEHICLES_BY_FLEET.contains("fleet_id = ?1"));
        assert!(SELECT_ROUTES_BY_DRIVER.contains("driver_id = ?1"));
        assert!(SELECT_ROUTES_BY_VEHICLE.contains("vehicle_id = ?1"));
    }

    #[test]
    fn test_list_queries_keep_insertion_order() {
        for query in [
            SELECT_ALL_FLEETS,
            SELECT_ALL_VEHICLES,
            SELECT_ALL_DRIVERS,
            SELECT_ALL_ROUTES,
            SELECT_VEHICLES_BY_FLEET,
            SELECT_ROUTES_BY_DRIVER,
            SELECT_ROUTES_BY_VEHICLE,
            SELECT_VEHICLE_IDS_BY_FLEET,
            SELECT_ROUTE_IDS_BY_FLEET,
            SELECT_ROUTE_IDS_BY_VEHICLE,
            SELECT_ROUTE_IDS_BY_DRIVER,
        ] {
            assert!(query.contains("rowid"));
        }
    }
}
