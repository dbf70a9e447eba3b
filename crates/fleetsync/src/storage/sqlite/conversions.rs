//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.
//! These are testable in isolation without database access.

use chrono::{DateTime, Utc};
use rusqlite::Row;
use uuid::Uuid;

use fleetsync_core::fleet::{Driver, Fleet, Route, Vehicle};

/// Convert a SQLite row to a Fleet.
///
/// Expected columns: id, name, info, phone, created_at
pub fn row_to_fleet(row: &Row) -> rusqlite::Result<Fleet> {
    let id: String = row.get(0)?;
    let created_at: String = row.get(4)?;

    Ok(Fleet {
        id: parse_uuid(&id)?,
        name: row.get(1)?,
        info: row.get(2)?,
        phone: row.get(3)?,
        created_at: parse_datetime(&created_at)?,
    })
}

/// Convert a SQLite row to a Vehicle.
///
/// Expected columns: id, fleet_id, brand, plate_number, created_at
pub fn row_to_vehicle(row: &Row) -> rusqlite::Result<Vehicle> {
    let id: String = row.get(0)?;
    let fleet_id: String = row.get(1)?;
    let created_at: String = row.get(4)?;

    Ok(Vehicle {
        id: parse_uuid(&id)?,
        fleet_id: parse_uuid(&fleet_id)?,
        brand: row.get(2)?,
        plate_number: row.get(3)?,
        created_at: parse_datetime(&created_at)?,
    })
}

/// Convert a SQLite row to a Driver.
///
/// Expected columns: id, name, phone, created_at
pub fn row_to_driver(row: &Row) -> rusqlite::Result<Driver> {
    let id: String = row.get(0)?;
    let created_at: String = row.get(3)?;

    Ok(Driver {
        id: parse_uuid(&id)?,
        name: row.get(1)?,
        phone: row.get(2)?,
        created_at: parse_datetime(&created_at)?,
    })
}

/// Convert a SQLite row to a Route.
///
/// Expected columns: id, driver_id, vehicle_id, name, info, deadline, created_at
pub fn row_to_route(row: &Row) -> rusqlite::Result<Route> {
    let id: String = row.get(0)?;
    let driver_id: String = row.get(1)?;
    let vehicle_id: String = row.get(2)?;
    let deadline: Option<String> = row.get(5)?;
    let created_at: String = row.get(6)?;

    Ok(Route {
        id: parse_uuid(&id)?,
        driver_id: parse_uuid(&driver_id)?,
        vehicle_id: parse_uuid(&vehicle_id)?,
        name: row.get(3)?,
        info: row.get(4)?,
        deadline: deadline.as_deref().map(parse_datetime).transpose()?,
        created_at: parse_datetime(&created_at)?,
    })
}

/// Convert a single-column `id` row to a UUID.
pub fn row_to_id(row: &Row) -> rusqlite::Result<Uuid> {
    parse_uuid(&row.get::<_, String>(0)?)
}

// ============================================================================
// Helper functions
// ============================================================================

/// Parse a UUID from string.
fn parse_uuid(s: &str) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(s).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Parse a datetime from RFC 3339 string.
fn parse_datetime(s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })
}

/// Format a DateTime<Utc> for SQLite storage (RFC 3339).
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_format_datetime() {
        let dt = DateTime::parse_from_rfc3339("2024-06-15T10:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let formatted = format_datetime(&dt);
        assert!(formatted.starts_with("2024-06-15"));
        assert!(formatted.contains("10:30:00"));
    }

    #[test]
    fn test_parse_uuid_valid() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let result = parse_uuid(uuid_str);
        assert_eq!(result.unwrap().to_string(), uuid_str);
    }

    #[test]
    fn test_parse_uuid_invalid() {
        assert!(parse_uuid("not-a-uuid").is_err());
    }

    #[test]
    fn test_parse_datetime_normalizes_offset() {
        let parsed = parse_datetime("2024-06-15T12:30:00+02:00").unwrap();
        assert_eq!(format_datetime(&parsed), "2024-06-15T10:30:00+00:00");
    }

    #[test]
    fn test_parse_datetime_invalid() {
        assert!(parse_datetime("not-a-datetime").is_err());
    }

    #[test]
    fn test_row_to_route_with_and_without_deadline() {
        let conn = Connection::open_in_memory().unwrap();
        let driver_id = Uuid::new_v4();
        let vehicle_id = Uuid::new_v4();

        let select = |deadline: Option<&str>| {
            conn.query_row(
                "SELECT ?1, ?2, ?3, 'Downtown', '', ?4, '2024-06-15T10:30:00Z'",
                rusqlite::params![
                    Uuid::nil().to_string(),
                    driver_id.to_string(),
                    vehicle_id.to_string(),
                    deadline
                ],
                row_to_route,
            )
        };

        let open = select(None).unwrap();
        assert_eq!(open.deadline, None);
        assert_eq!(open.driver_id, driver_id);
        assert_eq!(open.vehicle_id, vehicle_id);

        let due = select(Some("2024-06-16T08:00:00Z")).unwrap();
        assert_eq!(
            due.deadline.map(|d| format_datetime(&d)),
            Some("2024-06-16T08:00:00+00:00".to_string())
        );
    }

    #[test]
    fn test_row_to_fleet_rejects_bad_uuid() {
        let conn = Connection::open_in_memory().unwrap();
        let result = conn.query_row(
            "SELECT 'nope', 'Team A', '', '113', '2024-06-15T10:30:00Z'",
            [],
            row_to_fleet,
        );
        assert!(result.is_err());
    }
}
