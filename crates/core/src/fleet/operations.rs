use super::error::ValidationError;
use super::types::{Driver, Fleet, Route, Vehicle};

const MAX_NAME_LEN: usize = 100;
const MAX_PHONE_LEN: usize = 32;
const MAX_PLATE_LEN: usize = 32;

/// Validates a fleet before creation or update.
pub fn validate_fleet(fleet: &Fleet) -> Result<(), ValidationError> {
    require_text("Fleet name", &fleet.name, MAX_NAME_LEN)?;
    require_text("Phone number", &fleet.phone, MAX_PHONE_LEN)
}

/// Validates a vehicle before creation or update.
pub fn validate_vehicle(vehicle: &Vehicle) -> Result<(), ValidationError> {
    require_text("Vehicle brand", &vehicle.brand, MAX_NAME_LEN)?;
    require_text("Plate number", &vehicle.plate_number, MAX_PLATE_LEN)
}

/// Validates a driver before creation or update.
pub fn validate_driver(driver: &Driver) -> Result<(), ValidationError> {
    require_text("Driver name", &driver.name, MAX_NAME_LEN)?;
    require_text("Phone number", &driver.phone, MAX_PHONE_LEN)
}

/// Validates a route before creation or update.
pub fn validate_route(route: &Route) -> Result<(), ValidationError> {
    require_text("Route name", &route.name, MAX_NAME_LEN)
}

fn require_text(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}
