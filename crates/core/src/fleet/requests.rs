use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::types::{Driver, Fleet, Route, Vehicle};
use crate::serde::{deserialize_datetime_patch, deserialize_optional_datetime};

// ============================================================================
// Fleet
// ============================================================================

/// Request payload for creating a new fleet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFleetRequest {
    pub name: String,
    #[serde(default)]
    pub info: String,
    pub phone: String,
}

impl CreateFleetRequest {
    /// Convert into a new fleet with a generated ID and timestamp.
    pub fn into_fleet(self) -> Fleet {
        Fleet::new(self.name, self.info, self.phone)
    }
}

/// Request payload for updating a fleet. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFleetRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl UpdateFleetRequest {
    /// Create an empty update request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fleet name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the fleet info.
    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.info = Some(info.into());
        self
    }

    /// Set the fleet phone number.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Apply updates to an existing fleet.
    pub fn apply_to(self, fleet: &mut Fleet) {
        if let Some(name) = self.name {
            fleet.name = name;
        }
        if let Some(info) = self.info {
            fleet.info = info;
        }
        if let Some(phone) = self.phone {
            fleet.phone = phone;
        }
    }
}

// ============================================================================
// Vehicle
// ============================================================================

/// Request payload for creating a vehicle. The owning fleet is supplied separately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVehicleRequest {
    pub brand: String,
    pub plate_number: String,
}

impl CreateVehicleRequest {
    /// Convert into a new vehicle owned by `fleet_id`.
    pub fn into_vehicle(self, fleet_id: Uuid) -> Vehicle {
        Vehicle::new(fleet_id, self.brand, self.plate_number)
    }
}

/// Request payload for updating a vehicle.
///
/// Ownership is fixed at creation, so the fleet cannot be changed here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateVehicleRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plate_number: Option<String>,
}

impl UpdateVehicleRequest {
    /// Create an empty update request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the vehicle brand.
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Set the plate number.
    pub fn with_plate_number(mut self, plate_number: impl Into<String>) -> Self {
        self.plate_number = Some(plate_number.into());
        self
    }

    /// Apply updates to an existing vehicle.
    pub fn apply_to(self, vehicle: &mut Vehicle) {
        if let Some(brand) = self.brand {
            vehicle.brand = brand;
        }
        if let Some(plate_number) = self.plate_number {
            vehicle.plate_number = plate_number;
        }
    }
}

// ============================================================================
// Driver
// ============================================================================

/// Request payload for creating a new driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDriverRequest {
    pub name: String,
    pub phone: String,
}

impl CreateDriverRequest {
    /// Convert into a new driver with a generated ID and timestamp.
    pub fn into_driver(self) -> Driver {
        Driver::new(self.name, self.phone)
    }
}

/// Request payload for updating a driver.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDriverRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl UpdateDriverRequest {
    /// Create an empty update request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the driver name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the driver phone number.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Apply updates to an existing driver.
    pub fn apply_to(self, driver: &mut Driver) {
        if let Some(name) = self.name {
            driver.name = name;
        }
        if let Some(phone) = self.phone {
            driver.phone = phone;
        }
    }
}

// ============================================================================
// Route
// ============================================================================

/// Request payload for creating a route. Driver and vehicle are supplied separately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRouteRequest {
    pub name: String,
    #[serde(default)]
    pub info: String,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_datetime",
        skip_serializing_if = "Option::is_none"
    )]
    pub deadline: Option<DateTime<Utc>>,
}

impl CreateRouteRequest {
    /// Convert into a new route for the given driver and vehicle.
    pub fn into_route(self, driver_id: Uuid, vehicle_id: Uuid) -> Route {
        let mut route = Route::new(driver_id, vehicle_id, self.name, self.info);
        route.deadline = self.deadline;
        route
    }
}

/// Request payload for updating a route.
///
/// Driver and vehicle assignments are fixed at creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRouteRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    /// `Some(None)` clears the deadline; `null` in JSON does the same.
    #[serde(
        default,
        deserialize_with = "deserialize_datetime_patch",
        skip_serializing_if = "Option::is_none"
    )]
    pub deadline: Option<Option<DateTime<Utc>>>,
}

impl UpdateRouteRequest {
    /// Create an empty update request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the route name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the route info.
    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.info = Some(info.into());
        self
    }

    /// Set the route deadline.
    pub fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(Some(deadline));
        self
    }

    /// Remove the route deadline.
    pub fn clear_deadline(mut self) -> Self {
        self.deadline = Some(None);
        self
    }

    /// Apply updates to an existing route.
    pub fn apply_to(self, route: &mut Route) {
        if let Some(name) = self.name {
            route.name = name;
        }
        if let Some(info) = self.info {
            route.info = info;
        }
        if let Some(deadline) = self.deadline {
            route.deadline = deadline;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_update_fleet_only_touches_present_fields() {
        let mut fleet = Fleet::new("Team A", "Night shift", "113");
        let original = fleet.clone();

        UpdateFleetRequest::new()
            .with_info("Day shift")
            .apply_to(&mut fleet);

        assert_eq!(fleet.info, "Day shift");
        assert_eq!(fleet.name, original.name);
        assert_eq!(fleet.phone, original.phone);
        assert_eq!(fleet.id, original.id);
        assert_eq!(fleet.created_at, original.created_at);
    }

    #[test]
    fn test_update_fleet_deserialize_keeps_empty_name() {
        let update: UpdateFleetRequest =
            serde_json::from_str(r#"{"name": "", "phone": "114"}"#).unwrap();

        // Blank values are kept so validation can reject them
        assert_eq!(update.name, Some(String::new()));
        assert_eq!(update.phone, Some("114".to_string()));
        assert_eq!(update.info, None);
    }

    #[test]
    fn test_create_vehicle_sets_owner() {
        let fleet_id = Uuid::new_v4();
        let vehicle = CreateVehicleRequest {
            brand: "Volvo".to_string(),
            plate_number: "ABC-123".to_string(),
        }
        .into_vehicle(fleet_id);

        assert_eq!(vehicle.fleet_id, fleet_id);
        assert_eq!(vehicle.plate_number, "ABC-123");
    }

    #[test]
    fn test_update_vehicle_keeps_owner() {
        let fleet_id = Uuid::new_v4();
        let mut vehicle = Vehicle::new(fleet_id, "Volvo", "ABC-123");

        UpdateVehicleRequest::new()
            .with_brand("Scania")
            .with_plate_number("XYZ-789")
            .apply_to(&mut vehicle);

        assert_eq!(vehicle.brand, "Scania");
        assert_eq!(vehicle.plate_number, "XYZ-789");
        assert_eq!(vehicle.fleet_id, fleet_id);
    }

    #[test]
    fn test_create_route_from_json_with_deadline() {
        let request: CreateRouteRequest = serde_json::from_str(
            r#"{"name": "Downtown", "deadline": "2024-06-15T10:30:00Z"}"#,
        )
        .unwrap();
        let driver_id = Uuid::new_v4();
        let vehicle_id = Uuid::new_v4();

        let route = request.into_route(driver_id, vehicle_id);

        assert_eq!(route.driver_id, driver_id);
        assert_eq!(route.vehicle_id, vehicle_id);
        assert_eq!(route.info, "");
        assert_eq!(
            route.deadline,
            Some(Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_update_route_sets_deadline() {
        let mut route = Route::new(Uuid::new_v4(), Uuid::new_v4(), "Downtown", "");
        let deadline = Utc.with_ymd_and_hms(2024, 7, 1, 8, 0, 0).unwrap();

        UpdateRouteRequest::new()
            .with_deadline(deadline)
            .apply_to(&mut route);

        assert_eq!(route.deadline, Some(deadline));
        assert_eq!(route.name, "Downtown");
    }

    #[test]
    fn test_update_route_clears_deadline() {
        let deadline = Utc.with_ymd_and_hms(2024, 7, 1, 8, 0, 0).unwrap();
        let mut route =
            Route::new(Uuid::new_v4(), Uuid::new_v4(), "Downtown", "").with_deadline(deadline);

        UpdateRouteRequest::new()
            .clear_deadline()
            .apply_to(&mut route);

        assert_eq!(route.deadline, None);
    }

    #[test]
    fn test_update_route_deadline_from_json() {
        let deadline = Utc.with_ymd_and_hms(2024, 7, 1, 8, 0, 0).unwrap();
        let mut route =
            Route::new(Uuid::new_v4(), Uuid::new_v4(), "Downtown", "").with_deadline(deadline);

        // Absent deadline leaves it alone
        let update: UpdateRouteRequest = serde_json::from_str(r#"{"info": "Late"}"#).unwrap();
        update.apply_to(&mut route);
        assert_eq!(route.deadline, Some(deadline));

        let update: UpdateRouteRequest = serde_json::from_str(r#"{"deadline": null}"#).unwrap();
        update.apply_to(&mut route);
        assert_eq!(route.deadline, None);
    }
}
