use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A company operating a set of vehicles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fleet {
    pub id: Uuid,
    pub name: String,
    pub info: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
}

impl Fleet {
    /// Creates a new fleet with a fresh ID and the current timestamp.
    pub fn new(name: impl Into<String>, info: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            info: info.into(),
            phone: phone.into(),
            created_at: Utc::now(),
        }
    }

    /// Sets a specific ID for this fleet (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}

/// A vehicle owned by exactly one fleet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: Uuid,
    /// Owning fleet. Set at creation and never changed.
    pub fleet_id: Uuid,
    pub brand: String,
    pub plate_number: String,
    pub created_at: DateTime<Utc>,
}

impl Vehicle {
    /// Creates a new vehicle in the given fleet.
    pub fn new(
        fleet_id: Uuid,
        brand: impl Into<String>,
        plate_number: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            fleet_id,
            brand: brand.into(),
            plate_number: plate_number.into(),
            created_at: Utc::now(),
        }
    }

    /// Sets a specific ID for this vehicle (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Driver {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
}

impl Driver {
    /// Creates a new driver with a fresh ID and the current timestamp.
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            phone: phone.into(),
            created_at: Utc::now(),
        }
    }

    /// Sets a specific ID for this driver (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}

/// A route assigned to a driver and driven with a vehicle.
///
/// The driver and vehicle references are fixed when the route is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub id: Uuid,
    pub driver_id: Uuid,
    pub vehicle_id: Uuid,
    pub name: String,
    pub info: String,
    /// Optional time by which the route must be completed.
    pub deadline: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Route {
    /// Creates a new route for a driver and vehicle.
    pub fn new(
        driver_id: Uuid,
        vehicle_id: Uuid,
        name: impl Into<String>,
        info: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            driver_id,
            vehicle_id,
            name: name.into(),
            info: info.into(),
            deadline: None,
            created_at: Utc::now(),
        }
    }

    /// Sets the deadline for this route.
    pub fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets a specific ID for this route (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}
