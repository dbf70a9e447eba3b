//! Per-entity metadata driving the generic storage and caching layers.

use std::fmt::Debug;

use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use super::error::ValidationError;
use super::operations::{validate_driver, validate_fleet, validate_route, validate_vehicle};
use super::requests::{
    UpdateDriverRequest, UpdateFleetRequest, UpdateRouteRequest, UpdateVehicleRequest,
};
use super::types::{Driver, Fleet, Route, Vehicle};
use crate::cache::{item_key, CollectionView};

/// Metadata describing a persisted entity type.
///
/// The cached repository and store implementations are written once against
/// this trait; each entity type only supplies its names, relationships and
/// the views that must be invalidated when it changes.
pub trait Entity: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Foreign keys this entity holds. Uninhabited for entities without parents.
    type ForeignKey: Copy + Debug + Send + Sync + 'static;
    /// Partial update payload accepted by `apply_update`.
    type Update: Send + 'static;

    /// Human-readable type name used in errors and logs.
    const ENTITY_TYPE: &'static str;
    /// Prefix of item cache keys (`<prefix>_<id>`).
    const KEY_PREFIX: &'static str;
    /// View holding every entity of this type.
    const ALL: CollectionView;

    fn id(&self) -> Uuid;

    /// Returns the parent ID referenced through `key`.
    fn foreign_key(&self, key: Self::ForeignKey) -> Uuid;

    /// Values that must be unique across all rows of this type.
    fn unique_fields(&self) -> Vec<(&'static str, &str)>;

    fn apply_update(&mut self, update: Self::Update);

    fn validate(&self) -> Result<(), ValidationError>;

    /// Cached view listing the children of `parent_id` through `key`, if such
    /// a view exists. Views that are not cached are served by the store alone.
    fn filtered_view(key: Self::ForeignKey, parent_id: Uuid) -> Option<CollectionView>;

    /// Filtered views that contain this entity.
    fn member_views(&self) -> Vec<CollectionView> {
        Vec::new()
    }

    /// Views emptied by the store's cascade when this entity is deleted.
    fn cascade_views(&self) -> Vec<CollectionView> {
        Vec::new()
    }

    /// Cache key of this entity's item entry.
    fn item_key(&self) -> String {
        item_key(Self::KEY_PREFIX, self.id())
    }
}

/// Foreign key type for entities that reference no parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoForeignKey {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleForeignKey {
    Fleet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteForeignKey {
    Driver,
    Vehicle,
}

impl Entity for Fleet {
    type ForeignKey = NoForeignKey;
    type Update = UpdateFleetRequest;

    const ENTITY_TYPE: &'static str = "Fleet";
    const KEY_PREFIX: &'static str = "fleet";
    const ALL: CollectionView = CollectionView::Fleets;

    fn id(&self) -> Uuid {
        self.id
    }

    fn foreign_key(&self, key: NoForeignKey) -> Uuid {
        match key {}
    }

    fn unique_fields(&self) -> Vec<(&'static str, &str)> {
        vec![("name", self.name.as_str()), ("phone", self.phone.as_str())]
    }

    fn apply_update(&mut self, update: UpdateFleetRequest) {
        update.apply_to(self);
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validate_fleet(self)
    }

    fn filtered_view(key: NoForeignKey, _parent_id: Uuid) -> Option<CollectionView> {
        match key {}
    }

    fn cascade_views(&self) -> Vec<CollectionView> {
        vec![
            CollectionView::VehiclesInFleet(self.id),
            CollectionView::Vehicles,
            CollectionView::Routes,
        ]
    }
}

impl Entity for Vehicle {
    type ForeignKey = VehicleForeignKey;
    type Update = UpdateVehicleRequest;

    const ENTITY_TYPE: &'static str = "Vehicle";
    const KEY_PREFIX: &'static str = "vehicle";
    const ALL: CollectionView = CollectionView::Vehicles;

    fn id(&self) -> Uuid {
        self.id
    }

    fn foreign_key(&self, key: VehicleForeignKey) -> Uuid {
        match key {
            VehicleForeignKey::Fleet => self.fleet_id,
        }
    }

    fn unique_fields(&self) -> Vec<(&'static str, &str)> {
        vec![("plate_number", self.plate_number.as_str())]
    }

    fn apply_update(&mut self, update: UpdateVehicleRequest) {
        update.apply_to(self);
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validate_vehicle(self)
    }

    fn filtered_view(key: VehicleForeignKey, parent_id: Uuid) -> Option<CollectionView> {
        match key {
            VehicleForeignKey::Fleet => Some(CollectionView::VehiclesInFleet(parent_id)),
        }
    }

    fn member_views(&self) -> Vec<CollectionView> {
        vec![CollectionView::VehiclesInFleet(self.fleet_id)]
    }

    fn cascade_views(&self) -> Vec<CollectionView> {
        vec![CollectionView::Routes]
    }
}

impl Entity for Driver {
    type ForeignKey = NoForeignKey;
    type Update = UpdateDriverRequest;

    const ENTITY_TYPE: &'static str = "Driver";
    const KEY_PREFIX: &'static str = "driver";
    const ALL: CollectionView = CollectionView::Drivers;

    fn id(&self) -> Uuid {
        self.id
    }

    fn foreign_key(&self, key: NoForeignKey) -> Uuid {
        match key {}
    }

    fn unique_fields(&self) -> Vec<(&'static str, &str)> {
        vec![("phone", self.phone.as_str())]
    }

    fn apply_update(&mut self, update: UpdateDriverRequest) {
        update.apply_to(self);
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validate_driver(self)
    }

    fn filtered_view(key: NoForeignKey, _parent_id: Uuid) -> Option<CollectionView> {
        match key {}
    }

    fn cascade_views(&self) -> Vec<CollectionView> {
        vec![CollectionView::Routes]
    }
}

impl Entity for Route {
    type ForeignKey = RouteForeignKey;
    type Update = UpdateRouteRequest;

    const ENTITY_TYPE: &'static str = "Route";
    const KEY_PREFIX: &'static str = "route";
    const ALL: CollectionView = CollectionView::Routes;

    fn id(&self) -> Uuid {
        self.id
    }

    fn foreign_key(&self, key: RouteForeignKey) -> Uuid {
        match key {
            RouteForeignKey::Driver => self.driver_id,
            RouteForeignKey::Vehicle => self.vehicle_id,
        }
    }

    fn unique_fields(&self) -> Vec<(&'static str, &str)> {
        Vec::new()
    }

    fn apply_update(&mut self, update: UpdateRouteRequest) {
        update.apply_to(self);
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validate_route(self)
    }

    fn filtered_view(_key: RouteForeignKey, _parent_id: Uuid) -> Option<CollectionView> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_keys_use_entity_prefix() {
        let id = Uuid::nil();
        let fleet = Fleet::new("Team A", "", "113").with_id(id);
        let driver = Driver::new("Ana", "555").with_id(id);

        assert_eq!(
            fleet.item_key(),
            "fleet_00000000-0000-0000-0000-000000000000"
        );
        assert_eq!(
            driver.item_key(),
            "driver_00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn test_vehicle_foreign_key_is_owner() {
        let fleet_id = Uuid::new_v4();
        let vehicle = Vehicle::new(fleet_id, "Volvo", "ABC-123");

        assert_eq!(vehicle.foreign_key(VehicleForeignKey::Fleet), fleet_id);
        assert_eq!(
            vehicle.member_views(),
            vec![CollectionView::VehiclesInFleet(fleet_id)]
        );
    }

    #[test]
    fn test_route_foreign_keys() {
        let driver_id = Uuid::new_v4();
        let vehicle_id = Uuid::new_v4();
        let route = Route::new(driver_id, vehicle_id, "Downtown", "");

        assert_eq!(route.foreign_key(RouteForeignKey::Driver), driver_id);
        assert_eq!(route.foreign_key(RouteForeignKey::Vehicle), vehicle_id);
        assert!(Route::filtered_view(RouteForeignKey::Driver, driver_id).is_none());
    }

    #[test]
    fn test_only_vehicles_by_fleet_are_cached_as_a_view() {
        let fleet_id = Uuid::new_v4();
        assert_eq!(
            Vehicle::filtered_view(VehicleForeignKey::Fleet, fleet_id),
            Some(CollectionView::VehiclesInFleet(fleet_id))
        );
    }

    #[test]
    fn test_unique_fields() {
        let fleet = Fleet::new("Team A", "", "113");
        assert_eq!(
            fleet.unique_fields(),
            vec![("name", "Team A"), ("phone", "113")]
        );

        let route = Route::new(Uuid::new_v4(), Uuid::new_v4(), "Downtown", "");
        assert!(route.unique_fields().is_empty());
    }

    #[test]
    fn test_fleet_delete_empties_vehicle_views() {
        let fleet = Fleet::new("Team A", "", "113");
        let views = fleet.cascade_views();

        assert!(views.contains(&CollectionView::VehiclesInFleet(fleet.id)));
        assert!(views.contains(&CollectionView::Vehicles));
        assert!(views.contains(&CollectionView::Routes));
    }

    #[test]
    fn test_apply_update_through_trait() {
        let mut driver = Driver::new("Ana", "555");
        Entity::apply_update(&mut driver, UpdateDriverRequest::new().with_name("Bea"));
        assert_eq!(driver.name, "Bea");
    }
}
