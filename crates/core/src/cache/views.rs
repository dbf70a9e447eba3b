//! Named collection views and the keys they are cached under.

use uuid::Uuid;

use super::keys::{vehicles_in_fleet_key, DRIVERS_KEY, FLEETS_KEY, ROUTES_KEY, VEHICLES_KEY};

/// A cached list of entities.
///
/// Every collection the service caches is one of these variants, so the set
/// of keys a write can affect is closed and can be computed up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionView {
    Fleets,
    Vehicles,
    Drivers,
    Routes,
    /// Vehicles owned by one fleet.
    VehiclesInFleet(Uuid),
}

impl CollectionView {
    /// Returns the cache key this view is stored under.
    pub fn key(&self) -> String {
        match self {
            CollectionView::Fleets => FLEETS_KEY.to_string(),
            CollectionView::Vehicles => VEHICLES_KEY.to_string(),
            CollectionView::Drivers => DRIVERS_KEY.to_string(),
            CollectionView::Routes => ROUTES_KEY.to_string(),
            CollectionView::VehiclesInFleet(fleet_id) => vehicles_in_fleet_key(*fleet_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_keys() {
        let fleet_id = Uuid::nil();

        assert_eq!(CollectionView::Fleets.key(), "fleets");
        assert_eq!(CollectionView::Vehicles.key(), "vehicles");
        assert_eq!(CollectionView::Drivers.key(), "drivers");
        assert_eq!(CollectionView::Routes.key(), "routes");
        assert_eq!(
            CollectionView::VehiclesInFleet(fleet_id).key(),
            "vehicles_in_fleet_00000000-0000-0000-0000-000000000000"
        );
    }
}
