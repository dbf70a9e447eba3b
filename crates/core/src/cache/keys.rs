use uuid::Uuid;

/// Cache key of the full fleet collection.
pub const FLEETS_KEY: &str = "fleets";
/// Cache key of the full vehicle collection.
pub const VEHICLES_KEY: &str = "vehicles";
/// Cache key of the full driver collection.
pub const DRIVERS_KEY: &str = "drivers";
/// Cache key of the full route collection.
pub const ROUTES_KEY: &str = "routes";

/// Returns the item cache key for an entity of the given type prefix.
///
/// # Examples
///
/// ```
/// use fleetsync_core::cache::item_key;
/// use uuid::Uuid;
///
/// assert_eq!(
///     item_key("fleet", Uuid::nil()),
///     "fleet_00000000-0000-0000-0000-000000000000"
/// );
/// ```
pub fn item_key(prefix: &str, id: Uuid) -> String {
    format!("{}_{}", prefix, id)
}

/// Returns the cache key for a single fleet.
pub fn fleet_key(fleet_id: Uuid) -> String {
    item_key("fleet", fleet_id)
}

/// Returns the cache key for a single vehicle.
pub fn vehicle_key(vehicle_id: Uuid) -> String {
    item_key("vehicle", vehicle_id)
}

/// Returns the cache key for a single driver.
pub fn driver_key(driver_id: Uuid) -> String {
    item_key("driver", driver_id)
}

/// Returns the cache key for a single route.
pub fn route_key(route_id: Uuid) -> String {
    item_key("route", route_id)
}

/// Returns the cache key for the vehicles owned by a fleet.
///
/// # Examples
///
/// ```
/// use fleetsync_core::cache::vehicles_in_fleet_key;
/// use uuid::Uuid;
///
/// assert_eq!(
///     vehicles_in_fleet_key(Uuid::nil()),
///     "vehicles_in_fleet_00000000-0000-0000-0000-000000000000"
/// );
/// ```
pub fn vehicles_in_fleet_key(fleet_id: Uuid) -> String {
    format!("vehicles_in_fleet_{}", fleet_id)
}
