mod error;
mod invalidation;
mod keys;
mod serialization;
mod traits;
mod views;

pub use error::{CacheError, Result};
pub use invalidation::{create_invalidations, delete_invalidations, update_invalidations};
pub use keys::{
    driver_key, fleet_key, item_key, route_key, vehicle_key, vehicles_in_fleet_key, DRIVERS_KEY,
    FLEETS_KEY, ROUTES_KEY, VEHICLES_KEY,
};
pub use serialization::{
    deserialize_collection, deserialize_entity, serialize_collection, serialize_entity,
    SerializationError,
};
pub use traits::Cache;
pub use views::CollectionView;
