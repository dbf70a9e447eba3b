mod entity;
mod error;
mod operations;
mod requests;
mod types;

pub use entity::{Entity, NoForeignKey, RouteForeignKey, VehicleForeignKey};
pub use error::ValidationError;
pub use operations::{validate_driver, validate_fleet, validate_route, validate_vehicle};
pub use requests::{
    CreateDriverRequest, CreateFleetRequest, CreateRouteRequest, CreateVehicleRequest,
    UpdateDriverRequest, UpdateFleetRequest, UpdateRouteRequest, UpdateVehicleRequest,
};
pub use types::{Driver, Fleet, Route, Vehicle};
