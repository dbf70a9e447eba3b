pub mod drivers;
pub mod error;
pub mod fleets;
pub mod health;
pub mod routes;
pub mod vehicles;

pub use error::AppError;
