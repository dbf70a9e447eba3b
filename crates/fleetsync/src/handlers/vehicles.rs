//! Vehicle CRUD handlers.
//!
//! Vehicles belong to a fleet. Creating one under a missing fleet, or listing
//! a missing fleet's vehicles, returns 404.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use fleetsync_core::fleet::{CreateVehicleRequest, UpdateVehicleRequest, Vehicle, VehicleForeignKey};

use crate::{handlers::AppError, state::AppState};

/// Query parameters for creating a vehicle.
#[derive(Debug, Deserialize)]
pub struct VehicleParentQuery {
    /// Owning fleet (required)
    pub fleet_id: Uuid,
}

/// List all vehicles (GET /api/vehicles).
pub async fn list_vehicles(State(state): State<AppState>) -> Result<Json<Vec<Vehicle>>, AppError> {
    Ok(Json(state.vehicles.get_all().await?))
}

/// List the vehicles of one fleet (GET /api/vehicles/fleet/{fleet_id}).
pub async fn list_fleet_vehicles(
    State(state): State<AppState>,
    Path(fleet_id): Path<Uuid>,
) -> Result<Json<Vec<Vehicle>>, AppError> {
    state.fleets.get(fleet_id).await?;

    let vehicles = state
        .vehicles
        .get_filtered(VehicleForeignKey::Fleet, fleet_id)
        .await?;

    Ok(Json(vehicles))
}

/// Create a new vehicle (POST /api/vehicles?fleet_id=).
pub async fn create_vehicle(
    State(state): State<AppState>,
    Query(query): Query<VehicleParentQuery>,
    Json(payload): Json<CreateVehicleRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.fleets.get(query.fleet_id).await?;

    let vehicle = state
        .vehicles
        .create(payload.into_vehicle(query.fleet_id))
        .await?;

    tracing::info!(
        vehicle_id = %vehicle.id,
        fleet_id = %vehicle.fleet_id,
        plate_number = %vehicle.plate_number,
        "Created new vehicle"
    );

    Ok((StatusCode::CREATED, Json(vehicle)))
}

/// Get a single vehicle by ID (GET /api/vehicles/{id}).
pub async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vehicle>, AppError> {
    Ok(Json(state.vehicles.get(id).await?))
}

/// Update a vehicle by ID (PUT /api/vehicles/{id}).
pub async fn update_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateVehicleRequest>,
) -> Result<Json<Vehicle>, AppError> {
    let vehicle = state.vehicles.update(id, payload).await?;

    tracing::info!(vehicle_id = %id, "Updated vehicle");

    Ok(Json(vehicle))
}

/// Delete a vehicle by ID (DELETE /api/vehicles/{id}).
pub async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.vehicles.delete(id).await?;

    tracing::info!(vehicle_id = %id, "Deleted vehicle and its routes");

    Ok(StatusCode::NO_CONTENT)
}
