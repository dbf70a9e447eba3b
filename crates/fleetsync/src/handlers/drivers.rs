//! Driver CRUD handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use fleetsync_core::fleet::{CreateDriverRequest, Driver, UpdateDriverRequest};

use crate::{handlers::AppError, state::AppState};

/// List all drivers (GET /api/drivers).
pub async fn list_drivers(State(state): State<AppState>) -> Result<Json<Vec<Driver>>, AppError> {
    Ok(Json(state.drivers.get_all().await?))
}

/// Create a new driver (POST /api/drivers).
pub async fn create_driver(
    State(state): State<AppState>,
    Json(payload): Json<CreateDriverRequest>,
) -> Result<impl IntoResponse, AppError> {
    let driver = state.drivers.create(payload.into_driver()).await?;

    tracing::info!(driver_id = %driver.id, name = %driver.name, "Created new driver");

    Ok((StatusCode::CREATED, Json(driver)))
}

/// Get a single driver by ID (GET /api/drivers/{id}).
pub async fn get_driver(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Driver>, AppError> {
    Ok(Json(state.drivers.get(id).await?))
}

/// Update a driver by ID (PUT /api/drivers/{id}).
pub async fn update_driver(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateDriverRequest>,
) -> Result<Json<Driver>, AppError> {
    let driver = state.drivers.update(id, payload).await?;

    tracing::info!(driver_id = %id, "Updated driver");

    Ok(Json(driver))
}

/// Delete a driver by ID (DELETE /api/drivers/{id}).
pub async fn delete_driver(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.drivers.delete(id).await?;

    tracing::info!(driver_id = %id, "Deleted driver and their routes");

    Ok(StatusCode::NO_CONTENT)
}
