//! Fleet CRUD handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use fleetsync_core::fleet::{CreateFleetRequest, Fleet, UpdateFleetRequest};

use crate::{handlers::AppError, state::AppState};

/// List all fleets (GET /api/fleets).
pub async fn list_fleets(State(state): State<AppState>) -> Result<Json<Vec<Fleet>>, AppError> {
    Ok(Json(state.fleets.get_all().await?))
}

/// Create a new fleet (POST /api/fleets).
pub async fn create_fleet(
    State(state): State<AppState>,
    Json(payload): Json<CreateFleetRequest>,
) -> Result<impl IntoResponse, AppError> {
    let fleet = state.fleets.create(payload.into_fleet()).await?;

    tracing::info!(fleet_id = %fleet.id, name = %fleet.name, "Created new fleet");

    Ok((StatusCode::CREATED, Json(fleet)))
}

/// Get a single fleet by ID (GET /api/fleets/{id}).
pub async fn get_fleet(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Fleet>, AppError> {
    Ok(Json(state.fleets.get(id).await?))
}

/// Update a fleet by ID (PUT /api/fleets/{id}).
pub async fn update_fleet(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateFleetRequest>,
) -> Result<Json<Fleet>, AppError> {
    let fleet = state.fleets.update(id, payload).await?;

    tracing::info!(fleet_id = %id, "Updated fleet");

    Ok(Json(fleet))
}

/// Delete a fleet by ID (DELETE /api/fleets/{id}).
///
/// The store also deletes the fleet's vehicles and their routes.
pub async fn delete_fleet(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.fleets.delete(id).await?;

    tracing::info!(fleet_id = %id, "Deleted fleet and its vehicles");

    Ok(StatusCode::NO_CONTENT)
}
