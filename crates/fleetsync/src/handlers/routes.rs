//! Route CRUD handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use fleetsync_core::fleet::{CreateRouteRequest, Route, RouteForeignKey, UpdateRouteRequest};

use crate::{handlers::AppError, state::AppState};

/// Query parameters for creating a route.
#[derive(Debug, Deserialize)]
pub struct RouteParentQuery {
    pub driver_id: Uuid,
    pub vehicle_id: Uuid,
}

/// Optional filters for listing routes. `driver_id` wins if both are given.
#[derive(Debug, Default, Deserialize)]
pub struct ListRoutesQuery {
    pub driver_id: Option<Uuid>,
    pub vehicle_id: Option<Uuid>,
}

/// List routes (GET /api/routes), optionally by driver or vehicle.
pub async fn list_routes(
    State(state): State<AppState>,
    Query(query): Query<ListRoutesQuery>,
) -> Result<Json<Vec<Route>>, AppError> {
    let routes = match (query.driver_id, query.vehicle_id) {
        (Some(driver_id), _) => {
            state.drivers.get(driver_id).await?;
            state
                .routes
                .get_filtered(RouteForeignKey::Driver, driver_id)
                .await?
        }
        (None, Some(vehicle_id)) => {
            state.vehicles.get(vehicle_id).await?;
            state
                .routes
                .get_filtered(RouteForeignKey::Vehicle, vehicle_id)
                .await?
        }
        (None, None) => state.routes.get_all().await?,
    };

    Ok(Json(routes))
}

/// Create a new route (POST /api/routes?driver_id=&vehicle_id=).
pub async fn create_route(
    State(state): State<AppState>,
    Query(query): Query<RouteParentQuery>,
    Json(payload): Json<CreateRouteRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.drivers.get(query.driver_id).await?;
    state.vehicles.get(query.vehicle_id).await?;

    let route = state
        .routes
        .create(payload.into_route(query.driver_id, query.vehicle_id))
        .await?;

    tracing::info!(route_id = %route.id, name = %route.name, "Created new route");

    Ok((StatusCode::CREATED, Json(route)))
}

/// Get a single route by ID (GET /api/routes/{id}).
pub async fn get_route(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Route>, AppError> {
    Ok(Json(state.routes.get(id).await?))
}

/// Update a route by ID (PUT /api/routes/{id}).
pub async fn update_route(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRouteRequest>,
) -> Result<Json<Route>, AppError> {
    let route = state.routes.update(id, payload).await?;

    tracing::info!(route_id = %id, "Updated route");

    Ok(Json(route))
}

/// Delete a route by ID (DELETE /api/routes/{id}).
pub async fn delete_route(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.routes.delete(id).await?;

    tracing::info!(route_id = %id, "Deleted route");

    Ok(StatusCode::NO_CONTENT)
}
