use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        drivers::{create_driver, delete_driver, get_driver, list_drivers, update_driver},
        fleets::{create_fleet, delete_fleet, get_fleet, list_fleets, update_fleet},
        health::{healthz, livez},
        routes::{create_route, delete_route, get_route, list_routes, update_route},
        vehicles::{
            create_vehicle, delete_vehicle, get_vehicle, list_fleet_vehicles, list_vehicles,
            update_vehicle,
        },
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    // API routes with CORS
    let api_routes = Router::new()
        // Fleet routes
        .route("/fleets", get(list_fleets).post(create_fleet))
        .route(
            "/fleets/{id}",
            get(get_fleet).put(update_fleet).delete(delete_fleet),
        )
        // Vehicle routes
        .route("/vehicles", get(list_vehicles).post(create_vehicle))
        .route("/vehicles/fleet/{fleet_id}", get(list_fleet_vehicles))
        .route(
            "/vehicles/{id}",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
        // Driver routes
        .route("/drivers", get(list_drivers).post(create_driver))
        .route(
            "/drivers/{id}",
            get(get_driver).put(update_driver).delete(delete_driver),
        )
        // Route routes
        .route("/routes", get(list_routes).post(create_route))
        .route(
            "/routes/{id}",
            get(get_route).put(update_route).delete(delete_route),
        )
        .layer(cors);

    // Main application router
    Router::new()
        .route("/livez", get(livez))
        .route("/healthz", get(healthz))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}
