//! In-memory migration backend.
//!
//! Implements the full REST surface the dashboard consumes — inventory
//! collections, configuration singletons, computed reports and exports —
//! against plain in-memory tables. Used for local development and by the
//! dashboard's end-to-end tests, which mount [`create_router`] on an
//! ephemeral port.

pub mod exporter;
pub mod handlers;
pub mod planner;
pub mod routes;
pub mod state;
pub mod store;

use axum::middleware;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use common::middleware::request_id::request_id_middleware;

pub use state::AppState;

/// Builds the complete application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::router())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
