use axum::{http::StatusCode, middleware, routing::get, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::discovery::MovieDiscovery,
};

pub mod genres;
pub mod movies;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub discovery: Arc<MovieDiscovery>,
}

impl AppState {
    pub fn new(discovery: MovieDiscovery) -> Self {
        Self {
            discovery: Arc::new(discovery),
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
}

/// API routes under /api
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/movies/random", get(movies::random))
        .route("/movies/random-streaming", get(movies::random_streaming))
        .route("/genres", get(genres::list))
        .route("/streaming-services", get(genres::streaming_services))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
