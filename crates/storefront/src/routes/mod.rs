//! HTTP route handlers for the storefront API.

pub mod auth;
pub mod cart;
pub mod products;

use axum::{Json, Router, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

/// Build the storefront router with all routes and middleware.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(health))
        .nest("/api/products", products::router())
        .nest("/api/cart", cart::router())
        .nest("/api/auth", auth::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
