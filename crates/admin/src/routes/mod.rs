//! HTTP route handlers for the admin API.

pub mod auth;
pub mod brands;
pub mod coupons;
pub mod payments;
pub mod products;
pub mod shipping;
pub mod users;

use axum::{Json, Router, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::error::{AdminError, Result};
use crate::models::CurrentAdmin;
use crate::state::AppState;

/// Build the admin router with all routes and middleware.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(health))
        .nest("/api/admin/auth", auth::router())
        .nest("/api/admin/users", users::router())
        .nest("/api/admin/products", products::router())
        .nest("/api/admin/brands", brands::router())
        .nest("/api/admin/coupons", coupons::router())
        .nest("/api/admin/shipping", shipping::router())
        .nest("/api/admin/payments", payments::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Viewers can read everything but mutate nothing.
pub(crate) fn require_editor(admin: &CurrentAdmin) -> Result<()> {
    if admin.role == orchard_core::AdminRole::Viewer {
        return Err(AdminError::Forbidden(
            "viewers cannot modify data".to_string(),
        ));
    }
    Ok(())
}
