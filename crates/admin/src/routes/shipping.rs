//! Shipping configuration routes.
//!
//! Two collections hang off `/api/admin/shipping`: regional rates and
//! carrier methods. Both are list/create/delete only - edits are done by
//! replacing an entry.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use tracing::instrument;

use orchard_core::{ListParams, Page, ShippingMethodId, ShippingRateId, SortOrder};

use crate::components::data_table::{BulkAction, FilterOption, TableColumn, TableConfig, TableFilter};
use crate::error::Result;
use crate::middleware::{RequireAdminAuth, RequireSuperAdmin};
use crate::models::{ShippingMethod, ShippingRate};
use crate::routes::require_editor;
use crate::state::AppState;
use crate::store::{NewShippingMethod, NewShippingRate};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/rates", get(list_rates).post(create_rate))
        .route("/rates/table", get(rates_table))
        .route("/rates/{id}", axum::routing::delete(delete_rate))
        .route("/methods", get(list_methods).post(create_method))
        .route("/methods/table", get(methods_table))
        .route("/methods/{id}", axum::routing::delete(delete_method))
}

// =============================================================================
// Rates
// =============================================================================

/// GET /api/admin/shipping/rates
#[instrument(skip(state, query))]
async fn list_rates(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<Vec<(String, String)>>,
) -> Json<Page<ShippingRate>> {
    let params = ListParams::from_pairs(query);
    Json(state.store().list_shipping_rates(&params).await)
}

/// GET /api/admin/shipping/rates/table
#[instrument]
async fn rates_table(RequireAdminAuth(_admin): RequireAdminAuth) -> Json<TableConfig> {
    let config = TableConfig::new(vec![
        TableColumn::sortable("region", "Region"),
        TableColumn::sortable("rate", "Rate"),
        TableColumn::plain("min_days", "Min days"),
        TableColumn::plain("max_days", "Max days"),
        TableColumn::sortable("created_at", "Created"),
    ])
    .with_bulk_actions(vec![BulkAction::new("delete", "Delete").destructive()])
    .with_default_sort("region", SortOrder::Asc);

    Json(config)
}

/// POST /api/admin/shipping/rates
#[instrument(skip(state, admin, body))]
async fn create_rate(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Json(body): Json<NewShippingRate>,
) -> Result<(StatusCode, Json<ShippingRate>)> {
    require_editor(&admin)?;
    let rate = state.store().create_shipping_rate(body).await?;
    Ok((StatusCode::CREATED, Json(rate)))
}

/// DELETE /api/admin/shipping/rates/{id}
#[instrument(skip(state))]
async fn delete_rate(
    RequireSuperAdmin(_admin): RequireSuperAdmin,
    State(state): State<AppState>,
    Path(id): Path<ShippingRateId>,
) -> Result<StatusCode> {
    state.store().delete_shipping_rate(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Methods
// =============================================================================

/// GET /api/admin/shipping/methods
#[instrument(skip(state, query))]
async fn list_methods(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<Vec<(String, String)>>,
) -> Json<Page<ShippingMethod>> {
    let params = ListParams::from_pairs(query);
    Json(state.store().list_shipping_methods(&params).await)
}

/// GET /api/admin/shipping/methods/table
#[instrument]
async fn methods_table(RequireAdminAuth(_admin): RequireAdminAuth) -> Json<TableConfig> {
    let config = TableConfig::new(vec![
        TableColumn::sortable("name", "Name"),
        TableColumn::sortable("carrier", "Carrier"),
        TableColumn::plain("active", "Active"),
        TableColumn::sortable("created_at", "Created"),
    ])
    .with_filters(vec![TableFilter::select(
        "active",
        "Active",
        vec![
            FilterOption::new("true", "Active"),
            FilterOption::new("false", "Inactive"),
        ],
    )])
    .with_bulk_actions(vec![BulkAction::new("delete", "Delete").destructive()])
    .with_default_sort("name", SortOrder::Asc);

    Json(config)
}

/// POST /api/admin/shipping/methods
#[instrument(skip(state, admin, body))]
async fn create_method(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Json(body): Json<NewShippingMethod>,
) -> Result<(StatusCode, Json<ShippingMethod>)> {
    require_editor(&admin)?;
    let method = state.store().create_shipping_method(body).await?;
    Ok((StatusCode::CREATED, Json(method)))
}

/// DELETE /api/admin/shipping/methods/{id}
#[instrument(skip(state))]
async fn delete_method(
    RequireSuperAdmin(_admin): RequireSuperAdmin,
    State(state): State<AppState>,
    Path(id): Path<ShippingMethodId>,
) -> Result<StatusCode> {
    state.store().delete_shipping_method(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
