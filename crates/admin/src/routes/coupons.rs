//! Coupon management routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use tracing::instrument;

use orchard_core::{CouponId, ListParams, Page, SortOrder};

use crate::components::data_table::{BulkAction, FilterOption, TableColumn, TableConfig, TableFilter};
use crate::error::Result;
use crate::middleware::{RequireAdminAuth, RequireSuperAdmin};
use crate::models::Coupon;
use crate::routes::require_editor;
use crate::state::AppState;
use crate::store::{CouponPatch, NewCoupon};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/table", get(table))
        .route("/{id}", get(get_one).put(update).delete(delete))
}

/// GET /api/admin/coupons
#[instrument(skip(state, query))]
async fn list(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<Vec<(String, String)>>,
) -> Json<Page<Coupon>> {
    let params = ListParams::from_pairs(query);
    Json(state.store().list_coupons(&params).await)
}

/// GET /api/admin/coupons/table
#[instrument]
async fn table(RequireAdminAuth(_admin): RequireAdminAuth) -> Json<TableConfig> {
    let config = TableConfig::new(vec![
        TableColumn::sortable("code", "Code"),
        TableColumn::plain("type", "Type"),
        TableColumn::sortable("value", "Value"),
        TableColumn::sortable("min_order_value", "Min order"),
        TableColumn::plain("active", "Active"),
        TableColumn::sortable("created_at", "Created"),
    ])
    .with_filters(vec![
        TableFilter::multi_select(
            "type",
            "Type",
            vec![
                FilterOption::new("percentage", "Percentage"),
                FilterOption::new("fixed", "Fixed amount"),
                FilterOption::new("shipping", "Free shipping"),
            ],
        ),
        TableFilter::select(
            "active",
            "Active",
            vec![
                FilterOption::new("true", "Active"),
                FilterOption::new("false", "Inactive"),
            ],
        ),
    ])
    .with_bulk_actions(vec![
        BulkAction::new("deactivate", "Deactivate"),
        BulkAction::new("delete", "Delete").destructive(),
    ])
    .with_default_sort("created_at", SortOrder::Desc);

    Json(config)
}

/// GET /api/admin/coupons/{id}
#[instrument(skip(state))]
async fn get_one(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<CouponId>,
) -> Result<Json<Coupon>> {
    Ok(Json(state.store().get_coupon(id).await?))
}

/// POST /api/admin/coupons
#[instrument(skip(state, admin, body))]
async fn create(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Json(body): Json<NewCoupon>,
) -> Result<(StatusCode, Json<Coupon>)> {
    require_editor(&admin)?;
    let coupon = state.store().create_coupon(body).await?;
    Ok((StatusCode::CREATED, Json(coupon)))
}

/// PUT /api/admin/coupons/{id}
#[instrument(skip(state, admin, body))]
async fn update(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<CouponId>,
    Json(body): Json<CouponPatch>,
) -> Result<Json<Coupon>> {
    require_editor(&admin)?;
    Ok(Json(state.store().update_coupon(id, body).await?))
}

/// DELETE /api/admin/coupons/{id}
#[instrument(skip(state))]
async fn delete(
    RequireSuperAdmin(_admin): RequireSuperAdmin,
    State(state): State<AppState>,
    Path(id): Path<CouponId>,
) -> Result<StatusCode> {
    state.store().delete_coupon(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
