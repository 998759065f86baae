//! Brand management routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use tracing::instrument;

use orchard_core::{BrandId, ListParams, Page, SortOrder};

use crate::components::data_table::{BulkAction, FilterOption, TableColumn, TableConfig, TableFilter};
use crate::error::Result;
use crate::middleware::{RequireAdminAuth, RequireSuperAdmin};
use crate::models::Brand;
use crate::routes::require_editor;
use crate::state::AppState;
use crate::store::{BrandPatch, NewBrand};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/table", get(table))
        .route("/{id}", get(get_one).put(update).delete(delete))
}

/// GET /api/admin/brands
#[instrument(skip(state, query))]
async fn list(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<Vec<(String, String)>>,
) -> Json<Page<Brand>> {
    let params = ListParams::from_pairs(query);
    Json(state.store().list_brands(&params).await)
}

/// GET /api/admin/brands/table
#[instrument]
async fn table(RequireAdminAuth(_admin): RequireAdminAuth) -> Json<TableConfig> {
    let config = TableConfig::new(vec![
        TableColumn::sortable("name", "Name"),
        TableColumn::plain("slug", "Slug"),
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

/// GET /api/admin/brands/{id}
#[instrument(skip(state))]
async fn get_one(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<BrandId>,
) -> Result<Json<Brand>> {
    Ok(Json(state.store().get_brand(id).await?))
}

/// POST /api/admin/brands
#[instrument(skip(state, admin, body))]
async fn create(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Json(body): Json<NewBrand>,
) -> Result<(StatusCode, Json<Brand>)> {
    require_editor(&admin)?;
    let brand = state.store().create_brand(body).await?;
    Ok((StatusCode::CREATED, Json(brand)))
}

/// PUT /api/admin/brands/{id}
#[instrument(skip(state, admin, body))]
async fn update(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<BrandId>,
    Json(body): Json<BrandPatch>,
) -> Result<Json<Brand>> {
    require_editor(&admin)?;
    Ok(Json(state.store().update_brand(id, body).await?))
}

/// DELETE /api/admin/brands/{id}
#[instrument(skip(state))]
async fn delete(
    RequireSuperAdmin(_admin): RequireSuperAdmin,
    State(state): State<AppState>,
    Path(id): Path<BrandId>,
) -> Result<StatusCode> {
    state.store().delete_brand(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
