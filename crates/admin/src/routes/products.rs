//! Product management routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use serde::Serialize;
use tracing::instrument;

use orchard_core::{ListParams, Page, ProductId, ProductStatus, SortOrder};

use crate::components::data_table::{BulkAction, FilterOption, TableColumn, TableConfig, TableFilter};
use crate::error::Result;
use crate::middleware::{RequireAdminAuth, RequireSuperAdmin};
use crate::models::Product;
use crate::routes::require_editor;
use crate::state::AppState;
use crate::store::{NewProduct, ProductPatch};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/table", get(table))
        .route("/{id}", get(get_one).put(update).delete(delete))
}

/// A product with its derived availability status attached.
#[derive(Debug, Serialize)]
pub struct ProductView {
    #[serde(flatten)]
    product: Product,
    status: ProductStatus,
}

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        let status = product.status();
        Self { product, status }
    }
}

fn to_view_page(page: Page<Product>) -> Page<ProductView> {
    Page {
        items: page.items.into_iter().map(ProductView::from).collect(),
        page: page.page,
        per_page: page.per_page,
        total: page.total,
        total_pages: page.total_pages,
    }
}

/// GET /api/admin/products
#[instrument(skip(state, query))]
async fn list(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<Vec<(String, String)>>,
) -> Json<Page<ProductView>> {
    let params = ListParams::from_pairs(query);
    Json(to_view_page(state.store().list_products(&params).await))
}

/// GET /api/admin/products/table
#[instrument]
async fn table(RequireAdminAuth(_admin): RequireAdminAuth) -> Json<TableConfig> {
    let config = TableConfig::new(vec![
        TableColumn::sortable("name", "Name"),
        TableColumn::sortable("price", "Price"),
        TableColumn::sortable("stock", "Stock"),
        TableColumn::plain("category", "Category"),
        TableColumn::plain("status", "Status"),
        TableColumn::sortable("created_at", "Created"),
    ])
    .with_filters(vec![
        TableFilter::multi_select(
            "status",
            "Status",
            vec![
                FilterOption::new("active", "Active"),
                FilterOption::new("low_stock", "Low stock"),
                FilterOption::new("out_of_stock", "Out of stock"),
                FilterOption::new("archived", "Archived"),
            ],
        ),
        TableFilter::select("category", "Category", vec![]),
        TableFilter::date_range("Created"),
    ])
    .with_bulk_actions(vec![
        BulkAction::new("archive", "Archive"),
        BulkAction::new("delete", "Delete").destructive(),
    ])
    .with_default_sort("created_at", SortOrder::Desc);

    Json(config)
}

/// GET /api/admin/products/{id}
#[instrument(skip(state))]
async fn get_one(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductView>> {
    Ok(Json(state.store().get_product(id).await?.into()))
}

/// POST /api/admin/products
#[instrument(skip(state, admin, body))]
async fn create(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Json(body): Json<NewProduct>,
) -> Result<(StatusCode, Json<ProductView>)> {
    require_editor(&admin)?;
    let product = state.store().create_product(body).await?;
    Ok((StatusCode::CREATED, Json(product.into())))
}

/// PUT /api/admin/products/{id}
#[instrument(skip(state, admin, body))]
async fn update(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(body): Json<ProductPatch>,
) -> Result<Json<ProductView>> {
    require_editor(&admin)?;
    Ok(Json(state.store().update_product(id, body).await?.into()))
}

/// DELETE /api/admin/products/{id}
///
/// Destructive; super admins only. Archiving via PUT is the usual path.
#[instrument(skip(state))]
async fn delete(
    RequireSuperAdmin(_admin): RequireSuperAdmin,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<StatusCode> {
    state.store().delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    #[test]
    fn test_view_serializes_derived_status() {
        let view = ProductView::from(Product {
            id: ProductId::from(1),
            name: "Widget".to_string(),
            price: Decimal::from(10),
            stock: 2,
            category: "tools".to_string(),
            brand_id: None,
            archived: false,
            variants: vec![],
            created_at: Utc::now(),
        });
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["status"], "low_stock");
        assert_eq!(json["name"], "Widget");
    }
}
