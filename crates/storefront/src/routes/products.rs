//! Catalog routes.
//!
//! Thin proxy over the product service. List queries are forwarded
//! verbatim; the detail page fans out to the related/reviews/SEO
//! endpoints concurrently.

use axum::{
    Json, Router,
    extract::{Path, RawQuery, State},
    routing::get,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{instrument, warn};

use orchard_core::{ProductId, ProductStatus, total_pages};

use crate::error::Result;
use crate::gateway::types::{GatewayProduct, GatewayReview, GatewaySeo, GatewayVariant};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products))
        .route("/{id}", get(get_product))
}

/// A product as served to the web client.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub id: ProductId,
    pub title: String,
    pub brand: Option<String>,
    pub category: String,
    pub price: Decimal,
    pub stock: u32,
    pub status: ProductStatus,
    pub variants: Vec<VariantView>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantView {
    pub id: orchard_core::VariantId,
    pub title: String,
    pub price: Decimal,
    pub stock: u32,
}

impl From<GatewayProduct> for ProductView {
    fn from(p: GatewayProduct) -> Self {
        Self {
            id: p.product_id,
            title: p.title,
            brand: p.brand,
            category: p.category,
            price: p.unit_price,
            // Status is derived at the edge, never stored.
            status: ProductStatus::derive(p.inventory, p.archived),
            stock: p.inventory,
            variants: p.variants.into_iter().map(VariantView::from).collect(),
            created_at: p.created,
        }
    }
}

impl From<GatewayVariant> for VariantView {
    fn from(v: GatewayVariant) -> Self {
        Self {
            id: v.variant_id,
            title: v.title,
            price: v.unit_price,
            stock: v.inventory,
        }
    }
}

/// One page of products.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListView {
    pub items: Vec<ProductView>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
}

/// Full product detail with ancillary data.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetailView {
    pub product: ProductView,
    pub related: Vec<ProductView>,
    pub reviews: Vec<ReviewView>,
    pub seo: Option<SeoView>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewView {
    pub author: String,
    pub rating: u8,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl From<GatewayReview> for ReviewView {
    fn from(r: GatewayReview) -> Self {
        Self {
            author: r.author,
            rating: r.rating,
            body: r.body,
            created_at: r.created,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SeoView {
    pub title: String,
    pub description: String,
}

impl From<GatewaySeo> for SeoView {
    fn from(s: GatewaySeo) -> Self {
        Self {
            title: s.title,
            description: s.description,
        }
    }
}

/// GET /api/products
///
/// Forwards the query string to the product service. Search queries
/// bypass the cache.
#[instrument(skip(state))]
async fn list_products(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<ProductListView>> {
    let query = query.unwrap_or_default();
    let is_search = has_search_term(&query);

    let page = state.gateway().get_products(&query, is_search).await?;

    let total_pages = total_pages(page.total, page.page_size.max(1));

    Ok(Json(ProductListView {
        items: page.items.into_iter().map(ProductView::from).collect(),
        total: page.total,
        page: page.page,
        per_page: page.page_size,
        total_pages,
    }))
}

/// GET /api/products/{id}
///
/// Fetches the product plus related products, reviews, and SEO metadata
/// concurrently. The product itself is required; the ancillary calls
/// degrade gracefully.
#[instrument(skip(state))]
async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductDetailView>> {
    let gateway = state.gateway();

    let (product, related, reviews, seo) = tokio::join!(
        gateway.get_product(id),
        gateway.get_related_products(id),
        gateway.get_reviews(id),
        gateway.get_seo(id),
    );

    let product = product?;

    let related = related.unwrap_or_else(|err| {
        warn!(product_id = %id, error = %err, "failed to load related products");
        Vec::new()
    });
    let reviews = reviews.unwrap_or_else(|err| {
        warn!(product_id = %id, error = %err, "failed to load reviews");
        Vec::new()
    });
    let seo = seo
        .map_err(|err| warn!(product_id = %id, error = %err, "failed to load SEO metadata"))
        .ok();

    Ok(Json(ProductDetailView {
        product: product.into(),
        related: related.into_iter().map(ProductView::from).collect(),
        reviews: reviews.into_iter().map(ReviewView::from).collect(),
        seo: seo.map(SeoView::from),
    }))
}

/// Whether the query string carries a non-empty `q` parameter.
fn has_search_term(query: &str) -> bool {
    query.split('&').any(|pair| {
        pair.split_once('=')
            .is_some_and(|(key, value)| key == "q" && !value.is_empty())
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_has_search_term() {
        assert!(has_search_term("page=1&q=widget"));
        assert!(has_search_term("q=a"));
        assert!(!has_search_term("page=1&per_page=20"));
        assert!(!has_search_term("q="));
        assert!(!has_search_term(""));
    }

    #[test]
    fn test_product_view_derives_status() {
        let product = GatewayProduct {
            product_id: ProductId::from(1),
            title: "Widget".to_string(),
            brand: Some("Acme".to_string()),
            category: "tools".to_string(),
            unit_price: Decimal::from(10),
            inventory: 0,
            archived: false,
            variants: vec![],
            created: Utc::now(),
        };
        let view = ProductView::from(product);
        assert_eq!(view.status, ProductStatus::OutOfStock);
    }

    #[test]
    fn test_archived_wins_over_stock() {
        let product = GatewayProduct {
            product_id: ProductId::from(2),
            title: "Old".to_string(),
            brand: None,
            category: "tools".to_string(),
            unit_price: Decimal::from(5),
            inventory: 50,
            archived: true,
            variants: vec![],
            created: Utc::now(),
        };
        assert_eq!(ProductView::from(product).status, ProductStatus::Archived);
    }
}
