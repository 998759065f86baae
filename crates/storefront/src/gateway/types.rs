//! Wire types for the upstream API gateway.
//!
//! The gateway speaks snake_case JSON with its own field names
//! (`product_id`, `unit_price`, `inventory`); the storefront API reshapes
//! these into the camelCase shapes the web client expects. The mapping
//! lives in the route modules next to the response types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use orchard_core::{CouponType, ProductId, UserId, VariantId};

// =============================================================================
// Catalog
// =============================================================================

/// A product as returned by the product service.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayProduct {
    pub product_id: ProductId,
    pub title: String,
    pub brand: Option<String>,
    pub category: String,
    pub unit_price: Decimal,
    pub inventory: u32,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub variants: Vec<GatewayVariant>,
    pub created: DateTime<Utc>,
}

/// A product variant as returned by the product service.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayVariant {
    pub variant_id: VariantId,
    pub title: String,
    pub unit_price: Decimal,
    pub inventory: u32,
}

/// One page of products from the product service.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayProductPage {
    pub items: Vec<GatewayProduct>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

/// A customer review from the product service.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayReview {
    pub author: String,
    pub rating: u8,
    pub body: String,
    pub created: DateTime<Utc>,
}

/// SEO metadata from the product service.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewaySeo {
    pub title: String,
    pub description: String,
}

// =============================================================================
// Cart
// =============================================================================

/// A cart as held by the remote cart service.
///
/// The cart service owns the lines and the subtotal; the storefront layers
/// coupon and tax arithmetic on top without writing totals back.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayCart {
    pub cart_id: String,
    #[serde(default)]
    pub lines: Vec<GatewayCartLine>,
    pub subtotal: Decimal,
    #[serde(default)]
    pub shipping: Decimal,
    pub currency: String,
}

/// A single cart line from the cart service.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayCartLine {
    pub line_id: String,
    pub product_id: ProductId,
    pub title: String,
    pub variant: Option<String>,
    pub unit_price: Decimal,
    pub quantity: u32,
}

/// Request body for adding a cart line.
#[derive(Debug, Clone, Serialize)]
pub struct CartLineInput {
    pub product_id: ProductId,
    pub variant: Option<String>,
    pub quantity: u32,
}

// =============================================================================
// Coupons
// =============================================================================

/// A discount rule fetched from the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayCoupon {
    pub code: String,
    #[serde(rename = "kind")]
    pub coupon_type: CouponType,
    pub value: Decimal,
    #[serde(default)]
    pub min_order_value: Decimal,
}

// =============================================================================
// Auth
// =============================================================================

/// Access/refresh token pair issued by the gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayTokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: u64,
}

/// User profile as returned by the gateway's user-info endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayUser {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub role: String,
}
