//! Cart routes.
//!
//! The cart itself lives in the remote cart service; the storefront keeps
//! only two cookies: the cart ID and the applied coupon code. Every
//! response re-fetches the cart and recomputes totals.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post, put},
};
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use orchard_core::ProductId;

use crate::cart::{CartTotals, compute_totals, coupon_applies};
use crate::error::{AppError, Result};
use crate::gateway::GatewayError;
use crate::gateway::types::{CartLineInput, GatewayCart, GatewayCartLine, GatewayCoupon};
use crate::middleware::{CART_COUPON_COOKIE, CART_ID_COOKIE};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_cart))
        .route("/lines", post(add_line))
        .route("/lines/{line_id}", put(update_line).delete(remove_line))
        .route("/coupon", post(apply_coupon).delete(remove_coupon))
}

/// A cart as served to the web client, with computed totals.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub id: Option<String>,
    pub lines: Vec<CartLineView>,
    pub coupon: Option<AppliedCouponView>,
    pub currency: String,
    #[serde(flatten)]
    pub totals: CartTotals,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    pub id: String,
    pub product_id: ProductId,
    pub title: String,
    pub variant: Option<String>,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub line_total: Decimal,
}

impl From<GatewayCartLine> for CartLineView {
    fn from(line: GatewayCartLine) -> Self {
        let line_total = line.unit_price * Decimal::from(line.quantity);
        Self {
            id: line.line_id,
            product_id: line.product_id,
            title: line.title,
            variant: line.variant,
            unit_price: line.unit_price,
            quantity: line.quantity,
            line_total,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedCouponView {
    pub code: String,
    /// False when the subtotal has dropped below the coupon's minimum.
    pub applied: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddLineRequest {
    pub product_id: ProductId,
    pub variant: Option<String>,
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
pub struct UpdateLineRequest {
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
pub struct ApplyCouponRequest {
    pub code: String,
}

/// GET /api/cart
///
/// Returns the current cart, or an empty cart for visitors without one.
#[instrument(skip(state, jar))]
async fn get_cart(State(state): State<AppState>, jar: CookieJar) -> Result<(CookieJar, Json<CartView>)> {
    let Some(cart_id) = cookie_value(&jar, CART_ID_COOKIE) else {
        return Ok((jar, Json(empty_cart_view())));
    };

    match state.gateway().get_cart(&cart_id).await {
        Ok(cart) => {
            let view = build_view(&state, &jar, cart).await;
            Ok((jar, Json(view)))
        }
        // A stale cookie pointing at a vanished cart resets to empty.
        Err(GatewayError::NotFound(_)) => {
            let jar = jar
                .remove(Cookie::from(CART_ID_COOKIE))
                .remove(Cookie::from(CART_COUPON_COOKIE));
            Ok((jar, Json(empty_cart_view())))
        }
        Err(err) => Err(err.into()),
    }
}

/// POST /api/cart/lines
///
/// Adds a line, creating the cart first if the visitor has none.
#[instrument(skip(state, jar, body))]
async fn add_line(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<AddLineRequest>,
) -> Result<(CookieJar, Json<CartView>)> {
    if body.quantity == 0 {
        return Err(AppError::Validation("quantity must be at least 1".to_string()));
    }

    let line = CartLineInput {
        product_id: body.product_id,
        variant: body.variant,
        quantity: body.quantity,
    };

    let cart = match cookie_value(&jar, CART_ID_COOKIE) {
        Some(cart_id) => state.gateway().add_cart_line(&cart_id, line).await?,
        None => state.gateway().create_cart(Some(line)).await?,
    };

    let jar = jar.add(cart_cookie(CART_ID_COOKIE, cart.cart_id.clone()));
    let view = build_view(&state, &jar, cart).await;
    Ok((jar, Json(view)))
}

/// PUT /api/cart/lines/{line_id}
///
/// Sets a line's quantity. Quantity 0 removes the line.
#[instrument(skip(state, jar, body))]
async fn update_line(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(line_id): Path<String>,
    Json(body): Json<UpdateLineRequest>,
) -> Result<(CookieJar, Json<CartView>)> {
    let cart_id = require_cart(&jar)?;

    let cart = if body.quantity == 0 {
        state.gateway().remove_cart_line(&cart_id, &line_id).await?
    } else {
        state
            .gateway()
            .update_cart_line(&cart_id, &line_id, body.quantity)
            .await?
    };

    let view = build_view(&state, &jar, cart).await;
    Ok((jar, Json(view)))
}

/// DELETE /api/cart/lines/{line_id}
#[instrument(skip(state, jar))]
async fn remove_line(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(line_id): Path<String>,
) -> Result<(CookieJar, Json<CartView>)> {
    let cart_id = require_cart(&jar)?;
    let cart = state.gateway().remove_cart_line(&cart_id, &line_id).await?;
    let view = build_view(&state, &jar, cart).await;
    Ok((jar, Json(view)))
}

/// POST /api/cart/coupon
///
/// Validates the code against the gateway and stores it in a cookie.
/// Rejected when the cart's subtotal is below the coupon's minimum.
#[instrument(skip(state, jar, body))]
async fn apply_coupon(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<ApplyCouponRequest>,
) -> Result<(CookieJar, Json<CartView>)> {
    let code = body.code.trim().to_uppercase();
    if code.is_empty() {
        return Err(AppError::Validation("coupon code is required".to_string()));
    }

    let cart_id = require_cart(&jar)?;
    let cart = state.gateway().get_cart(&cart_id).await?;

    let coupon = match state.gateway().get_coupon(&code).await {
        Ok(coupon) => coupon,
        Err(GatewayError::NotFound(_)) => {
            return Err(AppError::Validation(format!("unknown coupon code: {code}")));
        }
        Err(err) => return Err(err.into()),
    };

    if !coupon_applies(&coupon, cart.subtotal) {
        return Err(AppError::Validation(format!(
            "coupon {code} requires a minimum order of {}",
            coupon.min_order_value
        )));
    }

    let jar = jar.add(cart_cookie(CART_COUPON_COOKIE, code.clone()));
    let totals = compute_totals(&cart, Some(&coupon), state.tax_rate());
    Ok((
        jar,
        Json(view_with(cart, Some(AppliedCouponView { code, applied: true }), totals)),
    ))
}

/// DELETE /api/cart/coupon
#[instrument(skip(state, jar))]
async fn remove_coupon(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<CartView>)> {
    let jar = jar.remove(Cookie::from(CART_COUPON_COOKIE));

    let Some(cart_id) = cookie_value(&jar, CART_ID_COOKIE) else {
        return Ok((jar, Json(empty_cart_view())));
    };
    let cart = state.gateway().get_cart(&cart_id).await?;
    let totals = compute_totals(&cart, None, state.tax_rate());
    Ok((jar, Json(view_with(cart, None, totals))))
}

// =============================================================================
// Helpers
// =============================================================================

fn cookie_value(jar: &CookieJar, name: &str) -> Option<String> {
    jar.get(name).map(|c| c.value().to_string())
}

fn require_cart(jar: &CookieJar) -> Result<String> {
    cookie_value(jar, CART_ID_COOKIE)
        .ok_or_else(|| AppError::NotFound("no active cart".to_string()))
}

fn cart_cookie(name: &'static str, value: String) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::days(30))
        .build()
}

/// Resolve the stored coupon (if any) and assemble the full cart view.
async fn build_view(state: &AppState, jar: &CookieJar, cart: GatewayCart) -> CartView {
    let coupon = resolve_coupon(state, jar).await;
    let applied_view = coupon.as_ref().map(|c| AppliedCouponView {
        code: c.code.clone(),
        applied: coupon_applies(c, cart.subtotal),
    });
    let totals = compute_totals(&cart, coupon.as_ref(), state.tax_rate());
    view_with(cart, applied_view, totals)
}

/// Fetch the coupon named by the cookie. Lookup failures drop the coupon
/// from the totals rather than failing the cart read.
async fn resolve_coupon(state: &AppState, jar: &CookieJar) -> Option<GatewayCoupon> {
    let code = cookie_value(jar, CART_COUPON_COOKIE)?;
    match state.gateway().get_coupon(&code).await {
        Ok(coupon) => Some(coupon),
        Err(err) => {
            warn!(code = %code, error = %err, "stored coupon could not be resolved");
            None
        }
    }
}

fn view_with(cart: GatewayCart, coupon: Option<AppliedCouponView>, totals: CartTotals) -> CartView {
    CartView {
        id: Some(cart.cart_id),
        lines: cart.lines.into_iter().map(CartLineView::from).collect(),
        coupon,
        currency: cart.currency,
        totals,
    }
}

fn empty_cart_view() -> CartView {
    CartView {
        id: None,
        lines: Vec::new(),
        coupon: None,
        currency: "USD".to_string(),
        totals: CartTotals {
            subtotal: Decimal::ZERO,
            discount: Decimal::ZERO,
            shipping: Decimal::ZERO,
            tax: Decimal::ZERO,
            total: Decimal::ZERO,
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cart_view_is_zeroed() {
        let view = empty_cart_view();
        assert!(view.id.is_none());
        assert!(view.lines.is_empty());
        assert_eq!(view.totals.total, Decimal::ZERO);
    }

    #[test]
    fn test_line_total_is_price_times_quantity() {
        let line = GatewayCartLine {
            line_id: "l1".to_string(),
            product_id: ProductId::from(1),
            title: "Widget".to_string(),
            variant: None,
            unit_price: Decimal::new(1250, 2),
            quantity: 3,
        };
        let view = CartLineView::from(line);
        assert_eq!(view.line_total, Decimal::new(3750, 2));
    }
}
