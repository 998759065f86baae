//! Cart totals arithmetic.
//!
//! The remote cart service owns the lines and the subtotal; this module
//! layers coupon and tax math on top. Totals are computed fresh on every
//! read, never written back upstream.

use rust_decimal::Decimal;
use serde::Serialize;

use orchard_core::CouponType;

use crate::gateway::types::{GatewayCart, GatewayCoupon};

/// Computed money breakdown for a cart.
///
/// All amounts are rounded to two decimal places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

/// Compute the cart totals.
///
/// An applied coupon is ignored entirely when the subtotal is below its
/// minimum order value. Tax applies to the discounted subtotal but not to
/// shipping. The grand total never goes below zero.
#[must_use]
pub fn compute_totals(
    cart: &GatewayCart,
    coupon: Option<&GatewayCoupon>,
    tax_rate: Decimal,
) -> CartTotals {
    let subtotal = cart.subtotal;

    let active = coupon.filter(|c| subtotal >= c.min_order_value);

    let mut shipping = cart.shipping;
    let discount = match active {
        Some(c) => match c.coupon_type {
            CouponType::Percentage => subtotal * c.value / Decimal::from(100),
            CouponType::Fixed => c.value.min(subtotal),
            CouponType::Shipping => {
                shipping = Decimal::ZERO;
                Decimal::ZERO
            }
        },
        None => Decimal::ZERO,
    };

    let taxable = subtotal - discount;
    let tax = tax_rate * taxable;
    let total = (taxable + shipping + tax).max(Decimal::ZERO);

    CartTotals {
        subtotal: round_cents(subtotal),
        discount: round_cents(discount),
        shipping: round_cents(shipping),
        tax: round_cents(tax),
        total: round_cents(total),
    }
}

fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Whether a coupon applies at the given subtotal.
#[must_use]
pub fn coupon_applies(coupon: &GatewayCoupon, subtotal: Decimal) -> bool {
    subtotal >= coupon.min_order_value
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn cart(subtotal: Decimal, shipping: Decimal) -> GatewayCart {
        GatewayCart {
            cart_id: "cart-1".to_string(),
            lines: vec![],
            subtotal,
            shipping,
            currency: "USD".to_string(),
        }
    }

    fn coupon(kind: CouponType, value: Decimal, min: Decimal) -> GatewayCoupon {
        GatewayCoupon {
            code: "TEST".to_string(),
            coupon_type: kind,
            value,
            min_order_value: min,
        }
    }

    #[test]
    fn test_totals_without_coupon() {
        let totals = compute_totals(&cart(d("100"), d("5")), None, d("0.08"));
        assert_eq!(totals.subtotal, d("100.00"));
        assert_eq!(totals.discount, d("0.00"));
        assert_eq!(totals.tax, d("8.00"));
        assert_eq!(totals.total, d("113.00"));
    }

    #[test]
    fn test_percentage_coupon() {
        let c = coupon(CouponType::Percentage, d("10"), Decimal::ZERO);
        let totals = compute_totals(&cart(d("200"), d("10")), Some(&c), d("0.08"));
        assert_eq!(totals.discount, d("20.00"));
        // tax on discounted subtotal: 0.08 * 180 = 14.40
        assert_eq!(totals.tax, d("14.40"));
        assert_eq!(totals.total, d("204.40"));
    }

    #[test]
    fn test_fixed_coupon_capped_at_subtotal() {
        let c = coupon(CouponType::Fixed, d("50"), Decimal::ZERO);
        let totals = compute_totals(&cart(d("30"), Decimal::ZERO), Some(&c), Decimal::ZERO);
        assert_eq!(totals.discount, d("30.00"));
        assert_eq!(totals.total, d("0.00"));
    }

    #[test]
    fn test_shipping_coupon_zeroes_shipping() {
        let c = coupon(CouponType::Shipping, Decimal::ZERO, Decimal::ZERO);
        let totals = compute_totals(&cart(d("100"), d("12.50")), Some(&c), Decimal::ZERO);
        assert_eq!(totals.discount, d("0.00"));
        assert_eq!(totals.shipping, d("0.00"));
        assert_eq!(totals.total, d("100.00"));
    }

    #[test]
    fn test_coupon_ignored_below_minimum() {
        let c = coupon(CouponType::Percentage, d("50"), d("100"));
        let totals = compute_totals(&cart(d("99.99"), Decimal::ZERO), Some(&c), Decimal::ZERO);
        assert_eq!(totals.discount, d("0.00"));
        assert_eq!(totals.total, d("99.99"));
        assert!(!coupon_applies(&c, d("99.99")));
        assert!(coupon_applies(&c, d("100")));
    }

    #[test]
    fn test_tax_not_applied_to_shipping() {
        let totals = compute_totals(&cart(d("50"), d("20")), None, d("0.10"));
        assert_eq!(totals.tax, d("5.00"));
        assert_eq!(totals.total, d("75.00"));
    }

    #[test]
    fn test_rounding_to_cents() {
        let c = coupon(CouponType::Percentage, d("33"), Decimal::ZERO);
        let totals = compute_totals(&cart(d("9.99"), Decimal::ZERO), Some(&c), Decimal::ZERO);
        // 9.99 * 0.33 = 3.2967 -> 3.30
        assert_eq!(totals.discount, d("3.30"));
    }

    #[test]
    fn test_total_floored_at_zero() {
        let c = coupon(CouponType::Fixed, d("500"), Decimal::ZERO);
        let totals = compute_totals(&cart(d("10"), Decimal::ZERO), Some(&c), d("0.08"));
        assert_eq!(totals.total, d("0.00"));
    }
}
