//! Discount coupons.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use orchard_core::{CouponId, CouponType, Record, SortKey};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    pub id: CouponId,
    pub code: String,
    #[serde(rename = "type")]
    pub coupon_type: CouponType,
    pub value: Decimal,
    pub min_order_value: Decimal,
    pub active: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

const fn type_str(t: CouponType) -> &'static str {
    match t {
        CouponType::Percentage => "percentage",
        CouponType::Fixed => "fixed",
        CouponType::Shipping => "shipping",
    }
}

impl Record for Coupon {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.code]
    }

    fn filter_field(&self, key: &str) -> Option<String> {
        match key {
            "type" => Some(type_str(self.coupon_type).to_string()),
            "active" => Some(self.active.to_string()),
            _ => None,
        }
    }

    fn sort_key(&self, key: &str) -> Option<SortKey> {
        match key {
            "code" => Some(SortKey::Text(self.code.clone())),
            "value" => Some(SortKey::Number(self.value)),
            "min_order_value" => Some(SortKey::Number(self.min_order_value)),
            "created_at" => Some(SortKey::Date(self.created_at)),
            _ => None,
        }
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        Some(self.created_at)
    }
}
