//! Shipping rates and methods.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use orchard_core::{Record, ShippingMethodId, ShippingRateId, SortKey};

/// A flat shipping rate for a region.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingRate {
    pub id: ShippingRateId,
    pub region: String,
    pub rate: Decimal,
    pub min_days: u32,
    pub max_days: u32,
    pub created_at: DateTime<Utc>,
}

impl Record for ShippingRate {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.region]
    }

    fn filter_field(&self, key: &str) -> Option<String> {
        match key {
            "region" => Some(self.region.clone()),
            _ => None,
        }
    }

    fn sort_key(&self, key: &str) -> Option<SortKey> {
        match key {
            "region" => Some(SortKey::Text(self.region.clone())),
            "rate" => Some(SortKey::Number(self.rate)),
            "created_at" => Some(SortKey::Date(self.created_at)),
            _ => None,
        }
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        Some(self.created_at)
    }
}

/// A carrier-backed delivery method.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingMethod {
    pub id: ShippingMethodId,
    pub name: String,
    pub carrier: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Record for ShippingMethod {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.carrier]
    }

    fn filter_field(&self, key: &str) -> Option<String> {
        match key {
            "carrier" => Some(self.carrier.clone()),
            "active" => Some(self.active.to_string()),
            _ => None,
        }
    }

    fn sort_key(&self, key: &str) -> Option<SortKey> {
        match key {
            "name" => Some(SortKey::Text(self.name.clone())),
            "carrier" => Some(SortKey::Text(self.carrier.clone())),
            "created_at" => Some(SortKey::Date(self.created_at)),
            _ => None,
        }
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        Some(self.created_at)
    }
}
