//! Products as managed from the admin panel.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use orchard_core::{ProductId, ProductStatus, Record, SortKey, VariantId};

/// A catalog product.
///
/// `status` is not stored; it is derived from the stock level and the
/// archived flag whenever the product is serialized or filtered.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub stock: u32,
    pub category: String,
    pub brand_id: Option<orchard_core::BrandId>,
    pub archived: bool,
    pub variants: Vec<ProductVariant>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    pub id: VariantId,
    pub name: String,
    pub price: Decimal,
    pub stock: u32,
}

impl Product {
    /// Availability derived from stock and the archived flag.
    #[must_use]
    pub const fn status(&self) -> ProductStatus {
        ProductStatus::derive(self.stock, self.archived)
    }
}

impl Record for Product {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.category]
    }

    fn filter_field(&self, key: &str) -> Option<String> {
        match key {
            "category" => Some(self.category.clone()),
            "status" => Some(self.status().to_string()),
            "brand_id" => self.brand_id.map(|id| id.to_string()),
            _ => None,
        }
    }

    fn sort_key(&self, key: &str) -> Option<SortKey> {
        match key {
            "name" => Some(SortKey::Text(self.name.clone())),
            "price" => Some(SortKey::Number(self.price)),
            "stock" => Some(SortKey::Number(Decimal::from(self.stock))),
            "created_at" => Some(SortKey::Date(self.created_at)),
            _ => None,
        }
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        Some(self.created_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_filter_field_tracks_stock() {
        let mut product = Product {
            id: ProductId::from(1),
            name: "Widget".to_string(),
            price: Decimal::from(10),
            stock: 100,
            category: "tools".to_string(),
            brand_id: None,
            archived: false,
            variants: vec![],
            created_at: Utc::now(),
        };
        assert_eq!(product.filter_field("status").as_deref(), Some("active"));

        product.stock = 3;
        assert_eq!(product.filter_field("status").as_deref(), Some("low_stock"));

        product.stock = 0;
        assert_eq!(
            product.filter_field("status").as_deref(),
            Some("out_of_stock")
        );

        product.archived = true;
        assert_eq!(product.filter_field("status").as_deref(), Some("archived"));
    }
}
