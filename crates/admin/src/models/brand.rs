//! Brands.

use chrono::{DateTime, Utc};
use serde::Serialize;

use orchard_core::{BrandId, Record, SortKey};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub id: BrandId,
    pub name: String,
    pub slug: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Record for Brand {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.slug]
    }

    fn filter_field(&self, key: &str) -> Option<String> {
        match key {
            "active" => Some(self.active.to_string()),
            _ => None,
        }
    }

    fn sort_key(&self, key: &str) -> Option<SortKey> {
        match key {
            "name" => Some(SortKey::Text(self.name.clone())),
            "created_at" => Some(SortKey::Date(self.created_at)),
            _ => None,
        }
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        Some(self.created_at)
    }
}
