//! Customer accounts as managed from the admin panel.

use chrono::{DateTime, Utc};
use serde::Serialize;

use orchard_core::{Email, Record, SortKey, UserId, UserRole, UserStatus};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub role: UserRole,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
}

impl Record for User {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, self.email.as_str()]
    }

    fn filter_field(&self, key: &str) -> Option<String> {
        match key {
            "role" => Some(self.role.to_string()),
            "status" => Some(self.status.to_string()),
            _ => None,
        }
    }

    fn sort_key(&self, key: &str) -> Option<SortKey> {
        match key {
            "name" => Some(SortKey::Text(self.name.clone())),
            "email" => Some(SortKey::Text(self.email.to_string())),
            "created_at" => Some(SortKey::Date(self.created_at)),
            _ => None,
        }
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        Some(self.created_at)
    }
}
