//! Query state for list endpoints.
//!
//! Models the page/sort/filter state a list page holds and the transitions
//! the UI performs on it. The transition rules matter more than the storage:
//! any filter change resets to page 1, while sort toggles preserve the
//! current page; toggling the active sort column flips its direction, and
//! selecting a new column resets to ascending.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default page size for list endpoints.
pub const DEFAULT_PER_PAGE: u32 = 20;

/// Maximum page size a client may request.
pub const MAX_PER_PAGE: u32 = 100;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// The opposite direction.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Query-string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(format!("invalid sort order: {s}")),
        }
    }
}

/// Query state for a list endpoint.
///
/// Filter groups are keyed by field name and hold one or more accepted
/// values (OR within a group, AND across groups). `BTreeMap` keeps the
/// encoded query string deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListParams {
    /// 1-based page number.
    pub page: u32,
    /// Page size, clamped to `1..=MAX_PER_PAGE`.
    pub per_page: u32,
    /// Sort column key, if any.
    pub sort: Option<String>,
    /// Sort direction (meaningful only when `sort` is set).
    pub dir: SortOrder,
    /// Free-text search, matched case-insensitively as a substring.
    pub search: Option<String>,
    /// Multi-value inclusion filter groups.
    pub filters: BTreeMap<String, Vec<String>>,
    /// Inclusive lower bound on record creation date.
    pub created_from: Option<NaiveDate>,
    /// Inclusive upper bound on record creation date.
    pub created_to: Option<NaiveDate>,
}

impl ListParams {
    /// Create default params: page 1, default page size, no sort or filters.
    #[must_use]
    pub fn new() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            ..Self::default()
        }
    }

    /// The effective page number (0 is treated as 1).
    #[must_use]
    pub const fn effective_page(&self) -> u32 {
        if self.page == 0 { 1 } else { self.page }
    }

    /// The effective page size, clamped to `1..=MAX_PER_PAGE`.
    #[must_use]
    pub const fn effective_per_page(&self) -> u32 {
        if self.per_page == 0 {
            1
        } else if self.per_page > MAX_PER_PAGE {
            MAX_PER_PAGE
        } else {
            self.per_page
        }
    }

    /// Move to a different page, leaving everything else untouched.
    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Change the page size. Resets to page 1.
    #[must_use]
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.clamp(1, MAX_PER_PAGE);
        self.page = 1;
        self
    }

    /// Set the free-text search. Resets to page 1. An empty string clears
    /// the search.
    #[must_use]
    pub fn with_search(mut self, search: &str) -> Self {
        self.search = if search.is_empty() {
            None
        } else {
            Some(search.to_string())
        };
        self.page = 1;
        self
    }

    /// Replace a filter group's values. Resets to page 1. An empty value
    /// list removes the group.
    #[must_use]
    pub fn with_filter(mut self, key: &str, values: Vec<String>) -> Self {
        let values: Vec<String> = values.into_iter().filter(|v| !v.is_empty()).collect();
        if values.is_empty() {
            self.filters.remove(key);
        } else {
            self.filters.insert(key.to_string(), values);
        }
        self.page = 1;
        self
    }

    /// Set the creation-date range. Resets to page 1.
    #[must_use]
    pub fn with_date_range(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.created_from = from;
        self.created_to = to;
        self.page = 1;
        self
    }

    /// Apply a sort selection.
    ///
    /// Selecting the column already being sorted flips the direction;
    /// selecting a new column sorts ascending. The current page and page
    /// size are preserved.
    #[must_use]
    pub fn with_sort(mut self, column: &str) -> Self {
        if self.sort.as_deref() == Some(column) {
            self.dir = self.dir.flipped();
        } else {
            self.sort = Some(column.to_string());
            self.dir = SortOrder::Asc;
        }
        self
    }

    /// Decode query-string pairs back into list params.
    ///
    /// The inverse of [`Self::to_query_string`]: recognized keys are
    /// consumed, every other key becomes a comma-split filter group.
    /// Unparseable values fall back to the defaults rather than erroring,
    /// matching how list endpoints treat hand-edited URLs.
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut params = Self::new();

        for (key, value) in pairs {
            let (key, value) = (key.as_ref(), value.as_ref());
            match key {
                "page" => params.page = value.parse().unwrap_or(1),
                "per_page" => params.per_page = value.parse().unwrap_or(DEFAULT_PER_PAGE),
                "sort" => {
                    params.sort = (!value.is_empty()).then(|| value.to_string());
                }
                "dir" => params.dir = value.parse().unwrap_or_default(),
                "q" => {
                    params.search = (!value.is_empty()).then(|| value.to_string());
                }
                "created_from" => params.created_from = value.parse().ok(),
                "created_to" => params.created_to = value.parse().ok(),
                _ => {
                    let values: Vec<String> = value
                        .split(',')
                        .filter(|v| !v.is_empty())
                        .map(str::to_string)
                        .collect();
                    if !values.is_empty() {
                        params.filters.insert(key.to_string(), values);
                    }
                }
            }
        }

        params
    }

    /// Encode the state as a query string (without the leading `?`).
    ///
    /// Filter value lists are joined with commas; empty values, empty
    /// groups, and an empty search are omitted entirely. Values are
    /// percent-encoded.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut pairs: Vec<String> = Vec::new();

        pairs.push(format!("page={}", self.effective_page()));
        pairs.push(format!("per_page={}", self.effective_per_page()));

        if let Some(sort) = &self.sort {
            pairs.push(format!("sort={}", urlencoding::encode(sort)));
            pairs.push(format!("dir={}", self.dir.as_str()));
        }

        if let Some(search) = self.search.as_deref()
            && !search.is_empty()
        {
            pairs.push(format!("q={}", urlencoding::encode(search)));
        }

        for (key, values) in &self.filters {
            let joined: Vec<String> = values
                .iter()
                .filter(|v| !v.is_empty())
                .map(|v| urlencoding::encode(v).into_owned())
                .collect();
            if !joined.is_empty() {
                pairs.push(format!("{}={}", urlencoding::encode(key), joined.join(",")));
            }
        }

        if let Some(from) = self.created_from {
            pairs.push(format!("created_from={from}"));
        }
        if let Some(to) = self.created_to {
            pairs.push(format!("created_to={to}"));
        }

        pairs.join("&")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = ListParams::new();
        assert_eq!(params.effective_page(), 1);
        assert_eq!(params.effective_per_page(), DEFAULT_PER_PAGE);
        assert!(params.sort.is_none());
    }

    #[test]
    fn test_sort_toggle_same_column_flips_direction() {
        let params = ListParams::new().with_sort("name");
        assert_eq!(params.sort.as_deref(), Some("name"));
        assert_eq!(params.dir, SortOrder::Asc);

        let params = params.with_sort("name");
        assert_eq!(params.dir, SortOrder::Desc);

        let params = params.with_sort("name");
        assert_eq!(params.dir, SortOrder::Asc);
    }

    #[test]
    fn test_sort_new_column_resets_to_ascending() {
        let params = ListParams::new().with_sort("name").with_sort("name");
        assert_eq!(params.dir, SortOrder::Desc);

        let params = params.with_sort("created");
        assert_eq!(params.sort.as_deref(), Some("created"));
        assert_eq!(params.dir, SortOrder::Asc);
    }

    #[test]
    fn test_sort_preserves_page() {
        let params = ListParams::new().with_page(4).with_sort("name");
        assert_eq!(params.page, 4);
    }

    #[test]
    fn test_filter_change_resets_page() {
        let params = ListParams::new()
            .with_page(7)
            .with_filter("status", vec!["active".to_string()]);
        assert_eq!(params.page, 1);

        let params = params.with_page(3).with_search("flask");
        assert_eq!(params.page, 1);

        let params = params.with_page(5).with_per_page(50);
        assert_eq!(params.page, 1);
    }

    #[test]
    fn test_empty_filter_group_is_removed() {
        let params = ListParams::new()
            .with_filter("status", vec!["active".to_string()])
            .with_filter("status", vec![]);
        assert!(params.filters.is_empty());
    }

    #[test]
    fn test_query_string_comma_joins_filter_values() {
        let params = ListParams::new().with_filter(
            "role",
            vec!["admin".to_string(), "manager".to_string()],
        );
        let qs = params.to_query_string();
        assert!(qs.contains("role=admin,manager"));
    }

    #[test]
    fn test_query_string_omits_empties() {
        let params = ListParams::new()
            .with_search("")
            .with_filter("status", vec![String::new()]);
        let qs = params.to_query_string();
        assert_eq!(qs, "page=1&per_page=20");
    }

    #[test]
    fn test_query_string_includes_sort_and_dir_together() {
        let qs = ListParams::new().with_sort("price").to_query_string();
        assert!(qs.contains("sort=price&dir=asc"));

        let qs = ListParams::new()
            .with_sort("price")
            .with_sort("price")
            .to_query_string();
        assert!(qs.contains("sort=price&dir=desc"));
    }

    #[test]
    fn test_query_string_encodes_values() {
        let qs = ListParams::new().with_search("blue shirt").to_query_string();
        assert!(qs.contains("q=blue%20shirt"));
    }

    #[test]
    fn test_query_string_date_range() {
        let from = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        let qs = ListParams::new()
            .with_date_range(Some(from), Some(to))
            .to_query_string();
        assert!(qs.contains("created_from=2025-01-01"));
        assert!(qs.contains("created_to=2025-06-30"));
    }

    #[test]
    fn test_from_pairs_round_trip() {
        let params = ListParams::new()
            .with_per_page(50)
            .with_search("shirt")
            .with_filter("status", vec!["active".to_string(), "low_stock".to_string()])
            .with_sort("price")
            .with_page(3);

        let qs = params.to_query_string();
        let pairs: Vec<(String, String)> = qs
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .map(|(k, v)| {
                (
                    urlencoding::decode(k).unwrap().into_owned(),
                    urlencoding::decode(v).unwrap().into_owned(),
                )
            })
            .collect();

        assert_eq!(ListParams::from_pairs(pairs), params);
    }

    #[test]
    fn test_from_pairs_garbage_falls_back_to_defaults() {
        let params = ListParams::from_pairs([("page", "banana"), ("dir", "sideways")]);
        assert_eq!(params.page, 1);
        assert_eq!(params.dir, SortOrder::Asc);
    }

    #[test]
    fn test_from_pairs_unknown_keys_become_filters() {
        let params = ListParams::from_pairs([("role", "admin,manager"), ("q", "ada")]);
        assert_eq!(
            params.filters.get("role"),
            Some(&vec!["admin".to_string(), "manager".to_string()])
        );
        assert_eq!(params.search.as_deref(), Some("ada"));
    }

    #[test]
    fn test_per_page_clamped() {
        let params = ListParams::new().with_per_page(10_000);
        assert_eq!(params.per_page, MAX_PER_PAGE);

        let mut params = ListParams::new();
        params.per_page = 0;
        assert_eq!(params.effective_per_page(), 1);
    }
}
