//! In-memory filter/sort/paginate engine.
//!
//! A direct, single-pass implementation: substring search, then inclusion
//! filters, then the date range, then a single-key sort (O(n log n)), then
//! the pagination slice. No caching and no incremental update; collections
//! are small enough that recomputing per request is the simplest correct
//! thing.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::params::ListParams;

/// A sortable key extracted from a record.
///
/// Text keys compare case-insensitively (the `localeCompare` analog),
/// numbers as decimals, dates chronologically.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Text(String),
    Number(Decimal),
    Date(DateTime<Utc>),
}

impl SortKey {
    fn compare(&self, other: &Self) -> std::cmp::Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (Self::Number(a), Self::Number(b)) => a.cmp(b),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            // Mismatched key types should not happen for a well-behaved
            // Record impl; treat them as equal rather than panic.
            _ => std::cmp::Ordering::Equal,
        }
    }
}

/// A record that can be searched, filtered, and sorted by the engine.
pub trait Record {
    /// Fields matched by the free-text search (typically 1-2 fields).
    fn search_fields(&self) -> Vec<&str>;

    /// The record's value for an inclusion-filter key, if the key is
    /// filterable.
    fn filter_field(&self, key: &str) -> Option<String>;

    /// The record's sort key for a column, if the column is sortable.
    fn sort_key(&self, key: &str) -> Option<SortKey>;

    /// Creation timestamp, used by the date-range filter.
    fn created_at(&self) -> Option<DateTime<Utc>>;
}

/// One page of results.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
    pub total_pages: u32,
}

/// Pagination arithmetic: `ceil(total / per_page)`.
#[must_use]
pub fn total_pages(total: u64, per_page: u32) -> u32 {
    if per_page == 0 {
        return 0;
    }
    let pages = total.div_ceil(u64::from(per_page));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Apply search, filters, sort, and pagination to a collection.
///
/// Filter semantics: OR within a filter group's value list, AND across
/// groups; values compare case-insensitively. The date range is inclusive
/// on both ends. An unknown sort key leaves the input order untouched. A
/// page past the end yields an empty item list with the true totals.
pub fn select<T: Record + Clone>(items: &[T], params: &ListParams) -> Page<T> {
    let mut matched: Vec<&T> = items
        .iter()
        .filter(|item| matches_search(*item, params))
        .filter(|item| matches_filters(*item, params))
        .filter(|item| matches_date_range(*item, params))
        .collect();

    if let Some(sort) = params.sort.as_deref() {
        matched.sort_by(|a, b| {
            let ord = match (a.sort_key(sort), b.sort_key(sort)) {
                (Some(ka), Some(kb)) => ka.compare(&kb),
                // Records missing the key sort after those that have it.
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            };
            match params.dir {
                super::params::SortOrder::Asc => ord,
                super::params::SortOrder::Desc => ord.reverse(),
            }
        });
    }

    let total = matched.len() as u64;
    let page = params.effective_page();
    let per_page = params.effective_per_page();
    let offset = (page - 1) as usize * per_page as usize;

    let items = matched
        .into_iter()
        .skip(offset)
        .take(per_page as usize)
        .cloned()
        .collect();

    Page {
        items,
        page,
        per_page,
        total,
        total_pages: total_pages(total, per_page),
    }
}

fn matches_search<T: Record>(item: &T, params: &ListParams) -> bool {
    let Some(search) = params.search.as_deref() else {
        return true;
    };
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    item.search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

fn matches_filters<T: Record>(item: &T, params: &ListParams) -> bool {
    params.filters.iter().all(|(key, values)| {
        if values.is_empty() {
            return true;
        }
        item.filter_field(key).is_some_and(|actual| {
            values.iter().any(|v| v.eq_ignore_ascii_case(&actual))
        })
    })
}

fn matches_date_range<T: Record>(item: &T, params: &ListParams) -> bool {
    if params.created_from.is_none() && params.created_to.is_none() {
        return true;
    }
    let Some(created) = item.created_at() else {
        return false;
    };
    let date = created.date_naive();
    if let Some(from) = params.created_from
        && date < from
    {
        return false;
    }
    if let Some(to) = params.created_to
        && date > to
    {
        return false;
    }
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[derive(Debug, Clone)]
    struct Item {
        name: String,
        email: String,
        role: String,
        status: String,
        price: Decimal,
        created_at: DateTime<Utc>,
    }

    impl Record for Item {
        fn search_fields(&self) -> Vec<&str> {
            vec![&self.name, &self.email]
        }

        fn filter_field(&self, key: &str) -> Option<String> {
            match key {
                "role" => Some(self.role.clone()),
                "status" => Some(self.status.clone()),
                _ => None,
            }
        }

        fn sort_key(&self, key: &str) -> Option<SortKey> {
            match key {
                "name" => Some(SortKey::Text(self.name.clone())),
                "price" => Some(SortKey::Number(self.price)),
                "created" => Some(SortKey::Date(self.created_at)),
                _ => None,
            }
        }

        fn created_at(&self) -> Option<DateTime<Utc>> {
            Some(self.created_at)
        }
    }

    fn item(name: &str, email: &str, role: &str, status: &str, price: i64, day: u32) -> Item {
        Item {
            name: name.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            status: status.to_string(),
            price: Decimal::new(price, 2),
            created_at: Utc.with_ymd_and_hms(2025, 3, day, 12, 0, 0).unwrap(),
        }
    }

    fn fixture() -> Vec<Item> {
        vec![
            item("Alice", "alice@example.com", "admin", "active", 1000, 1),
            item("bob", "bob@example.com", "customer", "active", 500, 5),
            item("Carol", "carol@shop.test", "customer", "inactive", 2500, 10),
            item("dave", "dave@shop.test", "manager", "suspended", 750, 15),
            item("Erin", "erin@example.com", "customer", "active", 1500, 20),
        ]
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let items = fixture();
        let page = select(&items, &ListParams::new().with_search("BOB"));
        assert_eq!(page.total, 1);
        assert_eq!(page.items.first().unwrap().name, "bob");

        // Matches across either search field
        let page = select(&items, &ListParams::new().with_search("shop.test"));
        assert_eq!(page.total, 2);
    }

    #[test]
    fn test_filter_or_within_group() {
        let items = fixture();
        let params = ListParams::new().with_filter(
            "role",
            vec!["admin".to_string(), "manager".to_string()],
        );
        let page = select(&items, &params);
        assert_eq!(page.total, 2);
    }

    #[test]
    fn test_filter_and_across_groups() {
        let items = fixture();
        let params = ListParams::new()
            .with_filter("role", vec!["customer".to_string()])
            .with_filter("status", vec!["active".to_string()]);
        let page = select(&items, &params);
        assert_eq!(page.total, 2);
        assert!(page.items.iter().all(|i| i.role == "customer"));
        assert!(page.items.iter().all(|i| i.status == "active"));
    }

    #[test]
    fn test_filter_values_case_insensitive() {
        let items = fixture();
        let params = ListParams::new().with_filter("role", vec!["ADMIN".to_string()]);
        assert_eq!(select(&items, &params).total, 1);
    }

    #[test]
    fn test_date_range_inclusive() {
        let items = fixture();
        let from = chrono::NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
        let to = chrono::NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        let params = ListParams::new().with_date_range(Some(from), Some(to));
        let page = select(&items, &params);
        assert_eq!(page.total, 3); // bob (5th), Carol (10th), dave (15th)
    }

    #[test]
    fn test_text_sort_case_insensitive() {
        let items = fixture();
        let page = select(&items, &ListParams::new().with_sort("name"));
        let names: Vec<&str> = page.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "bob", "Carol", "dave", "Erin"]);
    }

    #[test]
    fn test_numeric_sort_descending() {
        let items = fixture();
        let params = ListParams::new().with_sort("price").with_sort("price");
        let page = select(&items, &params);
        let prices: Vec<Decimal> = page.items.iter().map(|i| i.price).collect();
        assert_eq!(
            prices,
            vec![
                Decimal::new(2500, 2),
                Decimal::new(1500, 2),
                Decimal::new(1000, 2),
                Decimal::new(750, 2),
                Decimal::new(500, 2)
            ]
        );
    }

    #[test]
    fn test_unknown_sort_key_keeps_input_order() {
        let items = fixture();
        let page = select(&items, &ListParams::new().with_sort("nonsense"));
        let names: Vec<&str> = page.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "bob", "Carol", "dave", "Erin"]);
    }

    #[test]
    fn test_pagination_slicing() {
        let items = fixture();
        let params = ListParams::new().with_per_page(2).with_page(2);
        let page = select(&items, &params);
        assert_eq!(page.total, 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items.first().unwrap().name, "Carol");
    }

    #[test]
    fn test_page_past_end_is_empty_with_true_totals() {
        let items = fixture();
        let params = ListParams::new().with_per_page(2).with_page(9);
        let page = select(&items, &params);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 5);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_total_pages_arithmetic() {
        assert_eq!(total_pages(0, 20), 0);
        assert_eq!(total_pages(1, 20), 1);
        assert_eq!(total_pages(20, 20), 1);
        assert_eq!(total_pages(21, 20), 2);
        assert_eq!(total_pages(41, 20), 3);
    }

    #[test]
    fn test_empty_collection() {
        let items: Vec<Item> = vec![];
        let page = select(&items, &ListParams::new());
        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn test_combined_search_filter_sort_page() {
        let items = fixture();
        let params = ListParams::new()
            .with_search("example.com")
            .with_filter("status", vec!["active".to_string()])
            .with_sort("price")
            .with_per_page(2);
        let page = select(&items, &params);
        assert_eq!(page.total, 3);
        assert_eq!(page.total_pages, 2);
        let names: Vec<&str> = page.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["bob", "Alice"]);
    }
}
