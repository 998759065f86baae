//! Data table configuration.
//!
//! Every admin list page renders the same table component; each entity's
//! `/table` endpoint serves one of these configs so the client knows which
//! columns, sorts, filters, and bulk actions the list supports.

use serde::Serialize;

use orchard_core::{DEFAULT_PER_PAGE, SortOrder};

/// Full table configuration for one entity list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableConfig {
    pub columns: Vec<TableColumn>,
    pub filters: Vec<TableFilter>,
    /// Actions the client may apply to a row selection.
    pub bulk_actions: Vec<BulkAction>,
    /// Sort applied when the page first loads.
    pub default_sort: Option<DefaultSort>,
    pub per_page_options: Vec<u32>,
    pub default_per_page: u32,
    /// Whether the list endpoint supports the free-text `q` parameter.
    pub searchable: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultSort {
    pub key: String,
    pub dir: SortOrder,
}

/// Column definition for a data table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableColumn {
    /// Unique key for the column; sortable columns pass this as `sort`.
    pub key: String,
    /// Display label for the column header.
    pub label: String,
    pub sortable: bool,
}

/// Filter definition for a data table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableFilter {
    /// Query parameter key for the filter group.
    pub key: String,
    pub label: String,
    pub filter_type: FilterType,
    /// Available options (for select/multiselect).
    pub options: Vec<FilterOption>,
}

/// Filter widget type.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterType {
    /// Single-select dropdown.
    Select,
    /// Multi-select; values are comma-joined in the query string.
    MultiSelect,
    /// Date range mapped to `created_from`/`created_to`.
    DateRange,
}

/// Option for select/multiselect filters.
#[derive(Debug, Clone, Serialize)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

/// Bulk action applied to a row selection.
#[derive(Debug, Clone, Serialize)]
pub struct BulkAction {
    /// Action key the client sends back with the selected IDs.
    pub key: String,
    pub label: String,
    /// Destructive actions get a confirmation step in the client.
    pub destructive: bool,
}

impl TableConfig {
    /// Start a config with the shared pagination defaults.
    #[must_use]
    pub fn new(columns: Vec<TableColumn>) -> Self {
        Self {
            columns,
            filters: vec![],
            bulk_actions: vec![],
            default_sort: None,
            per_page_options: vec![10, 20, 50, 100],
            default_per_page: DEFAULT_PER_PAGE,
            searchable: true,
        }
    }

    #[must_use]
    pub fn with_filters(mut self, filters: Vec<TableFilter>) -> Self {
        self.filters = filters;
        self
    }

    #[must_use]
    pub fn with_bulk_actions(mut self, bulk_actions: Vec<BulkAction>) -> Self {
        self.bulk_actions = bulk_actions;
        self
    }

    #[must_use]
    pub fn with_default_sort(mut self, key: &str, dir: SortOrder) -> Self {
        self.default_sort = Some(DefaultSort {
            key: key.to_string(),
            dir,
        });
        self
    }

    #[must_use]
    pub const fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }
}

impl TableColumn {
    /// A sortable column.
    #[must_use]
    pub fn sortable(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            sortable: true,
        }
    }

    /// A display-only column.
    #[must_use]
    pub fn plain(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            sortable: false,
        }
    }
}

impl TableFilter {
    /// A single-select filter.
    #[must_use]
    pub fn select(key: &str, label: &str, options: Vec<FilterOption>) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            filter_type: FilterType::Select,
            options,
        }
    }

    /// A multi-select filter; chosen values are comma-joined.
    #[must_use]
    pub fn multi_select(key: &str, label: &str, options: Vec<FilterOption>) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            filter_type: FilterType::MultiSelect,
            options,
        }
    }

    /// A creation-date range filter.
    #[must_use]
    pub fn date_range(label: &str) -> Self {
        Self {
            key: "created".to_string(),
            label: label.to_string(),
            filter_type: FilterType::DateRange,
            options: vec![],
        }
    }
}

impl FilterOption {
    #[must_use]
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

impl BulkAction {
    #[must_use]
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            destructive: false,
        }
    }

    /// Mark this action as destructive.
    #[must_use]
    pub const fn destructive(mut self) -> Self {
        self.destructive = true;
        self
    }
}
