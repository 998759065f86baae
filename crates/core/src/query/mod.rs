//! List-query state and the in-memory collection engine.
//!
//! Every admin list endpoint follows the same shape: client-held query
//! state (page, page size, sort column/direction, filter groups) is encoded
//! into a query string, and the serving handler applies search, inclusion
//! filters, a date range, a single-key sort, and a pagination slice over an
//! in-memory collection. [`params`] models the state and its transitions;
//! [`engine`] applies it to records.

pub mod engine;
pub mod params;

pub use engine::{Page, Record, SortKey, select, total_pages};
pub use params::{DEFAULT_PER_PAGE, ListParams, SortOrder};
