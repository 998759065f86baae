//! Orchard Core - Shared types and list-query engine.
//!
//! This crate provides common types used across all Orchard Commerce components:
//! - `storefront` - Public-facing e-commerce API
//! - `admin` - Internal administration panel API
//! - `cli` - Command-line tools for fixtures and management
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, money, emails, and statuses
//! - [`query`] - List-query state (page/sort/filter) and the in-memory
//!   filter/sort/paginate engine behind every admin list endpoint

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod query;
pub mod types;

pub use query::{DEFAULT_PER_PAGE, ListParams, Page, Record, SortKey, SortOrder, select, total_pages};
pub use types::*;
