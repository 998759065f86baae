//! Shared UI-facing configuration types.

pub mod data_table;
