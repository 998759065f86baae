//! CLI command implementations.

pub mod admin;
pub mod seed;

use thiserror::Error;

/// Errors surfaced by any CLI command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Building the seeded store failed.
    #[error("Store error: {0}")]
    Store(#[from] orchard_admin::error::AdminError),

    /// Writing a fixture file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing a fixture collection failed.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Password hashing failed.
    #[error("Password hashing failed: {0}")]
    Hash(String),
}
