//! Integration tests for Orchard Commerce.
//!
//! The tests in `tests/` exercise the two binaries over HTTP, so they are
//! all `#[ignore]`d by default.
//!
//! # Running Tests
//!
//! ```bash
//! # Start both binaries (in separate shells)
//! cargo run -p orchard-admin
//! cargo run -p orchard-storefront
//!
//! # Run integration tests
//! cargo test -p orchard-integration-tests -- --ignored
//! ```
//!
//! # Environment
//!
//! - `ADMIN_BASE_URL` - defaults to `http://localhost:4001`
//! - `STOREFRONT_BASE_URL` - defaults to `http://localhost:4000`
//!
//! Admin tests log in with the seeded dev accounts, so the admin binary
//! must be running with its default seed data.

use reqwest::Client;

/// Base URL for the admin API (configurable via environment).
#[must_use]
pub fn admin_base_url() -> String {
    std::env::var("ADMIN_BASE_URL").unwrap_or_else(|_| "http://localhost:4001".to_string())
}

/// Base URL for the storefront API (configurable via environment).
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:4000".to_string())
}

/// A cookie-holding client, as both apps authenticate via cookies.
///
/// # Panics
///
/// Panics if the client cannot be built; acceptable in test setup.
#[must_use]
pub fn cookie_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Log in to the admin API with the seeded super-admin account.
///
/// # Panics
///
/// Panics if the login request fails or is rejected.
pub async fn admin_login(client: &Client) {
    let base_url = admin_base_url();
    let resp = client
        .post(format!("{base_url}/api/admin/auth/login"))
        .json(&serde_json::json!({
            "email": "root@orchard.test",
            "password": "orchard-dev-root",
        }))
        .send()
        .await
        .expect("Failed to send login request");

    assert!(
        resp.status().is_success(),
        "admin login failed: {}",
        resp.status()
    );
}
