//! Integration tests for the admin auth lifecycle.
//!
//! These tests require the admin server running with its default seed
//! data (`cargo run -p orchard-admin`).
//!
//! Run with: `cargo test -p orchard-integration-tests -- --ignored`

#![allow(clippy::unwrap_used)]

use orchard_integration_tests::{admin_base_url, admin_login, cookie_client};
use reqwest::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
#[ignore = "Requires running admin server"]
async fn test_login_sets_session_and_me_works() {
    let client = cookie_client();
    let base_url = admin_base_url();

    admin_login(&client).await;

    let resp = client
        .get(format!("{base_url}/api/admin/auth/me"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["email"], "root@orchard.test");
    assert_eq!(body["role"], "super_admin");
}

#[tokio::test]
#[ignore = "Requires running admin server"]
async fn test_wrong_password_is_unauthorized() {
    let client = cookie_client();
    let base_url = admin_base_url();

    let resp = client
        .post(format!("{base_url}/api/admin/auth/login"))
        .json(&json!({
            "email": "root@orchard.test",
            "password": "not-the-password",
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
#[ignore = "Requires running admin server"]
async fn test_me_without_session_is_unauthorized() {
    let client = cookie_client();
    let base_url = admin_base_url();

    let resp = client
        .get(format!("{base_url}/api/admin/auth/me"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running admin server"]
async fn test_logout_revokes_session() {
    let client = cookie_client();
    let base_url = admin_base_url();

    admin_login(&client).await;

    let resp = client
        .post(format!("{base_url}/api/admin/auth/logout"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = client
        .get(format!("{base_url}/api/admin/auth/me"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
