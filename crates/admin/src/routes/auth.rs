//! Admin authentication routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::error::{AdminError, Result};
use crate::middleware::{ADMIN_TOKEN_COOKIE, RequireAdminAuth};
use crate::models::CurrentAdmin;
use crate::services::passwords;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /api/admin/auth/login
///
/// Verifies credentials and issues an opaque session token in the
/// `admin_token` cookie. Unknown email and wrong password produce the
/// same response.
#[instrument(skip(state, jar, body), fields(email = %body.email))]
async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<(CookieJar, Json<CurrentAdmin>)> {
    let email = body.email.trim();
    if email.is_empty() || body.password.is_empty() {
        return Err(AdminError::Validation(
            "email and password are required".to_string(),
        ));
    }

    let account = state.store().find_admin_by_email(email).await;
    let verified = account
        .as_ref()
        .is_some_and(|a| passwords::verify_password(&body.password, &a.password_hash));

    let Some(account) = account.filter(|_| verified) else {
        warn!("failed admin login attempt");
        return Err(AdminError::Unauthorized("invalid credentials".to_string()));
    };

    let admin = CurrentAdmin::from(&account);
    let token = state
        .sessions()
        .create(admin.clone(), state.session_ttl())
        .await;

    info!(admin_id = %admin.id, "admin logged in");

    let ttl_seconds = state.session_ttl().num_seconds();
    let cookie = Cookie::build((ADMIN_TOKEN_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(ttl_seconds))
        .build();

    Ok((jar.add(cookie), Json(admin)))
}

/// POST /api/admin/auth/logout
#[instrument(skip(state, jar))]
async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, StatusCode) {
    if let Some(cookie) = jar.get(ADMIN_TOKEN_COOKIE) {
        state.sessions().revoke(cookie.value()).await;
    }
    (
        jar.remove(Cookie::from(ADMIN_TOKEN_COOKIE)),
        StatusCode::NO_CONTENT,
    )
}

/// GET /api/admin/auth/me
#[instrument(skip(admin))]
async fn me(RequireAdminAuth(admin): RequireAdminAuth) -> Json<CurrentAdmin> {
    Json(admin)
}
