//! Authentication extractors for admin routes.
//!
//! The login route stores an opaque session token in the `admin_token`
//! cookie; these extractors resolve it against the in-memory session
//! store.

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::CookieJar;

use crate::error::AdminError;
use crate::models::CurrentAdmin;
use crate::services::sessions::SessionLookup;
use crate::state::AppState;

/// Cookie holding the admin session token.
pub const ADMIN_TOKEN_COOKIE: &str = "admin_token";

/// Extractor that requires an authenticated admin.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAdminAuth(admin): RequireAdminAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", admin.name)
/// }
/// ```
pub struct RequireAdminAuth(pub CurrentAdmin);

impl FromRequestParts<AppState> for RequireAdminAuth {
    type Rejection = AdminError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        resolve_admin(parts, state).await.map(Self)
    }
}

/// Extractor that requires a super admin.
///
/// Rejects with 401 when not logged in and 403 when logged in without the
/// `super_admin` role.
pub struct RequireSuperAdmin(pub CurrentAdmin);

impl FromRequestParts<AppState> for RequireSuperAdmin {
    type Rejection = AdminError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let admin = resolve_admin(parts, state).await?;

        if !admin.is_super_admin() {
            return Err(AdminError::Forbidden(
                "only super admins can access this resource".to_string(),
            ));
        }
        Ok(Self(admin))
    }
}

/// A stale cookie (expired session) is distinguished from no cookie so
/// the client knows to re-authenticate rather than treat it as a bug.
async fn resolve_admin(parts: &Parts, state: &AppState) -> Result<CurrentAdmin, AdminError> {
    let jar = CookieJar::from_headers(&parts.headers);
    let token = jar
        .get(ADMIN_TOKEN_COOKIE)
        .ok_or_else(|| AdminError::Unauthorized("not logged in".to_string()))?
        .value()
        .to_string();

    match state.sessions().lookup(&token).await {
        SessionLookup::Active(admin) => Ok(admin),
        SessionLookup::Expired => Err(AdminError::TokenExpired),
        SessionLookup::Missing => Err(AdminError::Unauthorized("not logged in".to_string())),
    }
}
