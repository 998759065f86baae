//! Customer authentication extractors.
//!
//! Tokens live in HTTP-only cookies set by the auth routes. The extractors
//! decode the access token's claims locally; routes that need the full
//! profile call the gateway themselves.

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::CookieJar;

use crate::error::AppError;
use crate::models::{CurrentUser, decode_token_claims};

/// Cookie holding the short-lived access token.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Cookie holding the refresh token.
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

/// Cookie holding the remote cart ID.
pub const CART_ID_COOKIE: &str = "cart_id";

/// Cookie holding the currently applied coupon code.
pub const CART_COUPON_COOKIE: &str = "cart_coupon";

/// An authenticated customer session.
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// The raw access token, for forwarding to the gateway.
    pub access_token: String,
    /// The customer derived from the token claims.
    pub user: CurrentUser,
}

/// Extractor that requires a valid, unexpired access token.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(session): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}", session.user.name)
/// }
/// ```
pub struct RequireAuth(pub AuthSession);

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match extract_session(parts, state).await {
            Some(session) => {
                crate::error::set_sentry_user(&session.user.user_id, Some(&session.user.email));
                Ok(Self(session))
            }
            None => {
                // Distinguish "expired" from "missing" so the client knows
                // whether a refresh is worth attempting.
                let jar = CookieJar::from_headers(&parts.headers);
                if jar.get(ACCESS_TOKEN_COOKIE).is_some() {
                    Err(AppError::TokenExpired)
                } else {
                    Err(AppError::Unauthorized("not logged in".to_string()))
                }
            }
        }
    }
}

/// Extractor that optionally resolves the customer session.
///
/// Never rejects; yields `None` for guests and for expired tokens.
pub struct OptionalAuth(pub Option<AuthSession>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(extract_session(parts, state).await))
    }
}

async fn extract_session<S: Send + Sync>(parts: &mut Parts, _state: &S) -> Option<AuthSession> {
    let jar = CookieJar::from_headers(&parts.headers);
    let token = jar.get(ACCESS_TOKEN_COOKIE)?.value().to_string();

    let claims = decode_token_claims(&token)?;
    if claims.is_expired(chrono::Utc::now()) {
        return None;
    }

    Some(AuthSession {
        access_token: token,
        user: claims.into(),
    })
}
