//! Customer authentication routes.
//!
//! The gateway issues JWT-shaped access/refresh tokens; this layer stores
//! them in HTTP-only cookies and never hands them to client-side script.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::gateway::GatewayError;
use crate::gateway::types::GatewayTokenPair;
use crate::middleware::{
    ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE, RequireAuth,
};
use crate::models::{CurrentUser, decode_token_claims};
use crate::state::AppState;

/// Refresh token cookie lifetime.
const REFRESH_TOKEN_TTL: time::Duration = time::Duration::days(30);

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route("/me", get(me))
        .route("/logout", post(logout))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /api/auth/login
#[instrument(skip(state, jar, body), fields(email = %body.email))]
async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<(CookieJar, Json<CurrentUser>)> {
    let email = body.email.trim();
    if email.is_empty() || body.password.is_empty() {
        return Err(AppError::Validation(
            "email and password are required".to_string(),
        ));
    }

    let tokens = match state.gateway().login(email, &body.password).await {
        Ok(tokens) => tokens,
        Err(GatewayError::Unauthorized) => {
            return Err(AppError::Unauthorized("invalid credentials".to_string()));
        }
        Err(err) => return Err(err.into()),
    };

    let user = user_from_tokens(&tokens)?;
    set_sentry_user(&user.user_id, Some(&user.email));
    info!(user_id = %user.user_id, "customer logged in");

    let jar = set_token_cookies(jar, &tokens);
    Ok((jar, Json(user)))
}

/// POST /api/auth/refresh
///
/// Exchanges the refresh cookie for a fresh token pair.
#[instrument(skip(state, jar))]
async fn refresh(State(state): State<AppState>, jar: CookieJar) -> Result<Response> {
    let Some(refresh_token) = jar.get(REFRESH_TOKEN_COOKIE).map(|c| c.value().to_string())
    else {
        return Err(AppError::Unauthorized("no refresh token".to_string()));
    };

    let tokens = match state.gateway().refresh(&refresh_token).await {
        Ok(tokens) => tokens,
        Err(GatewayError::Unauthorized) => {
            // The refresh token itself is dead; force a fresh login.
            warn!("refresh token rejected by gateway");
            let jar = clear_token_cookies(jar);
            return Ok((jar, AppError::TokenExpired.into_response()).into_response());
        }
        Err(err) => return Err(err.into()),
    };

    let user = user_from_tokens(&tokens)?;
    let jar = set_token_cookies(jar, &tokens);
    Ok((jar, Json(user)).into_response())
}

/// GET /api/auth/me
///
/// Returns the customer profile from the gateway, falling back to the
/// token claims when the profile endpoint is unavailable.
#[instrument(skip(state, session))]
async fn me(
    State(state): State<AppState>,
    RequireAuth(session): RequireAuth,
) -> Result<Json<CurrentUser>> {
    match state.gateway().user_info(&session.access_token).await {
        Ok(Some(user)) => Ok(Json(user.into())),
        Ok(None) => Ok(Json(session.user)),
        Err(GatewayError::Unauthorized) => Err(AppError::TokenExpired),
        Err(err) => Err(err.into()),
    }
}

/// POST /api/auth/logout
#[instrument(skip(jar))]
async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    clear_sentry_user();
    (clear_token_cookies(jar), StatusCode::NO_CONTENT)
}

// =============================================================================
// Helpers
// =============================================================================

fn user_from_tokens(tokens: &GatewayTokenPair) -> Result<CurrentUser> {
    decode_token_claims(&tokens.access_token)
        .map(CurrentUser::from)
        .ok_or_else(|| AppError::Internal("gateway issued an unreadable access token".to_string()))
}

fn set_token_cookies(jar: CookieJar, tokens: &GatewayTokenPair) -> CookieJar {
    let access_ttl = time::Duration::seconds(i64::try_from(tokens.expires_in).unwrap_or(900));

    jar.add(auth_cookie(
        ACCESS_TOKEN_COOKIE,
        tokens.access_token.clone(),
        access_ttl,
    ))
    .add(auth_cookie(
        REFRESH_TOKEN_COOKIE,
        tokens.refresh_token.clone(),
        REFRESH_TOKEN_TTL,
    ))
}

fn clear_token_cookies(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::from(ACCESS_TOKEN_COOKIE))
        .remove(Cookie::from(REFRESH_TOKEN_COOKIE))
}

fn auth_cookie(name: &'static str, value: String, ttl: time::Duration) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(ttl)
        .build()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use base64::Engine as _;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    fn token_pair() -> GatewayTokenPair {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(
            serde_json::json!({
                "sub": 9,
                "name": "Kay",
                "email": "kay@example.com",
                "role": "customer",
                "exp": 4_000_000_000_i64,
            })
            .to_string()
            .as_bytes(),
        );
        GatewayTokenPair {
            access_token: format!("{header}.{payload}.sig"),
            refresh_token: "refresh-opaque".to_string(),
            expires_in: 900,
        }
    }

    #[test]
    fn test_user_from_tokens() {
        let user = user_from_tokens(&token_pair()).unwrap();
        assert_eq!(user.email, "kay@example.com");
        assert_eq!(user.name, "Kay");
    }

    #[test]
    fn test_user_from_unreadable_token_is_internal_error() {
        let tokens = GatewayTokenPair {
            access_token: "garbage".to_string(),
            refresh_token: String::new(),
            expires_in: 0,
        };
        assert!(matches!(
            user_from_tokens(&tokens),
            Err(AppError::Internal(_))
        ));
    }

    #[test]
    fn test_token_cookies_are_http_only() {
        let jar = set_token_cookies(CookieJar::new(), &token_pair());
        let access = jar.get(ACCESS_TOKEN_COOKIE).unwrap();
        assert_eq!(access.http_only(), Some(true));
        assert_eq!(access.max_age(), Some(time::Duration::seconds(900)));
        assert!(jar.get(REFRESH_TOKEN_COOKIE).is_some());
    }
}
