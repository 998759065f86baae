//! The authenticated customer attached to a request.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};

use orchard_core::UserId;

use crate::gateway::types::GatewayUser;

/// The customer identity resolved for the current request.
///
/// Built either from the gateway's user-info endpoint or, when that
/// endpoint is unavailable, from the claims embedded in the access token.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<GatewayUser> for CurrentUser {
    fn from(user: GatewayUser) -> Self {
        Self {
            user_id: user.user_id,
            name: user.name,
            email: user.email,
            role: user.role,
        }
    }
}

/// Claims carried in the access token payload.
///
/// Only the fields the storefront needs are decoded; the signature is not
/// verified here - the gateway issued the token and validates it on every
/// upstream call.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenClaims {
    pub sub: UserId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default = "default_role")]
    pub role: String,
    /// Expiry as a Unix timestamp in seconds.
    pub exp: i64,
}

fn default_role() -> String {
    "customer".to_string()
}

impl TokenClaims {
    /// Whether the token has passed its expiry time.
    #[must_use]
    pub fn is_expired(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        self.exp <= now.timestamp()
    }
}

impl From<TokenClaims> for CurrentUser {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.sub,
            name: claims.name,
            email: claims.email,
            role: claims.role,
        }
    }
}

/// Decode the claims segment of a JWT-shaped token without verifying it.
///
/// Returns `None` if the token does not have three dot-separated segments
/// or the payload is not valid base64url JSON.
#[must_use]
pub fn decode_token_claims(token: &str) -> Option<TokenClaims> {
    let mut segments = token.split('.');
    let _header = segments.next()?;
    let payload = segments.next()?;
    // A JWT has exactly three segments
    segments.next()?;
    if segments.next().is_some() {
        return None;
    }

    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    serde_json::from_slice(&bytes).ok()
}
