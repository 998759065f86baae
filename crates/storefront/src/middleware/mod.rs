//! Request middleware and extractors.

pub mod auth;

pub use auth::{ACCESS_TOKEN_COOKIE, CART_COUPON_COOKIE, CART_ID_COOKIE, REFRESH_TOKEN_COOKIE};
pub use auth::{AuthSession, OptionalAuth, RequireAuth};
