//! Request-scoped models for the storefront API.

mod user;

pub use user::{CurrentUser, TokenClaims, decode_token_claims};
