//! Cache types for catalog responses.

use super::types::{GatewayProduct, GatewayProductPage};

/// Cached value types.
///
/// Cart and auth responses are never cached - they are mutable state.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Product(Box<GatewayProduct>),
    Products(GatewayProductPage),
}
