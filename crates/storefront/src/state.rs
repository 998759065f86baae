//! Shared application state.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::config::StorefrontConfig;
use crate::gateway::GatewayClient;

/// Shared application state, cheap to clone.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    gateway: GatewayClient,
}

impl AppState {
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let gateway = GatewayClient::new(&config.gateway);
        Self {
            inner: Arc::new(AppStateInner { config, gateway }),
        }
    }

    #[must_use]
    pub fn gateway(&self) -> &GatewayClient {
        &self.inner.gateway
    }

    /// Sales tax rate applied to discounted subtotals.
    #[must_use]
    pub fn tax_rate(&self) -> Decimal {
        self.inner.config.tax_rate
    }

    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }
}
