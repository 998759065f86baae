//! Shared application state.

use std::sync::Arc;

use chrono::Duration;

use crate::config::AdminConfig;
use crate::error::Result;
use crate::payments::PaymentsClient;
use crate::services::sessions::SessionStore;
use crate::store::MockStore;

/// Shared application state, cheap to clone.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    store: MockStore,
    sessions: SessionStore,
    payments: PaymentsClient,
}

impl AppState {
    /// Build the state: seeded collections, empty session store, payment
    /// service client.
    ///
    /// # Errors
    ///
    /// Returns an error if seeding the mock store fails.
    pub fn new(config: AdminConfig) -> Result<Self> {
        let store = MockStore::seeded()?;
        let payments = PaymentsClient::new(&config.payments);
        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                sessions: SessionStore::new(),
                payments,
            }),
        })
    }

    #[must_use]
    pub fn store(&self) -> &MockStore {
        &self.inner.store
    }

    #[must_use]
    pub fn sessions(&self) -> &SessionStore {
        &self.inner.sessions
    }

    #[must_use]
    pub fn payments(&self) -> &PaymentsClient {
        &self.inner.payments
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Admin session lifetime from config.
    #[must_use]
    pub fn session_ttl(&self) -> Duration {
        Duration::hours(i64::try_from(self.inner.config.session_ttl_hours).unwrap_or(24))
    }
}
