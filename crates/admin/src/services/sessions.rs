//! In-memory admin session store.
//!
//! Sessions are opaque random tokens mapped to the authenticated admin,
//! held in process memory. Restarting the binary logs every admin out,
//! which is acceptable for the admin panel's usage pattern.

use std::collections::HashMap;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, Utc};
use rand::Rng as _;
use tokio::sync::RwLock;

use crate::models::CurrentAdmin;

/// Number of random bytes in a session token.
const TOKEN_BYTES: usize = 32;

#[derive(Debug, Clone)]
struct AdminSession {
    admin: CurrentAdmin,
    expires_at: DateTime<Utc>,
}

/// Outcome of resolving a session token.
#[derive(Debug)]
pub enum SessionLookup {
    /// Token maps to a live session.
    Active(CurrentAdmin),
    /// Token was known but its session has expired.
    Expired,
    /// Token is unknown.
    Missing,
}

/// Token-to-admin session map with expiry.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, AdminSession>>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session for an admin and return the opaque token.
    pub async fn create(&self, admin: CurrentAdmin, ttl: Duration) -> String {
        let token = generate_token();
        let session = AdminSession {
            admin,
            expires_at: Utc::now() + ttl,
        };
        self.sessions.write().await.insert(token.clone(), session);
        token
    }

    /// Resolve a token to its admin. Expired sessions are removed on read
    /// but still reported as [`SessionLookup::Expired`] so the caller can
    /// tell a stale cookie from a missing one.
    pub async fn lookup(&self, token: &str) -> SessionLookup {
        {
            let sessions = self.sessions.read().await;
            let Some(session) = sessions.get(token) else {
                return SessionLookup::Missing;
            };
            if session.expires_at > Utc::now() {
                return SessionLookup::Active(session.admin.clone());
            }
        }
        // Lazily drop the expired entry.
        self.sessions.write().await.remove(token);
        SessionLookup::Expired
    }

    /// Resolve a token to its admin, collapsing expiry into `None`.
    pub async fn get(&self, token: &str) -> Option<CurrentAdmin> {
        match self.lookup(token).await {
            SessionLookup::Active(admin) => Some(admin),
            SessionLookup::Expired | SessionLookup::Missing => None,
        }
    }

    /// Remove a session. A no-op for unknown tokens.
    pub async fn revoke(&self, token: &str) {
        self.sessions.write().await.remove(token);
    }

    /// Drop all expired sessions. Returns the number removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.expires_at > now);
        before - sessions.len()
    }

    /// Number of live sessions (including not-yet-purged expired ones).
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

fn generate_token() -> String {
    let bytes: [u8; TOKEN_BYTES] = rand::rng().random();
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use orchard_core::{AdminRole, AdminUserId};

    fn admin() -> CurrentAdmin {
        CurrentAdmin {
            id: AdminUserId::from(1),
            name: "Root".to_string(),
            email: "root@example.com".to_string(),
            role: AdminRole::SuperAdmin,
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let store = SessionStore::new();
        let token = store.create(admin(), Duration::hours(24)).await;

        let resolved = store.get(&token).await.unwrap();
        assert_eq!(resolved.id, AdminUserId::from(1));
        assert_eq!(resolved.role, AdminRole::SuperAdmin);
    }

    #[tokio::test]
    async fn test_unknown_token() {
        let store = SessionStore::new();
        assert!(store.get("nope").await.is_none());
    }

    #[tokio::test]
    async fn test_expired_session_is_removed_on_read() {
        let store = SessionStore::new();
        let token = store.create(admin(), Duration::seconds(-1)).await;

        assert!(matches!(
            store.lookup(&token).await,
            SessionLookup::Expired
        ));
        assert!(store.is_empty().await);
        // A second read no longer finds the token at all.
        assert!(matches!(
            store.lookup(&token).await,
            SessionLookup::Missing
        ));
    }

    #[tokio::test]
    async fn test_revoke() {
        let store = SessionStore::new();
        let token = store.create(admin(), Duration::hours(1)).await;
        store.revoke(&token).await;
        assert!(store.get(&token).await.is_none());
    }

    #[tokio::test]
    async fn test_purge_expired() {
        let store = SessionStore::new();
        let _live = store.create(admin(), Duration::hours(1)).await;
        let _dead = store.create(admin(), Duration::seconds(-1)).await;

        assert_eq!(store.purge_expired().await, 1);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_tokens_are_unique() {
        let store = SessionStore::new();
        let a = store.create(admin(), Duration::hours(1)).await;
        let b = store.create(admin(), Duration::hours(1)).await;
        assert_ne!(a, b);
    }
}
