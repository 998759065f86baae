//! Admin panel accounts.

use chrono::{DateTime, Utc};
use serde::Serialize;

use orchard_core::{AdminRole, AdminUserId, Email};

/// An admin panel account, including the stored password hash.
///
/// Never serialized directly; [`CurrentAdmin`] is the client-facing view.
#[derive(Debug, Clone)]
pub struct AdminAccount {
    pub id: AdminUserId,
    pub name: String,
    pub email: Email,
    pub role: AdminRole,
    /// Argon2 PHC-format hash.
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// The authenticated admin attached to a request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentAdmin {
    pub id: AdminUserId,
    pub name: String,
    pub email: String,
    pub role: AdminRole,
}

impl From<&AdminAccount> for CurrentAdmin {
    fn from(account: &AdminAccount) -> Self {
        Self {
            id: account.id,
            name: account.name.clone(),
            email: account.email.to_string(),
            role: account.role,
        }
    }
}

impl CurrentAdmin {
    /// Whether this admin may perform destructive or role-gated actions.
    #[must_use]
    pub fn is_super_admin(&self) -> bool {
        self.role == AdminRole::SuperAdmin
    }
}
