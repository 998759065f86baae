//! Admin credential commands.

use orchard_admin::services::passwords;

use super::CliError;

/// Hash a password into PHC string format, suitable for an admin
/// account's `password_hash`.
///
/// # Errors
///
/// Returns `CliError::Hash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, CliError> {
    if password.is_empty() {
        return Err(CliError::Hash("password must not be empty".to_string()));
    }
    passwords::hash_password(password).map_err(|e| CliError::Hash(e.to_string()))
}
