// Principal lookup for the privileged surface.
//
// Today there is exactly one principal: the statically configured
// super-admin. The trait exists so additional admins or roles can be
// added behind a new store without touching the issuer or verifier.

use bcrypt::DEFAULT_COST;
use serde::Serialize;

use crate::config;

/// An identity allowed to request a super-admin token.
#[derive(Debug, Clone, Serialize)]
pub struct Principal {
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

#[derive(Debug, thiserror::Error)]
pub enum PrincipalError {
    #[error("missing configuration: {0}")]
    MissingConfig(&'static str),
}

pub trait PrincipalStore: Send + Sync {
    /// Look up a principal by email, case-insensitively. `Ok(None)`
    /// means no such principal; `Err` means the store itself is
    /// unusable (a server-side problem, not a caller mistake).
    fn find_by_email(&self, email: &str) -> Result<Option<Principal>, PrincipalError>;
}

/// The single production store: reads the super-admin credential pair
/// from process configuration.
pub struct ConfigPrincipalStore;

impl PrincipalStore for ConfigPrincipalStore {
    fn find_by_email(&self, email: &str) -> Result<Option<Principal>, PrincipalError> {
        let security = &config::config().security;

        let admin_email = security
            .admin_email
            .as_deref()
            .ok_or(PrincipalError::MissingConfig("ADMIN_EMAIL"))?;
        let password_hash = security
            .admin_password_hash
            .as_deref()
            .ok_or(PrincipalError::MissingConfig("ADMIN_PASSWORD_HASH"))?;

        if !admin_email.eq_ignore_ascii_case(email.trim()) {
            return Ok(None);
        }

        Ok(Some(Principal {
            email: admin_email.to_lowercase(),
            password_hash: password_hash.to_string(),
        }))
    }
}

/// Hash a password for storage. Shared by tenant registration and by
/// operators generating the super-admin hash out of band.
pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(password, DEFAULT_COST)
}

/// Check a password against a stored bcrypt hash. An unparseable hash
/// counts as a failed check rather than an error; credential checks
/// fail closed.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    bcrypt::verify(password, password_hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_round_trip() {
        let hash = hash_password("secret123").unwrap();
        assert!(verify_password("secret123", &hash));
        assert!(!verify_password("secret124", &hash));
    }

    #[test]
    fn malformed_hash_fails_closed() {
        assert!(!verify_password("secret123", "not-a-bcrypt-hash"));
    }
}
