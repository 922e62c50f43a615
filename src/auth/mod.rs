pub mod principal;
pub mod token;

pub use principal::{hash_password, ConfigPrincipalStore, PrincipalStore};
pub use token::{Claims, VerifyError, SUPER_ADMIN_SUBJECT, TOKEN_TTL_SECS};

use chrono::Utc;

use crate::config;
use principal::PrincipalError;

/// Generic message for every credential failure. Wrong email and wrong
/// password are intentionally indistinguishable to the caller.
pub const INVALID_CREDENTIALS: &str = "Credenciais inválidas";

/// Generic message for every token failure on the privileged surface.
pub const INVALID_TOKEN: &str = "Token inválido ou expirado";

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("{}", INVALID_CREDENTIALS)]
    InvalidCredentials,
    #[error("missing configuration: {0}")]
    MissingConfig(&'static str),
    #[error("token signing failed: {0}")]
    Sign(#[from] token::SignError),
}

impl From<PrincipalError> for LoginError {
    fn from(err: PrincipalError) -> Self {
        match err {
            PrincipalError::MissingConfig(name) => LoginError::MissingConfig(name),
        }
    }
}

/// Authenticate the configured super-admin and mint a signed token.
pub fn login(email: &str, password: &str) -> Result<String, LoginError> {
    let secret = config::config()
        .security
        .token_secret
        .clone()
        .ok_or(LoginError::MissingConfig("ADMIN_TOKEN_SECRET"))?;

    login_with_store(&ConfigPrincipalStore, &secret, email, password, Utc::now().timestamp())
}

/// Issuer core, parameterized over the principal store and clock so the
/// credential flow is testable without process configuration.
pub fn login_with_store(
    store: &dyn PrincipalStore,
    secret: &str,
    email: &str,
    password: &str,
    now: i64,
) -> Result<String, LoginError> {
    let Some(admin) = store.find_by_email(email)? else {
        return Err(LoginError::InvalidCredentials);
    };

    if !principal::verify_password(password, &admin.password_hash) {
        return Err(LoginError::InvalidCredentials);
    }

    let claims = Claims::super_admin(&admin.email, now);
    let jwt = token::sign(&claims, secret)?;

    tracing::info!(email = %admin.email, "super admin login");
    Ok(jwt)
}

/// Verify a bearer token against the configured signing secret. Every
/// failure path resolves to `Err`; the reason is logged at debug level
/// and never exposed to the caller.
pub fn verify_admin_token(bearer: &str) -> Result<Claims, VerifyError> {
    let Some(secret) = config::config().security.token_secret.as_deref() else {
        tracing::error!("ADMIN_TOKEN_SECRET is not configured; rejecting all admin tokens");
        return Err(VerifyError::BadSignature);
    };

    token::verify(bearer, secret, Utc::now().timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use principal::Principal;

    struct StubStore {
        email: String,
        password_hash: String,
    }

    impl PrincipalStore for StubStore {
        fn find_by_email(&self, email: &str) -> Result<Option<Principal>, PrincipalError> {
            if self.email.eq_ignore_ascii_case(email.trim()) {
                Ok(Some(Principal {
                    email: self.email.to_lowercase(),
                    password_hash: self.password_hash.clone(),
                }))
            } else {
                Ok(None)
            }
        }
    }

    struct BrokenStore;

    impl PrincipalStore for BrokenStore {
        fn find_by_email(&self, _email: &str) -> Result<Option<Principal>, PrincipalError> {
            Err(PrincipalError::MissingConfig("ADMIN_EMAIL"))
        }
    }

    fn store() -> StubStore {
        StubStore {
            email: "admin@x.com".to_string(),
            password_hash: hash_password("secret123").unwrap(),
        }
    }

    #[test]
    fn login_succeeds_with_case_insensitive_email() {
        let now = 1_700_000_000;
        let token = login_with_store(&store(), "k", "ADMIN@X.COM", "secret123", now).unwrap();
        let claims = token::verify(&token, "k", now).unwrap();
        assert_eq!(claims.sub, SUPER_ADMIN_SUBJECT);
        assert_eq!(claims.email, "admin@x.com");
        assert_eq!(claims.exp, Some(now + TOKEN_TTL_SECS));
    }

    #[test]
    fn wrong_password_and_wrong_email_are_indistinguishable() {
        let now = 1_700_000_000;
        let wrong_password = login_with_store(&store(), "k", "admin@x.com", "wrong", now);
        let wrong_email = login_with_store(&store(), "k", "other@x.com", "secret123", now);

        assert!(matches!(wrong_password, Err(LoginError::InvalidCredentials)));
        assert!(matches!(wrong_email, Err(LoginError::InvalidCredentials)));
        assert_eq!(
            wrong_password.unwrap_err().to_string(),
            wrong_email.unwrap_err().to_string()
        );
    }

    #[test]
    fn broken_store_reports_configuration_not_credentials() {
        let result = login_with_store(&BrokenStore, "k", "admin@x.com", "secret123", 0);
        assert!(matches!(result, Err(LoginError::MissingConfig("ADMIN_EMAIL"))));
    }
}
