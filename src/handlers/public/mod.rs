// handlers/public/mod.rs - Unauthenticated endpoints
//
// Token acquisition, tenant self-registration and payment creation.
// Tenant-side data isolation is enforced by the hosted database's
// row-level security, not by this layer.

pub mod login;
pub mod payment;
pub mod register;

pub use login::admin_login;
pub use payment::payment_create;
pub use register::tenant_register;

use crate::error::ApiError;

/// Require a non-empty trimmed string field from a request body.
pub(crate) fn require_field(value: Option<String>, message: &str) -> Result<String, ApiError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::bad_request(message))
}
