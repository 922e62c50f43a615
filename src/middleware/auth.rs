use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::{self, Claims};
use crate::error::ApiError;

/// Verified super-admin context injected into privileged requests.
#[derive(Clone, Debug)]
pub struct AdminContext {
    pub email: String,
}

impl From<Claims> for AdminContext {
    fn from(claims: Claims) -> Self {
        Self { email: claims.email }
    }
}

/// Gate for the privileged surface: extracts the bearer token, verifies
/// it, and requires the super-admin subject. Every failure collapses to
/// the same generic 401; the real reason is only logged.
pub async fn admin_auth_middleware(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = match extract_bearer_from_headers(&headers) {
        Ok(token) => token,
        Err(reason) => {
            tracing::debug!("admin request rejected: {}", reason);
            return Err(ApiError::unauthorized(auth::INVALID_TOKEN));
        }
    };

    let claims = match auth::verify_admin_token(&token) {
        Ok(claims) => claims,
        Err(reason) => {
            tracing::debug!("admin token rejected: {}", reason);
            return Err(ApiError::unauthorized(auth::INVALID_TOKEN));
        }
    };

    // Second gate, independent of signature validity: only the
    // super-admin subject may pass.
    if !claims.is_super_admin() {
        tracing::debug!(sub = %claims.sub, "token subject is not super admin");
        return Err(ApiError::unauthorized(auth::INVALID_TOKEN));
    }

    request.extensions_mut().insert(AdminContext::from(claims));
    Ok(next.run(request).await)
}

/// Extract the bearer token from the Authorization header
fn extract_bearer_from_headers(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get("authorization")
        .or_else(|| headers.get("Authorization"))
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty bearer token".to_string());
        }
        Ok(token.trim().to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        let token = extract_bearer_from_headers(&headers_with("Bearer abc.def.ghi")).unwrap();
        assert_eq!(token, "abc.def.ghi");
    }

    #[test]
    fn rejects_missing_header() {
        assert!(extract_bearer_from_headers(&HeaderMap::new()).is_err());
    }

    #[test]
    fn rejects_non_bearer_scheme() {
        assert!(extract_bearer_from_headers(&headers_with("Basic dXNlcg==")).is_err());
    }

    #[test]
    fn rejects_empty_token() {
        assert!(extract_bearer_from_headers(&headers_with("Bearer  ")).is_err());
    }
}
