// handlers/public/login.rs - POST /auth/admin/login handler

use axum::response::Json;
use serde::{Deserialize, Serialize};

use crate::auth;
use crate::middleware::response::{ApiResponse, ApiResult};

use super::require_field;

const MISSING_FIELDS: &str = "Email e senha são obrigatórios";

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Authenticate the super-admin and return a signed bearer token.
/// Responses: 200 with token, 400 on missing fields, 401 on bad
/// credentials, 500 on missing server configuration.
pub async fn admin_login(Json(body): Json<LoginRequest>) -> ApiResult<LoginResponse> {
    let email = require_field(body.email, MISSING_FIELDS)?;
    let password = body
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| crate::error::ApiError::bad_request(MISSING_FIELDS))?;

    let token = auth::login(&email, &password)?;

    Ok(ApiResponse::success(LoginResponse { token }))
}
