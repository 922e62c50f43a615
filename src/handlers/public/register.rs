// handlers/public/register.rs - POST /tenants/register handler

use axum::response::Json;
use serde::Deserialize;

use crate::database::models::Tenant;
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::tenant_service::{check_plan, AddressParts, NewTenant, TenantService};

use super::require_field;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default)]
    pub unit_count: Option<i32>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
}

/// Register a new condominium account. Field and plan-limit validation
/// happen before the database is touched, so a 400 never depends on
/// database availability.
pub async fn tenant_register(Json(body): Json<RegisterRequest>) -> ApiResult<Tenant> {
    let name = require_field(body.name, "Nome do condomínio é obrigatório")?;
    let email = require_field(body.email, "Email é obrigatório")?;
    let password = body
        .password
        .filter(|p| p.len() >= 8)
        .ok_or_else(|| ApiError::bad_request("Senha deve ter pelo menos 8 caracteres"))?;
    let plan = require_field(body.plan, "Plano é obrigatório")?;
    let unit_count = body
        .unit_count
        .filter(|n| *n > 0)
        .ok_or_else(|| ApiError::bad_request("Número de unidades deve ser maior que zero"))?;

    let address = AddressParts {
        street: require_field(body.street, "Endereço incompleto")?,
        number: require_field(body.number, "Endereço incompleto")?,
        city: require_field(body.city, "Endereço incompleto")?,
        state: require_field(body.state, "Endereço incompleto")?,
        zip: require_field(body.zip, "Endereço incompleto")?,
    };

    check_plan(&plan, unit_count)?;

    let service = TenantService::new().await?;
    let tenant = service
        .register(NewTenant { name, email, password, plan, unit_count, address })
        .await?;

    Ok(ApiResponse::created(tenant))
}
