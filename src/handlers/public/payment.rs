// handlers/public/payment.rs - POST /api/payments handler

use axum::response::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::billing::{BillingClient, Charge, ChargeRequest};

#[derive(Debug, Deserialize)]
pub struct PaymentRequest {
    #[serde(default)]
    pub tenant_id: Option<Uuid>,
    #[serde(default)]
    pub amount_cents: Option<i64>,
    #[serde(default)]
    pub method: Option<String>,
}

/// Create a charge with the billing provider. The method string is
/// parsed here so an unknown method is a 400, not a serde rejection.
pub async fn payment_create(Json(body): Json<PaymentRequest>) -> ApiResult<Charge> {
    let tenant_id = body
        .tenant_id
        .ok_or_else(|| ApiError::bad_request("Condomínio é obrigatório"))?;
    let amount_cents = body
        .amount_cents
        .filter(|v| *v > 0)
        .ok_or_else(|| ApiError::bad_request("Valor da cobrança deve ser maior que zero"))?;
    let method = body
        .method
        .as_deref()
        .and_then(|m| m.parse().ok())
        .ok_or_else(|| ApiError::bad_request("Método de pagamento inválido"))?;

    let client = BillingClient::from_config()?;
    let charge = client
        .create_charge(&ChargeRequest { tenant_id, amount_cents, method })
        .await?;

    Ok(ApiResponse::success(charge))
}
