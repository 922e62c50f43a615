// Thin glue to the external billing provider. The provider owns the
// actual payment flows (PIX, boleto, card); this client only shapes a
// minimal charge request and passes the provider's pointers back to the
// caller as opaque strings.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Pix,
    Boleto,
    CreditCard,
}

impl FromStr for PaymentMethod {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pix" => Ok(PaymentMethod::Pix),
            "boleto" => Ok(PaymentMethod::Boleto),
            "credit_card" => Ok(PaymentMethod::CreditCard),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChargeRequest {
    pub tenant_id: Uuid,
    pub amount_cents: i64,
    pub method: PaymentMethod,
}

/// Provider response, passed through untouched. `payment_pointer` is
/// whatever the provider hands back for the chosen method: a PIX QR
/// payload, a boleto line, or a card checkout URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Charge {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub payment_pointer: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum BillingError {
    #[error("missing configuration: {0}")]
    MissingConfig(&'static str),
    #[error("provider request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("provider returned {status}: {body}")]
    Provider { status: u16, body: String },
}

pub struct BillingClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl BillingClient {
    pub fn from_config() -> Result<Self, BillingError> {
        let billing = &config::config().billing;

        let base_url = billing
            .base_url
            .clone()
            .ok_or(BillingError::MissingConfig("BILLING_API_URL"))?;
        let api_key = billing
            .api_key
            .clone()
            .ok_or(BillingError::MissingConfig("BILLING_API_KEY"))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(billing.request_timeout_secs))
            .build()?;

        Ok(Self { http, base_url, api_key })
    }

    pub async fn create_charge(&self, charge: &ChargeRequest) -> Result<Charge, BillingError> {
        let url = format!("{}/charges", self.base_url.trim_end_matches('/'));

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(charge)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BillingError::Provider { status: status.as_u16(), body });
        }

        let charge = response.json::<Charge>().await?;
        tracing::info!(charge = %charge.id, status = %charge.status, "charge created");
        Ok(charge)
    }
}
