mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

fn valid_body() -> Value {
    json!({
        "name": "Residencial Aurora",
        "email": "sindico@aurora.com",
        "password": "correct horse",
        "plan": "basico",
        "unit_count": 24,
        "street": "Rua das Flores",
        "number": "120",
        "city": "São Paulo",
        "state": "SP",
        "zip": "01310-100"
    })
}

async fn post_register(body: Value) -> Result<reqwest::Response> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    Ok(client
        .post(format!("{}/tenants/register", server.base_url))
        .json(&body)
        .send()
        .await?)
}

#[tokio::test]
async fn registration_requires_condo_name() -> Result<()> {
    let mut body = valid_body();
    body.as_object_mut().unwrap().remove("name");

    let res = post_register(body).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn registration_rejects_short_passwords() -> Result<()> {
    let mut body = valid_body();
    body["password"] = json!("short");

    let res = post_register(body).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn registration_rejects_unknown_plans() -> Result<()> {
    let mut body = valid_body();
    body["plan"] = json!("enterprise");

    let res = post_register(body).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let payload = res.json::<Value>().await?;
    assert_eq!(payload["code"], "BAD_REQUEST");
    Ok(())
}

#[tokio::test]
async fn registration_enforces_plan_unit_limits() -> Result<()> {
    let mut body = valid_body();
    // basico allows at most 50 units
    body["unit_count"] = json!(51);

    let res = post_register(body).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn registration_rejects_incomplete_address() -> Result<()> {
    let mut body = valid_body();
    body.as_object_mut().unwrap().remove("zip");

    let res = post_register(body).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}
