use axum::{routing::get, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use sindico_api::{config, database, handlers};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, ADMIN_* etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting Sindico API in {:?} mode", config.environment);

    let app = app();

    // Allow tests or deployments to override port via env
    let port = std::env::var("SINDICO_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Sindico API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app() -> Router {
    let mut app = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Public auth / registration / payment routes
        .merge(public_routes())
        // Privileged super-admin routes
        .merge(admin_routes())
        // Global middleware
        .layer(TraceLayer::new_for_http());

    if config::config().security.enable_cors {
        app = app.layer(CorsLayer::permissive());
    }

    app
}

fn public_routes() -> Router {
    use axum::routing::post;
    use handlers::public;

    Router::new()
        // Super-admin token acquisition
        .route("/auth/admin/login", post(public::admin_login))
        // Tenant self-registration
        .route("/tenants/register", post(public::tenant_register))
        // Billing-provider charge creation
        .route("/api/payments", post(public::payment_create))
}

fn admin_routes() -> Router {
    use axum::routing::patch;
    use handlers::admin;
    use sindico_api::middleware::auth::admin_auth_middleware;

    Router::new()
        .route("/api/admin/tenants", get(admin::tenant_list))
        .route("/api/admin/tenants/:id/active", patch(admin::tenant_toggle_active))
        .route("/api/admin/dashboard", get(admin::dashboard))
        .layer(axum::middleware::from_fn(admin_auth_middleware))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Sindico API",
            "version": version,
            "description": "Condominium management SaaS backend built with Rust (Axum)",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "admin_login": "/auth/admin/login (public - token acquisition)",
                "register": "/tenants/register (public)",
                "payments": "/api/payments (public)",
                "admin": "/api/admin/* (restricted, requires super-admin token)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match database::manager::DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
