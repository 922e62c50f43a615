use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::principal;
use crate::database::manager::{DatabaseManager, DatabaseError};
use crate::database::models::Tenant;

/// Subscription plans and their limits. Static business data; there is
/// no plans table.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Plan {
    pub name: &'static str,
    pub max_units: i32,
    pub monthly_price_cents: i64,
}

pub const PLANS: &[Plan] = &[
    Plan { name: "basico", max_units: 50, monthly_price_cents: 9_900 },
    Plan { name: "profissional", max_units: 150, monthly_price_cents: 19_900 },
    Plan { name: "premium", max_units: 500, monthly_price_cents: 39_900 },
];

pub fn plan_by_name(name: &str) -> Option<&'static Plan> {
    PLANS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

/// Validate a requested plan/unit-count pair before touching the
/// database, so limit violations come back as 400s even when the
/// database is down.
pub fn check_plan(plan: &str, unit_count: i32) -> Result<&'static Plan, TenantError> {
    let plan = plan_by_name(plan).ok_or_else(|| TenantError::UnknownPlan(plan.to_string()))?;
    if unit_count > plan.max_units {
        return Err(TenantError::UnitLimitExceeded {
            plan: plan.name,
            max_units: plan.max_units,
            requested: unit_count,
        });
    }
    Ok(plan)
}

/// Address parts as submitted by the registration form; stored
/// concatenated into a single display string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressParts {
    pub street: String,
    pub number: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl AddressParts {
    pub fn display(&self) -> String {
        format!(
            "{}, {} - {}/{} - CEP {}",
            self.street, self.number, self.city, self.state, self.zip
        )
    }
}

/// A registration request, already field-validated by the handler.
#[derive(Debug, Clone)]
pub struct NewTenant {
    pub name: String,
    pub email: String,
    pub password: String,
    pub plan: String,
    pub unit_count: i32,
    pub address: AddressParts,
}

#[derive(Debug, thiserror::Error)]
pub enum TenantError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Database manager error: {0}")]
    DatabaseManager(#[from] DatabaseError),
    #[error("Email already registered: {0}")]
    EmailTaken(String),
    #[error("Unknown plan: {0}")]
    UnknownPlan(String),
    #[error("Plan {plan} allows at most {max_units} units, {requested} requested")]
    UnitLimitExceeded { plan: &'static str, max_units: i32, requested: i32 },
    #[error("Tenant not found: {0}")]
    NotFound(Uuid),
    #[error("Password hashing failed: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),
}

/// Cross-tenant aggregates for the super-admin dashboard.
#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_tenants: i64,
    pub active_tenants: i64,
    pub tenants_by_plan: Vec<PlanCount>,
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct PlanCount {
    pub plan: String,
    pub count: i64,
}

const TENANT_COLUMNS: &str = "id, name, email, plan, unit_count, address, active, created_at, updated_at";

pub struct TenantService {
    pool: PgPool,
}

impl TenantService {
    pub async fn new() -> Result<Self, TenantError> {
        let pool = DatabaseManager::pool().await?;
        Ok(Self { pool })
    }

    /// Register a new condominium account. The admin password is
    /// bcrypt-hashed before it reaches the database; plaintext is never
    /// stored.
    pub async fn register(&self, req: NewTenant) -> Result<Tenant, TenantError> {
        check_plan(&req.plan, req.unit_count)?;

        let email = req.email.trim().to_lowercase();
        if self.email_exists(&email).await? {
            return Err(TenantError::EmailTaken(email));
        }

        let password_hash = principal::hash_password(&req.password)?;
        let address = req.address.display();

        let tenant = sqlx::query_as::<_, Tenant>(&format!(
            "INSERT INTO tenants (id, name, email, password_hash, plan, unit_count, address, active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, true) \
             RETURNING {TENANT_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(&req.name)
        .bind(&email)
        .bind(&password_hash)
        .bind(req.plan.to_lowercase())
        .bind(req.unit_count)
        .bind(&address)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(tenant = %tenant.id, email = %tenant.email, plan = %tenant.plan, "tenant registered");
        Ok(tenant)
    }

    /// Flip a tenant's active flag, returning the updated row.
    pub async fn toggle_active(&self, id: Uuid) -> Result<Tenant, TenantError> {
        let tenant = sqlx::query_as::<_, Tenant>(&format!(
            "UPDATE tenants SET active = NOT active, updated_at = now() \
             WHERE id = $1 \
             RETURNING {TENANT_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(TenantError::NotFound(id))?;

        Ok(tenant)
    }

    pub async fn list(&self) -> Result<Vec<Tenant>, TenantError> {
        let tenants = sqlx::query_as::<_, Tenant>(&format!(
            "SELECT {TENANT_COLUMNS} FROM tenants ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(tenants)
    }

    pub async fn dashboard(&self) -> Result<DashboardStats, TenantError> {
        let (total_tenants,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tenants")
            .fetch_one(&self.pool)
            .await?;

        let (active_tenants,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM tenants WHERE active")
                .fetch_one(&self.pool)
                .await?;

        let tenants_by_plan = sqlx::query_as::<_, PlanCount>(
            "SELECT plan, COUNT(*) AS count FROM tenants GROUP BY plan ORDER BY plan",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(DashboardStats { total_tenants, active_tenants, tenants_by_plan })
    }

    async fn email_exists(&self, email: &str) -> Result<bool, TenantError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tenants WHERE email = $1")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }
}
