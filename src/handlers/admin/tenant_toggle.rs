// handlers/admin/tenant_toggle.rs - PATCH /api/admin/tenants/:id/active handler

use axum::extract::{Extension, Path};
use uuid::Uuid;

use crate::database::models::Tenant;
use crate::middleware::auth::AdminContext;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::tenant_service::TenantService;

/// Flip a tenant's active flag. 404 when the tenant does not exist.
pub async fn tenant_toggle_active(
    Extension(admin): Extension<AdminContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Tenant> {
    let service = TenantService::new().await?;
    let tenant = service.toggle_active(id).await?;

    tracing::info!(
        admin = %admin.email,
        tenant = %tenant.id,
        active = tenant.active,
        "tenant active flag toggled"
    );

    Ok(ApiResponse::success(tenant))
}
