// handlers/admin/tenant_list.rs - GET /api/admin/tenants handler

use crate::database::models::Tenant;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::tenant_service::TenantService;

/// Cross-tenant listing for the super-admin surface.
pub async fn tenant_list() -> ApiResult<Vec<Tenant>> {
    let service = TenantService::new().await?;
    let tenants = service.list().await?;
    Ok(ApiResponse::success(tenants))
}
