// handlers/admin/dashboard.rs - GET /api/admin/dashboard handler

use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::tenant_service::{DashboardStats, TenantService};

/// Cross-tenant aggregates: totals, active count, tenants per plan.
pub async fn dashboard() -> ApiResult<DashboardStats> {
    let service = TenantService::new().await?;
    let stats = service.dashboard().await?;
    Ok(ApiResponse::success(stats))
}
