//! Read access to the append-only audit logs.

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use docvault_core::models::PageQuery;

use crate::error::HttpAppError;
use crate::state::DbState;

/// GET /api/tenants/{tenant_id}/notification-logs
#[utoipa::path(
    get,
    path = "/api/tenants/{tenant_id}/notification-logs",
    params(
        ("tenant_id" = Uuid, Path, description = "Tenant ID"),
        ("limit" = Option<i64>, Query, description = "Page size (max 200)"),
        ("offset" = Option<i64>, Query, description = "Page offset"),
    ),
    responses(
        (status = 200, description = "Notification log entries, newest first"),
    ),
    tag = "audit"
)]
pub async fn list_notification_logs(
    State(db): State<DbState>,
    Path(tenant_id): Path<Uuid>,
    Query(page): Query<PageQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let (limit, offset) = page.bounded();
    let logs = db
        .notification_logs
        .list_for_tenant(tenant_id, limit, offset)
        .await?;
    Ok(Json(logs))
}

/// GET /api/tenants/{tenant_id}/webhook-logs
#[utoipa::path(
    get,
    path = "/api/tenants/{tenant_id}/webhook-logs",
    params(
        ("tenant_id" = Uuid, Path, description = "Tenant ID"),
        ("limit" = Option<i64>, Query, description = "Page size (max 200)"),
        ("offset" = Option<i64>, Query, description = "Page offset"),
    ),
    responses(
        (status = 200, description = "Webhook delivery log entries, newest first"),
    ),
    tag = "audit"
)]
pub async fn list_webhook_logs(
    State(db): State<DbState>,
    Path(tenant_id): Path<Uuid>,
    Query(page): Query<PageQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let (limit, offset) = page.bounded();
    let logs = db
        .webhook_logs
        .list_for_tenant(tenant_id, limit, offset)
        .await?;
    Ok(Json(logs))
}
