//! Per-tenant notification settings.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use docvault_core::models::{NotificationSetting, UpdateNotificationSettingsRequest};
use docvault_core::AppError;

use crate::error::{HttpAppError, ValidatedJson};
use crate::state::DbState;

/// Settings as exposed over HTTP. The webhook secret itself never leaves
/// the server; only its presence does.
#[derive(Debug, Serialize, ToSchema)]
pub struct NotificationSettingsResponse {
    pub tenant_id: Uuid,
    pub notify_expiration: bool,
    pub notify_new_files: bool,
    pub expiration_days_before: i32,
    pub webhook_url: Option<String>,
    pub has_webhook_secret: bool,
    pub custom_message: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<NotificationSetting> for NotificationSettingsResponse {
    fn from(setting: NotificationSetting) -> Self {
        Self {
            tenant_id: setting.tenant_id,
            notify_expiration: setting.notify_expiration,
            notify_new_files: setting.notify_new_files,
            expiration_days_before: setting.expiration_days_before,
            webhook_url: setting.webhook_url,
            has_webhook_secret: setting.webhook_secret.is_some(),
            custom_message: setting.custom_message,
            updated_at: setting.updated_at,
        }
    }
}

/// GET /api/tenants/{tenant_id}/notification-settings
#[utoipa::path(
    get,
    path = "/api/tenants/{tenant_id}/notification-settings",
    params(("tenant_id" = Uuid, Path, description = "Tenant ID")),
    responses(
        (status = 200, description = "Current settings", body = NotificationSettingsResponse),
        (status = 404, description = "No settings configured", body = crate::error::ErrorResponse),
    ),
    tag = "settings"
)]
pub async fn get_settings(
    State(db): State<DbState>,
    Path(tenant_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let setting = db
        .settings
        .get(tenant_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No notification settings for tenant".to_string()))?;
    Ok(Json(NotificationSettingsResponse::from(setting)))
}

/// PUT /api/tenants/{tenant_id}/notification-settings
#[utoipa::path(
    put,
    path = "/api/tenants/{tenant_id}/notification-settings",
    params(("tenant_id" = Uuid, Path, description = "Tenant ID")),
    request_body = UpdateNotificationSettingsRequest,
    responses(
        (status = 200, description = "Settings updated", body = NotificationSettingsResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 404, description = "Tenant not found", body = crate::error::ErrorResponse),
    ),
    tag = "settings"
)]
pub async fn update_settings(
    State(db): State<DbState>,
    Path(tenant_id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdateNotificationSettingsRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    if db.tenants.get(tenant_id).await?.is_none() {
        return Err(AppError::NotFound("Tenant not found".to_string()).into());
    }

    let setting = db.settings.upsert(tenant_id, request).await?;
    Ok(Json(NotificationSettingsResponse::from(setting)))
}
