use async_trait::async_trait;
use docvault_core::{
    models::{NotificationSetting, UpdateNotificationSettingsRequest},
    AppError, SettingsStore,
};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

const SETTING_COLUMNS: &str = "tenant_id, notify_expiration, notify_new_files, \
     expiration_days_before, webhook_url, webhook_secret, custom_message, \
     created_at, updated_at";

/// Repository for per-tenant notification settings
#[derive(Clone)]
pub struct SettingsRepository {
    pool: PgPool,
}

impl SettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get the settings row for a tenant
    #[tracing::instrument(skip(self), fields(db.table = "notification_settings", db.operation = "select"))]
    pub async fn get(&self, tenant_id: Uuid) -> Result<Option<NotificationSetting>, AppError> {
        let setting = sqlx::query_as::<Postgres, NotificationSetting>(&format!(
            "SELECT {SETTING_COLUMNS} FROM notification_settings WHERE tenant_id = $1"
        ))
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(setting)
    }

    /// List all tenants that opted into expiration notifications
    #[tracing::instrument(skip(self), fields(db.table = "notification_settings", db.operation = "select"))]
    pub async fn list_expiration_enabled(&self) -> Result<Vec<NotificationSetting>, AppError> {
        let settings = sqlx::query_as::<Postgres, NotificationSetting>(&format!(
            "SELECT {SETTING_COLUMNS} FROM notification_settings WHERE notify_expiration = true"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(settings)
    }

    /// Upsert settings for a tenant, touching only the provided fields
    #[tracing::instrument(skip(self, request), fields(db.table = "notification_settings", db.operation = "upsert"))]
    pub async fn upsert(
        &self,
        tenant_id: Uuid,
        request: UpdateNotificationSettingsRequest,
    ) -> Result<NotificationSetting, AppError> {
        let setting = sqlx::query_as::<Postgres, NotificationSetting>(&format!(
            r#"
            INSERT INTO notification_settings
                (tenant_id, notify_expiration, notify_new_files, expiration_days_before,
                 webhook_url, webhook_secret, custom_message)
            VALUES ($1, COALESCE($2, true), COALESCE($3, true), COALESCE($4, 7), $5, $6, $7)
            ON CONFLICT (tenant_id) DO UPDATE SET
                notify_expiration = COALESCE($2, notification_settings.notify_expiration),
                notify_new_files = COALESCE($3, notification_settings.notify_new_files),
                expiration_days_before = COALESCE($4, notification_settings.expiration_days_before),
                webhook_url = COALESCE($5, notification_settings.webhook_url),
                webhook_secret = COALESCE($6, notification_settings.webhook_secret),
                custom_message = COALESCE($7, notification_settings.custom_message),
                updated_at = NOW()
            RETURNING {SETTING_COLUMNS}
            "#
        ))
        .bind(tenant_id)
        .bind(request.notify_expiration)
        .bind(request.notify_new_files)
        .bind(request.expiration_days_before)
        .bind(request.webhook_url)
        .bind(request.webhook_secret)
        .bind(request.custom_message)
        .fetch_one(&self.pool)
        .await?;

        Ok(setting)
    }
}

#[async_trait]
impl SettingsStore for SettingsRepository {
    async fn settings_for_tenant(
        &self,
        tenant_id: Uuid,
    ) -> Result<Option<NotificationSetting>, AppError> {
        self.get(tenant_id).await
    }

    async fn expiration_enabled(&self) -> Result<Vec<NotificationSetting>, AppError> {
        self.list_expiration_enabled().await
    }
}
