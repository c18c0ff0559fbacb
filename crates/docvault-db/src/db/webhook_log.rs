use async_trait::async_trait;
use docvault_core::{
    models::{NewWebhookLog, WebhookLog},
    AppError, WebhookAudit,
};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

const LOG_COLUMNS: &str =
    "id, tenant_id, event, url, request_body, response_status, response_body, created_at";

/// Append-only repository for the webhook audit log
#[derive(Clone)]
pub struct WebhookLogRepository {
    pool: PgPool,
}

impl WebhookLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append one completed delivery attempt
    #[tracing::instrument(skip(self, entry), fields(db.table = "webhook_logs", db.operation = "insert"))]
    pub async fn append(&self, entry: NewWebhookLog) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO webhook_logs (tenant_id, event, url, request_body, response_status, response_body)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(entry.tenant_id)
        .bind(entry.event)
        .bind(&entry.url)
        .bind(&entry.request_body)
        .bind(entry.response_status)
        .bind(&entry.response_body)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Page through a tenant's records, newest first
    #[tracing::instrument(skip(self), fields(db.table = "webhook_logs", db.operation = "select"))]
    pub async fn list_for_tenant(
        &self,
        tenant_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<WebhookLog>, AppError> {
        let logs = sqlx::query_as::<Postgres, WebhookLog>(&format!(
            r#"
            SELECT {LOG_COLUMNS} FROM webhook_logs
            WHERE tenant_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(tenant_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(logs)
    }
}

#[async_trait]
impl WebhookAudit for WebhookLogRepository {
    async fn record(&self, entry: NewWebhookLog) -> Result<(), AppError> {
        self.append(entry).await
    }
}
