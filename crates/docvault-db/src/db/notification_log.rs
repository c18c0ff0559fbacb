use async_trait::async_trait;
use docvault_core::{
    models::{NewNotificationLog, NotificationLog},
    AppError, NotificationAudit,
};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

const LOG_COLUMNS: &str = "id, tenant_id, kind, recipient_email, document_id, status, created_at";

/// Append-only repository for the notification audit log
#[derive(Clone)]
pub struct NotificationLogRepository {
    pool: PgPool,
}

impl NotificationLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append one attempted-send record
    #[tracing::instrument(skip(self, entry), fields(db.table = "notification_logs", db.operation = "insert"))]
    pub async fn append(&self, entry: NewNotificationLog) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO notification_logs (tenant_id, kind, recipient_email, document_id, status)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(entry.tenant_id)
        .bind(entry.kind)
        .bind(&entry.recipient_email)
        .bind(entry.document_id)
        .bind(entry.status)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Page through a tenant's records, newest first
    #[tracing::instrument(skip(self), fields(db.table = "notification_logs", db.operation = "select"))]
    pub async fn list_for_tenant(
        &self,
        tenant_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<NotificationLog>, AppError> {
        let logs = sqlx::query_as::<Postgres, NotificationLog>(&format!(
            r#"
            SELECT {LOG_COLUMNS} FROM notification_logs
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
impl NotificationAudit for NotificationLogRepository {
    async fn record(&self, entry: NewNotificationLog) -> Result<(), AppError> {
        self.append(entry).await
    }
}
