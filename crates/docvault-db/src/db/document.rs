use async_trait::async_trait;
use chrono::{DateTime, Utc};
use docvault_core::{models::Document, AppError, DocumentStore};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

const DOCUMENT_COLUMNS: &str = "id, tenant_id, name, folder_id, uploaded_by, expires_at, \
     deleted_at, created_at, updated_at";

/// Repository for documents
#[derive(Clone)]
pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a document record
    #[tracing::instrument(skip(self), fields(db.table = "documents", db.operation = "insert"))]
    pub async fn create(
        &self,
        tenant_id: Uuid,
        name: String,
        folder_id: Option<Uuid>,
        uploaded_by: Option<Uuid>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<Document, AppError> {
        // Validate folder belongs to tenant if provided
        if let Some(fid) = folder_id {
            let folder_exists = sqlx::query_scalar::<Postgres, bool>(
                "SELECT EXISTS(SELECT 1 FROM folders WHERE id = $1 AND tenant_id = $2)",
            )
            .bind(fid)
            .bind(tenant_id)
            .fetch_one(&self.pool)
            .await?;

            if !folder_exists {
                return Err(AppError::NotFound("Folder not found".to_string()));
            }
        }

        let document = sqlx::query_as::<Postgres, Document>(&format!(
            r#"
            INSERT INTO documents (tenant_id, name, folder_id, uploaded_by, expires_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {DOCUMENT_COLUMNS}
            "#
        ))
        .bind(tenant_id)
        .bind(&name)
        .bind(folder_id)
        .bind(uploaded_by)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(document)
    }

    /// Get a document by ID (tenant-scoped)
    #[tracing::instrument(skip(self), fields(db.table = "documents", db.operation = "select", db.record_id = %id))]
    pub async fn get(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<Document>, AppError> {
        let document = sqlx::query_as::<Postgres, Document>(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents WHERE tenant_id = $1 AND id = $2 AND deleted_at IS NULL"
        ))
        .bind(tenant_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(document)
    }

    /// Non-deleted tenant documents whose expiry falls inside the
    /// inclusive [from, until] window.
    #[tracing::instrument(skip(self), fields(db.table = "documents", db.operation = "select"))]
    pub async fn list_expiring_between(
        &self,
        tenant_id: Uuid,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<Document>, AppError> {
        let documents = sqlx::query_as::<Postgres, Document>(&format!(
            r#"
            SELECT {DOCUMENT_COLUMNS} FROM documents
            WHERE tenant_id = $1
              AND deleted_at IS NULL
              AND expires_at IS NOT NULL
              AND expires_at >= $2
              AND expires_at <= $3
            ORDER BY expires_at ASC
            "#
        ))
        .bind(tenant_id)
        .bind(from)
        .bind(until)
        .fetch_all(&self.pool)
        .await?;

        Ok(documents)
    }

    /// Soft-delete a document
    #[tracing::instrument(skip(self), fields(db.table = "documents", db.operation = "update", db.record_id = %id))]
    pub async fn soft_delete(&self, tenant_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE documents SET deleted_at = NOW(), updated_at = NOW() WHERE tenant_id = $1 AND id = $2 AND deleted_at IS NULL"
        )
        .bind(tenant_id)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl DocumentStore for DocumentRepository {
    async fn expiring_between(
        &self,
        tenant_id: Uuid,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<Document>, AppError> {
        self.list_expiring_between(tenant_id, from, until).await
    }
}
