use async_trait::async_trait;
use docvault_core::{AppError, FolderDirectory};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Repository for folders
#[derive(Clone)]
pub struct FolderRepository {
    pool: PgPool,
}

impl FolderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get folder display name only
    #[tracing::instrument(skip(self), fields(db.table = "folders", db.operation = "select", db.record_id = %id))]
    pub async fn get_name(&self, id: Uuid) -> Result<Option<String>, AppError> {
        let name = sqlx::query_scalar::<Postgres, String>("SELECT name FROM folders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(name)
    }
}

#[async_trait]
impl FolderDirectory for FolderRepository {
    async fn folder_name(&self, folder_id: Uuid) -> Result<Option<String>, AppError> {
        self.get_name(folder_id).await
    }
}
