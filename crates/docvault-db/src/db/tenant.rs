use async_trait::async_trait;
use docvault_core::{models::Tenant, AppError, TenantDirectory};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Repository for tenants
#[derive(Clone)]
pub struct TenantRepository {
    pool: PgPool,
}

impl TenantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get tenant by ID
    #[tracing::instrument(skip(self), fields(db.table = "tenants", db.operation = "select", db.record_id = %id))]
    pub async fn get(&self, id: Uuid) -> Result<Option<Tenant>, AppError> {
        let tenant = sqlx::query_as::<Postgres, Tenant>(
            "SELECT id, name, created_at, updated_at FROM tenants WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(tenant)
    }

    /// Get tenant display name only
    #[tracing::instrument(skip(self), fields(db.table = "tenants", db.operation = "select", db.record_id = %id))]
    pub async fn get_name(&self, id: Uuid) -> Result<Option<String>, AppError> {
        let name = sqlx::query_scalar::<Postgres, String>("SELECT name FROM tenants WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(name)
    }
}

#[async_trait]
impl TenantDirectory for TenantRepository {
    async fn tenant_name(&self, tenant_id: Uuid) -> Result<Option<String>, AppError> {
        self.get_name(tenant_id).await
    }
}
