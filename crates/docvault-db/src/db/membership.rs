use async_trait::async_trait;
use docvault_core::{models::Recipient, AppError, MemberDirectory};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Repository for tenant memberships and profile lookups
#[derive(Clone)]
pub struct MembershipRepository {
    pool: PgPool,
}

impl MembershipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Members of a tenant with a usable email address. Profiles without
    /// an email are excluded here rather than filtered by callers.
    #[tracing::instrument(skip(self), fields(db.table = "tenant_memberships", db.operation = "select"))]
    pub async fn list_recipients(&self, tenant_id: Uuid) -> Result<Vec<Recipient>, AppError> {
        let recipients = sqlx::query_as::<Postgres, Recipient>(
            r#"
            SELECT m.user_id, p.email
            FROM tenant_memberships m
            JOIN profiles p ON p.id = m.user_id
            WHERE m.tenant_id = $1
              AND p.email IS NOT NULL
              AND p.email <> ''
            ORDER BY p.email ASC
            "#,
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(recipients)
    }

    /// Display label for a user: full name, falling back to email.
    #[tracing::instrument(skip(self), fields(db.table = "profiles", db.operation = "select", db.record_id = %user_id))]
    pub async fn get_display_name(&self, user_id: Uuid) -> Result<Option<String>, AppError> {
        let label = sqlx::query_scalar::<Postgres, Option<String>>(
            "SELECT COALESCE(NULLIF(full_name, ''), NULLIF(email, '')) FROM profiles WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(label.flatten())
    }
}

#[async_trait]
impl MemberDirectory for MembershipRepository {
    async fn recipients(&self, tenant_id: Uuid) -> Result<Vec<Recipient>, AppError> {
        self.list_recipients(tenant_id).await
    }

    async fn display_name(&self, user_id: Uuid) -> Result<Option<String>, AppError> {
        self.get_display_name(user_id).await
    }
}
