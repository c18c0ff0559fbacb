//! Async seams of the notification pipeline.
//!
//! The services crate is written against these traits; `docvault-db`
//! provides the Postgres implementations and tests substitute mocks.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{
    Document, NewNotificationLog, NewWebhookLog, NotificationSetting, Recipient,
};

/// Read access to per-tenant notification settings.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Settings row for one tenant, if configured.
    async fn settings_for_tenant(
        &self,
        tenant_id: Uuid,
    ) -> Result<Option<NotificationSetting>, AppError>;

    /// All settings rows with expiration notifications enabled.
    async fn expiration_enabled(&self) -> Result<Vec<NotificationSetting>, AppError>;
}

/// Read access to documents for the expiration scan.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Non-deleted tenant documents expiring inside the inclusive window.
    async fn expiring_between(
        &self,
        tenant_id: Uuid,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<Document>, AppError>;
}

/// Membership and identity lookups.
#[async_trait]
pub trait MemberDirectory: Send + Sync {
    /// Every member of the tenant whose profile has a known, non-empty
    /// email. Addressless identities are silently excluded.
    async fn recipients(&self, tenant_id: Uuid) -> Result<Vec<Recipient>, AppError>;

    /// Display label for a user: full name if present, else email,
    /// else None. Callers substitute their own sentinel for None.
    async fn display_name(&self, user_id: Uuid) -> Result<Option<String>, AppError>;
}

/// Tenant name lookups for email composition.
#[async_trait]
pub trait TenantDirectory: Send + Sync {
    async fn tenant_name(&self, tenant_id: Uuid) -> Result<Option<String>, AppError>;
}

/// Folder name lookups for the new-file template.
#[async_trait]
pub trait FolderDirectory: Send + Sync {
    async fn folder_name(&self, folder_id: Uuid) -> Result<Option<String>, AppError>;
}

/// Append-only notification audit log.
#[async_trait]
pub trait NotificationAudit: Send + Sync {
    async fn record(&self, entry: NewNotificationLog) -> Result<(), AppError>;
}

/// Append-only webhook audit log.
#[async_trait]
pub trait WebhookAudit: Send + Sync {
    async fn record(&self, entry: NewWebhookLog) -> Result<(), AppError>;
}

/// Outbound email delivery.
#[async_trait]
pub trait EmailTransport: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), AppError>;
}
