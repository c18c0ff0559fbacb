//! DocVault database layer
//!
//! Postgres repositories over `sqlx`, implementing the pipeline seams
//! declared in `docvault-core::traits`.

pub mod db;

pub use db::{
    DocumentRepository, FolderRepository, MembershipRepository, NotificationLogRepository,
    SettingsRepository, TenantRepository, WebhookLogRepository,
};
