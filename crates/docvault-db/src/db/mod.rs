//! Database repositories for the data access layer
//!
//! Each repository is a `Clone` struct over a shared `PgPool` and is
//! responsible for one entity. The pipeline-facing query methods also
//! implement the corresponding `docvault-core` trait.

pub mod document;
pub mod folder;
pub mod membership;
pub mod notification_log;
pub mod settings;
pub mod tenant;
pub mod webhook_log;

pub use document::DocumentRepository;
pub use folder::FolderRepository;
pub use membership::MembershipRepository;
pub use notification_log::NotificationLogRepository;
pub use settings::SettingsRepository;
pub use tenant::TenantRepository;
pub use webhook_log::WebhookLogRepository;
