//! DocVault Core Library
//!
//! This crate provides the domain models, error types, configuration, and the
//! async seams of the notification pipeline that are shared across all
//! DocVault components.

pub mod config;
pub mod error;
pub mod models;
pub mod traits;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use traits::{
    DocumentStore, EmailTransport, FolderDirectory, MemberDirectory, NotificationAudit,
    SettingsStore, TenantDirectory, WebhookAudit,
};
