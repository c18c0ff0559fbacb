//! Application state and sub-state extractors.
//!
//! AppState is split into domain sub-states so handlers can extract only
//! what they need via Axum's `FromRef`.

use axum::extract::FromRef;
use docvault_core::Config;
use docvault_db::{
    DocumentRepository, FolderRepository, MembershipRepository, NotificationLogRepository,
    SettingsRepository, TenantRepository, WebhookLogRepository,
};
use docvault_services::{ExpirationScanner, UploadNotifier};
use sqlx::PgPool;
use std::sync::Arc;

use crate::job_queue::NotificationJobQueue;

/// Database pool and all repositories.
#[derive(Clone)]
#[allow(dead_code)] // pool is kept for handlers that need raw access
pub struct DbState {
    pub pool: PgPool,
    pub documents: DocumentRepository,
    pub folders: FolderRepository,
    pub memberships: MembershipRepository,
    pub notification_logs: NotificationLogRepository,
    pub settings: SettingsRepository,
    pub tenants: TenantRepository,
    pub webhook_logs: WebhookLogRepository,
}

/// The notification pipeline services and the upload job queue.
#[derive(Clone)]
pub struct PipelineState {
    pub scanner: ExpirationScanner,
    pub uploads: UploadNotifier,
    pub jobs: Arc<NotificationJobQueue>,
}

#[allow(dead_code)] // config is read during setup, kept alongside the states it built
pub struct AppState {
    pub config: Config,
    pub db: DbState,
    pub pipeline: PipelineState,
}

impl FromRef<Arc<AppState>> for DbState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.db.clone()
    }
}

impl FromRef<Arc<AppState>> for PipelineState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.pipeline.clone()
    }
}
