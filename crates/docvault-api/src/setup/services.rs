//! Service and repository wiring.

use anyhow::Result;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

use docvault_core::{Config, EmailTransport};
use docvault_db::{
    DocumentRepository, FolderRepository, MembershipRepository, NotificationLogRepository,
    SettingsRepository, TenantRepository, WebhookLogRepository,
};
use docvault_services::{
    EmailService, ExpirationScanner, LogOnlyEmailService, NotificationDispatcher, UploadNotifier,
    WebhookEmitter,
};

use crate::job_queue::NotificationJobQueue;
use crate::state::{AppState, DbState, PipelineState};

/// Build the repositories, the pipeline services, and the job queue.
pub fn initialize_services(config: &Config, pool: PgPool) -> Result<Arc<AppState>> {
    let db = DbState {
        pool: pool.clone(),
        documents: DocumentRepository::new(pool.clone()),
        folders: FolderRepository::new(pool.clone()),
        memberships: MembershipRepository::new(pool.clone()),
        notification_logs: NotificationLogRepository::new(pool.clone()),
        settings: SettingsRepository::new(pool.clone()),
        tenants: TenantRepository::new(pool.clone()),
        webhook_logs: WebhookLogRepository::new(pool),
    };

    let email: Arc<dyn EmailTransport> = match EmailService::from_config(config) {
        Some(service) => Arc::new(service),
        None => {
            tracing::warn!("SMTP not configured, emails will be logged instead of sent");
            Arc::new(LogOnlyEmailService)
        }
    };

    let dispatcher = NotificationDispatcher::new(
        Arc::new(db.tenants.clone()),
        email,
        Arc::new(db.notification_logs.clone()),
    );

    let webhooks = WebhookEmitter::new(
        Arc::new(db.settings.clone()),
        Arc::new(db.webhook_logs.clone()),
        Duration::from_secs(config.webhook_timeout_seconds()),
    )?;

    let scanner = ExpirationScanner::new(
        Arc::new(db.settings.clone()),
        Arc::new(db.documents.clone()),
        Arc::new(db.memberships.clone()),
        dispatcher.clone(),
        webhooks.clone(),
        config.scan_max_concurrent_tenants(),
    );

    let uploads = UploadNotifier::new(
        Arc::new(db.settings.clone()),
        Arc::new(db.memberships.clone()),
        Arc::new(db.folders.clone()),
        dispatcher,
        webhooks,
    );

    let jobs = Arc::new(NotificationJobQueue::new(
        uploads.clone(),
        config.notify_queue_size(),
        config.notify_max_concurrent_jobs(),
    ));

    tracing::info!("Services initialized");

    Ok(Arc::new(AppState {
        config: config.clone(),
        db,
        pipeline: PipelineState {
            scanner,
            uploads,
            jobs,
        },
    }))
}
