//! Scheduled expiration scan.
//!
//! The scan is a pure function of the current instant and store contents:
//! no cursor, no state between runs. The next scheduled run is the only
//! retry for anything that failed this time.

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use uuid::Uuid;

use docvault_core::{
    models::{NotificationSetting, WebhookEvent, WebhookEventData},
    AppError, DocumentStore, MemberDirectory, SettingsStore,
};

use crate::compose::NotificationContent;
use crate::dispatch::NotificationDispatcher;
use crate::webhook::WebhookEmitter;

/// Totals accumulated over one scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    pub tenants_scanned: usize,
    pub documents_flagged: usize,
    pub notifications_sent: u64,
}

#[derive(Clone)]
pub struct ExpirationScanner {
    settings: Arc<dyn SettingsStore>,
    documents: Arc<dyn DocumentStore>,
    members: Arc<dyn MemberDirectory>,
    dispatcher: NotificationDispatcher,
    webhooks: WebhookEmitter,
    max_concurrent_tenants: usize,
}

impl ExpirationScanner {
    pub fn new(
        settings: Arc<dyn SettingsStore>,
        documents: Arc<dyn DocumentStore>,
        members: Arc<dyn MemberDirectory>,
        dispatcher: NotificationDispatcher,
        webhooks: WebhookEmitter,
        max_concurrent_tenants: usize,
    ) -> Self {
        Self {
            settings,
            documents,
            members,
            dispatcher,
            webhooks,
            max_concurrent_tenants: max_concurrent_tenants.max(1),
        }
    }

    /// Scan against the current clock.
    pub async fn run(&self) -> Result<ScanOutcome, AppError> {
        self.run_at(Utc::now()).await
    }

    /// Scan against a fixed instant. Tenants fan out concurrently under
    /// the configured bound; a tenant that fails is logged and skipped
    /// without affecting the others.
    #[tracing::instrument(skip(self))]
    pub async fn run_at(&self, now: DateTime<Utc>) -> Result<ScanOutcome, AppError> {
        let enabled = self.settings.expiration_enabled().await?;
        if enabled.is_empty() {
            tracing::info!("No tenants with expiration notifications enabled");
            return Ok(ScanOutcome::default());
        }

        let semaphore = Arc::new(Semaphore::new(self.max_concurrent_tenants));
        let mut tasks = JoinSet::new();

        for setting in enabled {
            let scanner = self.clone();
            let semaphore = semaphore.clone();
            tasks.spawn(async move {
                // Closed only when the scan is cancelled wholesale.
                let Ok(_permit) = semaphore.acquire().await else {
                    return (0, 0);
                };
                let tenant_id = setting.tenant_id;
                match scanner.scan_tenant(&setting, now).await {
                    Ok(counts) => counts,
                    Err(e) => {
                        tracing::warn!(tenant_id = %tenant_id, error = %e, "Skipping tenant after scan failure");
                        (0, 0)
                    }
                }
            });
        }

        let mut outcome = ScanOutcome::default();
        while let Some(joined) = tasks.join_next().await {
            let (documents_flagged, notifications_sent) = joined
                .map_err(|e| AppError::Internal(format!("Scan task panicked: {}", e)))?;
            outcome.tenants_scanned += 1;
            outcome.documents_flagged += documents_flagged;
            outcome.notifications_sent += notifications_sent;
        }

        tracing::info!(
            tenants = outcome.tenants_scanned,
            documents = outcome.documents_flagged,
            emails = outcome.notifications_sent,
            "Expiration scan complete"
        );
        Ok(outcome)
    }

    /// One tenant's share of the scan. Returns (documents flagged,
    /// emails sent).
    async fn scan_tenant(
        &self,
        setting: &NotificationSetting,
        now: DateTime<Utc>,
    ) -> Result<(usize, u64), AppError> {
        let until = now + Duration::days(setting.lookahead_days());
        let documents = self
            .documents
            .expiring_between(setting.tenant_id, now, until)
            .await?;
        if documents.is_empty() {
            return Ok((0, 0));
        }

        // Resolved once per tenant, reused for every flagged document.
        let recipients = self.members.recipients(setting.tenant_id).await?;

        let mut sent: u64 = 0;
        for document in &documents {
            let Some(expires_at) = document.expires_at else {
                continue;
            };
            let days_remaining = days_until(now, expires_at);
            let content = NotificationContent::Expiration {
                file_name: document.name.clone(),
                expires_at,
                days_remaining,
                custom_message: setting.custom_message.clone(),
            };

            for recipient in &recipients {
                match self
                    .dispatcher
                    .dispatch(setting.tenant_id, recipient, Some(document.id), &content)
                    .await
                {
                    Ok(()) => sent += 1,
                    Err(e) => {
                        tracing::warn!(
                            tenant_id = %setting.tenant_id,
                            document_id = %document.id,
                            recipient = %recipient.email,
                            error = %e,
                            "Expiration email failed"
                        );
                    }
                }
            }

            let event = WebhookEvent {
                company_id: setting.tenant_id,
                data: WebhookEventData::FileExpiring {
                    file_name: document.name.clone(),
                    file_id: document.id,
                    expires_at,
                    days_remaining,
                },
            };
            if let Err(e) = self.webhooks.emit(&event).await {
                tracing::warn!(
                    tenant_id = %setting.tenant_id,
                    document_id = %document.id,
                    error = %e,
                    "Expiration webhook failed"
                );
            }
        }

        Ok((documents.len(), sent))
    }
}

/// Whole days until expiry, rounded up and never below one. A document
/// expiring later today still reads "1 day remaining".
fn days_until(now: DateTime<Utc>, expires_at: DateTime<Utc>) -> i64 {
    let seconds = (expires_at - now).num_seconds();
    let days = (seconds + 86_399).div_euclid(86_400);
    days.max(1)
}
