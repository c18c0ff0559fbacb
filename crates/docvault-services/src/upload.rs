//! New-file notification path.
//!
//! Runs once per uploaded document. The uploader is never among the
//! recipients; everyone else with a usable address gets one email, and
//! one `new_file` webhook goes out regardless of recipient count.

use std::sync::Arc;

use docvault_core::{
    models::{NewFileUpload, WebhookEvent, WebhookEventData},
    AppError, FolderDirectory, MemberDirectory, SettingsStore,
};

use crate::compose::NotificationContent;
use crate::dispatch::NotificationDispatcher;
use crate::webhook::WebhookEmitter;

/// Folder label for documents outside any folder
const ROOT_FOLDER_LABEL: &str = "Root";

/// Uploader label when no identity can be resolved
const SYSTEM_UPLOADER_LABEL: &str = "System";

/// Result of one upload notification run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Settings missing or new-file notifications turned off.
    Disabled,
    Notified { emails_sent: u64 },
}

#[derive(Clone)]
pub struct UploadNotifier {
    settings: Arc<dyn SettingsStore>,
    members: Arc<dyn MemberDirectory>,
    folders: Arc<dyn FolderDirectory>,
    dispatcher: NotificationDispatcher,
    webhooks: WebhookEmitter,
}

impl UploadNotifier {
    pub fn new(
        settings: Arc<dyn SettingsStore>,
        members: Arc<dyn MemberDirectory>,
        folders: Arc<dyn FolderDirectory>,
        dispatcher: NotificationDispatcher,
        webhooks: WebhookEmitter,
    ) -> Self {
        Self {
            settings,
            members,
            folders,
            dispatcher,
            webhooks,
        }
    }

    #[tracing::instrument(skip(self, upload), fields(tenant_id = %upload.tenant_id, document_id = %upload.document_id))]
    pub async fn notify(&self, upload: NewFileUpload) -> Result<UploadOutcome, AppError> {
        let setting = self.settings.settings_for_tenant(upload.tenant_id).await?;
        let enabled = setting.as_ref().is_some_and(|s| s.notify_new_files);
        if !enabled {
            tracing::info!("New-file notifications disabled for tenant");
            return Ok(UploadOutcome::Disabled);
        }

        let folder_name = match upload.folder_id {
            Some(folder_id) => self
                .folders
                .folder_name(folder_id)
                .await?
                .unwrap_or_else(|| ROOT_FOLDER_LABEL.to_string()),
            None => ROOT_FOLDER_LABEL.to_string(),
        };

        let uploaded_by = match upload.uploaded_by {
            Some(user_id) => self
                .members
                .display_name(user_id)
                .await?
                .unwrap_or_else(|| SYSTEM_UPLOADER_LABEL.to_string()),
            None => SYSTEM_UPLOADER_LABEL.to_string(),
        };

        let content = NotificationContent::NewFile {
            file_name: upload.file_name.clone(),
            folder_name: folder_name.clone(),
            uploaded_by: uploaded_by.clone(),
        };

        let recipients = self.members.recipients(upload.tenant_id).await?;
        let mut emails_sent: u64 = 0;
        for recipient in recipients
            .iter()
            .filter(|r| Some(r.user_id) != upload.uploaded_by)
        {
            match self
                .dispatcher
                .dispatch(
                    upload.tenant_id,
                    recipient,
                    Some(upload.document_id),
                    &content,
                )
                .await
            {
                Ok(()) => emails_sent += 1,
                Err(e) => {
                    tracing::warn!(
                        recipient = %recipient.email,
                        error = %e,
                        "New-file email failed"
                    );
                }
            }
        }

        let event = WebhookEvent {
            company_id: upload.tenant_id,
            data: WebhookEventData::NewFile {
                file_name: upload.file_name.clone(),
                file_id: upload.document_id,
                uploaded_by,
                folder_name,
            },
        };
        if let Err(e) = self.webhooks.emit(&event).await {
            tracing::warn!(error = %e, "New-file webhook failed");
        }

        Ok(UploadOutcome::Notified { emails_sent })
    }
}
