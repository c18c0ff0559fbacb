//! Per-recipient email delivery with audit logging.

use std::sync::Arc;
use uuid::Uuid;

use docvault_core::{
    models::{NewNotificationLog, NotificationKind, NotificationStatus, Recipient},
    AppError, EmailTransport, NotificationAudit, TenantDirectory,
};

use crate::compose::{compose, NotificationContent};

/// Sends one notification email and records the attempt. A failed send
/// still produces an audit row; the error is returned so fan-out loops
/// can log it and keep going.
#[derive(Clone)]
pub struct NotificationDispatcher {
    tenants: Arc<dyn TenantDirectory>,
    email: Arc<dyn EmailTransport>,
    audit: Arc<dyn NotificationAudit>,
}

impl NotificationDispatcher {
    pub fn new(
        tenants: Arc<dyn TenantDirectory>,
        email: Arc<dyn EmailTransport>,
        audit: Arc<dyn NotificationAudit>,
    ) -> Self {
        Self {
            tenants,
            email,
            audit,
        }
    }

    #[tracing::instrument(skip(self, content), fields(recipient = %recipient.email))]
    pub async fn dispatch(
        &self,
        tenant_id: Uuid,
        recipient: &Recipient,
        document_id: Option<Uuid>,
        content: &NotificationContent,
    ) -> Result<(), AppError> {
        let tenant_name = self
            .tenants
            .tenant_name(tenant_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Tenant {} not found", tenant_id)))?;

        let message = compose(&tenant_name, content);
        let kind = match content {
            NotificationContent::Expiration { .. } => NotificationKind::Expiration,
            NotificationContent::NewFile { .. } => NotificationKind::NewFile,
        };

        let send_result = self
            .email
            .send(&recipient.email, &message.subject, &message.body_html)
            .await;

        let status = if send_result.is_ok() {
            NotificationStatus::Sent
        } else {
            NotificationStatus::Failed
        };

        let audit_result = self
            .audit
            .record(NewNotificationLog {
                tenant_id,
                kind,
                recipient_email: recipient.email.clone(),
                document_id,
                status,
            })
            .await;

        // The send outcome takes precedence over an audit insert failure.
        if let Err(e) = audit_result {
            tracing::warn!(error = %e, "Failed to append notification log entry");
            send_result?;
            return Err(e);
        }

        send_result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockEmail, MockTenants, RecordingNotificationAudit};
    use chrono::Utc;

    fn content() -> NotificationContent {
        NotificationContent::Expiration {
            file_name: "contract.pdf".to_string(),
            expires_at: Utc::now(),
            days_remaining: 3,
            custom_message: None,
        }
    }

    #[tokio::test]
    async fn successful_send_records_sent_row() {
        let tenant_id = Uuid::new_v4();
        let tenants = Arc::new(MockTenants::with_name(tenant_id, "Acme Corp"));
        let email = Arc::new(MockEmail::default());
        let audit = Arc::new(RecordingNotificationAudit::default());
        let dispatcher = NotificationDispatcher::new(tenants, email.clone(), audit.clone());

        let recipient = Recipient {
            user_id: Uuid::new_v4(),
            email: "member@example.com".to_string(),
        };
        let document_id = Uuid::new_v4();

        dispatcher
            .dispatch(tenant_id, &recipient, Some(document_id), &content())
            .await
            .unwrap();

        let sent = email.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "member@example.com");
        assert_eq!(sent[0].1, "[Acme Corp] - File approaching expiration");

        let entries = audit.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].status, NotificationStatus::Sent);
        assert_eq!(entries[0].kind, NotificationKind::Expiration);
        assert_eq!(entries[0].document_id, Some(document_id));
    }

    #[tokio::test]
    async fn failed_send_records_failed_row_and_returns_error() {
        let tenant_id = Uuid::new_v4();
        let tenants = Arc::new(MockTenants::with_name(tenant_id, "Acme Corp"));
        let email = Arc::new(MockEmail::failing_for("broken@example.com"));
        let audit = Arc::new(RecordingNotificationAudit::default());
        let dispatcher = NotificationDispatcher::new(tenants, email, audit.clone());

        let recipient = Recipient {
            user_id: Uuid::new_v4(),
            email: "broken@example.com".to_string(),
        };

        let result = dispatcher
            .dispatch(tenant_id, &recipient, None, &content())
            .await;
        assert!(result.is_err());

        let entries = audit.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].status, NotificationStatus::Failed);
    }

    #[tokio::test]
    async fn unknown_tenant_is_not_found_and_writes_no_row() {
        let tenants = Arc::new(MockTenants::default());
        let email = Arc::new(MockEmail::default());
        let audit = Arc::new(RecordingNotificationAudit::default());
        let dispatcher = NotificationDispatcher::new(tenants, email.clone(), audit.clone());

        let recipient = Recipient {
            user_id: Uuid::new_v4(),
            email: "member@example.com".to_string(),
        };

        let result = dispatcher
            .dispatch(Uuid::new_v4(), &recipient, None, &content())
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert!(email.sent().is_empty());
        assert!(audit.entries().is_empty());
    }
}
