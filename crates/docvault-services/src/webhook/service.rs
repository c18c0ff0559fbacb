//! Webhook delivery.
//!
//! One delivery attempt per emitted event, no retries. Any HTTP response
//! counts as a completed attempt and is audited; a network-level failure
//! produces no audit row and surfaces as an error.

use reqwest::header::CONTENT_TYPE;
use std::sync::Arc;
use std::time::Duration;

use docvault_core::{
    models::{NewWebhookLog, WebhookEvent},
    AppError, SettingsStore, WebhookAudit,
};

use super::signature::sign;

/// Signature header carried on every webhook POST
pub const SIGNATURE_HEADER: &str = "X-Webhook-Signature";

/// Response bodies are truncated before being audited
const MAX_AUDITED_RESPONSE_BYTES: usize = 2048;

/// Result of one emit call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmitOutcome {
    /// The endpoint answered; the attempt is audited regardless of status.
    Delivered { status: u16 },
    /// The tenant has no webhook URL configured. Not an error.
    NotConfigured,
}

#[derive(Clone)]
pub struct WebhookEmitter {
    settings: Arc<dyn SettingsStore>,
    audit: Arc<dyn WebhookAudit>,
    client: reqwest::Client,
}

impl WebhookEmitter {
    pub fn new(
        settings: Arc<dyn SettingsStore>,
        audit: Arc<dyn WebhookAudit>,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Webhook(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            settings,
            audit,
            client,
        })
    }

    /// Deliver one event to the tenant's configured endpoint.
    ///
    /// The payload is serialized once; the signature covers exactly the
    /// transmitted bytes. An unset secret yields an empty signature.
    #[tracing::instrument(skip(self, event), fields(tenant_id = %event.company_id, event_kind = %event.kind()))]
    pub async fn emit(&self, event: &WebhookEvent) -> Result<EmitOutcome, AppError> {
        let setting = self.settings.settings_for_tenant(event.company_id).await?;
        let Some((url, secret)) = setting.and_then(|s| {
            s.webhook_url
                .filter(|u| !u.is_empty())
                .map(|url| (url, s.webhook_secret))
        }) else {
            tracing::debug!("No webhook URL configured, skipping delivery");
            return Ok(EmitOutcome::NotConfigured);
        };

        let body = serde_json::to_vec(event)?;
        let signature = secret
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|s| sign(s, &body))
            .unwrap_or_default();

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(SIGNATURE_HEADER, signature)
            .body(body)
            .send()
            .await
            .map_err(|e| AppError::Webhook(format!("Webhook request failed: {}", e)))?;

        let status = response.status().as_u16();
        let mut response_body = response.text().await.unwrap_or_default();
        truncate_on_char_boundary(&mut response_body, MAX_AUDITED_RESPONSE_BYTES);

        self.audit
            .record(NewWebhookLog {
                tenant_id: event.company_id,
                event: event.kind(),
                url,
                request_body: serde_json::to_value(event)?,
                response_status: status as i32,
                response_body: Some(response_body),
            })
            .await?;

        tracing::info!(status = status, "Webhook delivered");
        Ok(EmitOutcome::Delivered { status })
    }
}

/// Truncate to at most `max_bytes`, backing off to the nearest char
/// boundary. `String::truncate` panics mid-character, and the response
/// body is arbitrary external bytes.
fn truncate_on_char_boundary(s: &mut String, max_bytes: usize) {
    if s.len() <= max_bytes {
        return;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    s.truncate(end);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        loopback_webhook_server, loopback_webhook_server_responding, MockSettings,
        RecordingWebhookAudit,
    };
    use crate::webhook::signature::verify;
    use docvault_core::models::{WebhookEventData, WebhookEventKind};
    use uuid::Uuid;

    fn event(tenant_id: Uuid) -> WebhookEvent {
        WebhookEvent {
            company_id: tenant_id,
            data: WebhookEventData::NewFile {
                file_name: "report.pdf".to_string(),
                file_id: Uuid::new_v4(),
                uploaded_by: "Jane Doe".to_string(),
                folder_name: "Root".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn no_url_is_not_configured_and_writes_no_row() {
        let tenant_id = Uuid::new_v4();
        let settings = Arc::new(MockSettings::for_tenant(tenant_id, true, true, 7, None, None));
        let audit = Arc::new(RecordingWebhookAudit::default());
        let emitter =
            WebhookEmitter::new(settings, audit.clone(), Duration::from_secs(5)).unwrap();

        let outcome = emitter.emit(&event(tenant_id)).await.unwrap();
        assert_eq!(outcome, EmitOutcome::NotConfigured);
        assert!(audit.entries().is_empty());
    }

    #[tokio::test]
    async fn signature_covers_exact_transmitted_bytes() {
        let tenant_id = Uuid::new_v4();
        let (url, received) = loopback_webhook_server().await;
        let settings = Arc::new(MockSettings::for_tenant(
            tenant_id,
            true,
            true,
            7,
            Some(url),
            Some("webhook-secret-value".to_string()),
        ));
        let audit = Arc::new(RecordingWebhookAudit::default());
        let emitter =
            WebhookEmitter::new(settings, audit.clone(), Duration::from_secs(5)).unwrap();

        let outcome = emitter.emit(&event(tenant_id)).await.unwrap();
        assert_eq!(outcome, EmitOutcome::Delivered { status: 200 });

        let calls = received.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let (signature, body) = &calls[0];
        assert!(verify("webhook-secret-value", body, signature));
        assert!(!verify("webhook-secret-value", b"tampered", signature));

        let parsed: serde_json::Value = serde_json::from_slice(body).unwrap();
        assert_eq!(parsed["event"], "new_file");
        assert_eq!(parsed["companyId"], serde_json::json!(tenant_id));
    }

    #[tokio::test]
    async fn empty_url_is_not_configured_and_writes_no_row() {
        let tenant_id = Uuid::new_v4();
        let settings = Arc::new(MockSettings::for_tenant(
            tenant_id,
            true,
            true,
            7,
            Some(String::new()),
            None,
        ));
        let audit = Arc::new(RecordingWebhookAudit::default());
        let emitter =
            WebhookEmitter::new(settings, audit.clone(), Duration::from_secs(5)).unwrap();

        let outcome = emitter.emit(&event(tenant_id)).await.unwrap();
        assert_eq!(outcome, EmitOutcome::NotConfigured);
        assert!(audit.entries().is_empty());
    }

    #[tokio::test]
    async fn missing_secret_sends_empty_signature() {
        let tenant_id = Uuid::new_v4();
        let (url, received) = loopback_webhook_server().await;
        let settings = Arc::new(MockSettings::for_tenant(
            tenant_id,
            true,
            true,
            7,
            Some(url),
            None,
        ));
        let audit = Arc::new(RecordingWebhookAudit::default());
        let emitter = WebhookEmitter::new(settings, audit, Duration::from_secs(5)).unwrap();

        emitter.emit(&event(tenant_id)).await.unwrap();

        let calls = received.lock().unwrap();
        assert_eq!(calls[0].0, "");
    }

    #[tokio::test]
    async fn empty_secret_sends_empty_signature() {
        let tenant_id = Uuid::new_v4();
        let (url, received) = loopback_webhook_server().await;
        let settings = Arc::new(MockSettings::for_tenant(
            tenant_id,
            true,
            true,
            7,
            Some(url),
            Some(String::new()),
        ));
        let audit = Arc::new(RecordingWebhookAudit::default());
        let emitter = WebhookEmitter::new(settings, audit, Duration::from_secs(5)).unwrap();

        emitter.emit(&event(tenant_id)).await.unwrap();

        let calls = received.lock().unwrap();
        assert_eq!(calls[0].0, "");
    }

    #[tokio::test]
    async fn oversized_response_body_is_truncated_on_char_boundary() {
        let tenant_id = Uuid::new_v4();
        // Byte 2048 falls inside the euro sign, one byte past its start.
        let response = format!("{}\u{20ac}tail", "a".repeat(MAX_AUDITED_RESPONSE_BYTES - 1));
        let (url, _received) = loopback_webhook_server_responding(response).await;
        let settings = Arc::new(MockSettings::for_tenant(tenant_id, true, true, 7, Some(url), None));
        let audit = Arc::new(RecordingWebhookAudit::default());
        let emitter = WebhookEmitter::new(settings, audit.clone(), Duration::from_secs(5)).unwrap();

        let outcome = emitter.emit(&event(tenant_id)).await.unwrap();
        assert_eq!(outcome, EmitOutcome::Delivered { status: 200 });

        let entries = audit.entries();
        let body = entries[0].response_body.as_deref().unwrap();
        assert_eq!(body.len(), MAX_AUDITED_RESPONSE_BYTES - 1);
        assert!(body.chars().all(|c| c == 'a'));
    }

    #[test]
    fn truncation_keeps_whole_characters() {
        let mut s = "ab\u{20ac}".to_string();
        truncate_on_char_boundary(&mut s, 3);
        assert_eq!(s, "ab");

        let mut s = "ab\u{20ac}".to_string();
        truncate_on_char_boundary(&mut s, 5);
        assert_eq!(s, "ab\u{20ac}");

        let mut s = "abc".to_string();
        truncate_on_char_boundary(&mut s, 10);
        assert_eq!(s, "abc");
    }

    #[tokio::test]
    async fn delivery_attempt_is_audited_with_event_kind() {
        let tenant_id = Uuid::new_v4();
        let (url, _received) = loopback_webhook_server().await;
        let settings = Arc::new(MockSettings::for_tenant(
            tenant_id,
            true,
            true,
            7,
            Some(url.clone()),
            None,
        ));
        let audit = Arc::new(RecordingWebhookAudit::default());
        let emitter = WebhookEmitter::new(settings, audit.clone(), Duration::from_secs(5)).unwrap();

        emitter.emit(&event(tenant_id)).await.unwrap();

        let entries = audit.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].tenant_id, tenant_id);
        assert_eq!(entries[0].event, WebhookEventKind::NewFile);
        assert_eq!(entries[0].url, url);
        assert_eq!(entries[0].response_status, 200);
        assert_eq!(entries[0].request_body["event"], "new_file");
    }

    #[tokio::test]
    async fn network_failure_surfaces_error_without_audit_row() {
        let tenant_id = Uuid::new_v4();
        // Unroutable port on loopback
        let settings = Arc::new(MockSettings::for_tenant(
            tenant_id,
            true,
            true,
            7,
            Some("http://127.0.0.1:9".to_string()),
            None,
        ));
        let audit = Arc::new(RecordingWebhookAudit::default());
        let emitter = WebhookEmitter::new(settings, audit.clone(), Duration::from_secs(2)).unwrap();

        let result = emitter.emit(&event(tenant_id)).await;
        assert!(matches!(result, Err(AppError::Webhook(_))));
        assert!(audit.entries().is_empty());
    }
}
