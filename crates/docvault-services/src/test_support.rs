//! Shared mocks and fixtures for the service unit tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use docvault_core::{
    models::{
        Document, NewNotificationLog, NewWebhookLog, NotificationSetting, Recipient,
    },
    AppError, DocumentStore, EmailTransport, FolderDirectory, MemberDirectory,
    NotificationAudit, SettingsStore, TenantDirectory, WebhookAudit,
};

pub fn setting(
    tenant_id: Uuid,
    notify_expiration: bool,
    notify_new_files: bool,
    expiration_days_before: i32,
    webhook_url: Option<String>,
    webhook_secret: Option<String>,
) -> NotificationSetting {
    NotificationSetting {
        tenant_id,
        notify_expiration,
        notify_new_files,
        expiration_days_before,
        webhook_url,
        webhook_secret,
        custom_message: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn document(
    tenant_id: Uuid,
    name: &str,
    expires_at: Option<DateTime<Utc>>,
) -> Document {
    Document {
        id: Uuid::new_v4(),
        tenant_id,
        name: name.to_string(),
        folder_id: None,
        uploaded_by: None,
        expires_at,
        deleted_at: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[derive(Default)]
pub struct MockSettings {
    rows: Vec<NotificationSetting>,
}

impl MockSettings {
    pub fn with_rows(rows: Vec<NotificationSetting>) -> Self {
        Self { rows }
    }

    pub fn for_tenant(
        tenant_id: Uuid,
        notify_expiration: bool,
        notify_new_files: bool,
        expiration_days_before: i32,
        webhook_url: Option<String>,
        webhook_secret: Option<String>,
    ) -> Self {
        Self::with_rows(vec![setting(
            tenant_id,
            notify_expiration,
            notify_new_files,
            expiration_days_before,
            webhook_url,
            webhook_secret,
        )])
    }
}

#[async_trait]
impl SettingsStore for MockSettings {
    async fn settings_for_tenant(
        &self,
        tenant_id: Uuid,
    ) -> Result<Option<NotificationSetting>, AppError> {
        Ok(self.rows.iter().find(|s| s.tenant_id == tenant_id).cloned())
    }

    async fn expiration_enabled(&self) -> Result<Vec<NotificationSetting>, AppError> {
        Ok(self
            .rows
            .iter()
            .filter(|s| s.notify_expiration)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct MockDocuments {
    docs: Vec<Document>,
}

impl MockDocuments {
    pub fn with_docs(docs: Vec<Document>) -> Self {
        Self { docs }
    }
}

#[async_trait]
impl DocumentStore for MockDocuments {
    async fn expiring_between(
        &self,
        tenant_id: Uuid,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> Result<Vec<Document>, AppError> {
        Ok(self
            .docs
            .iter()
            .filter(|d| {
                d.tenant_id == tenant_id
                    && d.deleted_at.is_none()
                    && d.expires_at.is_some_and(|e| e >= from && e <= until)
            })
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct MockMembers {
    recipients: HashMap<Uuid, Vec<Recipient>>,
    names: HashMap<Uuid, String>,
}

impl MockMembers {
    pub fn with_recipients(tenant_id: Uuid, recipients: Vec<Recipient>) -> Self {
        let mut map = HashMap::new();
        map.insert(tenant_id, recipients);
        Self {
            recipients: map,
            names: HashMap::new(),
        }
    }

    pub fn named(mut self, user_id: Uuid, name: &str) -> Self {
        self.names.insert(user_id, name.to_string());
        self
    }
}

#[async_trait]
impl MemberDirectory for MockMembers {
    async fn recipients(&self, tenant_id: Uuid) -> Result<Vec<Recipient>, AppError> {
        Ok(self.recipients.get(&tenant_id).cloned().unwrap_or_default())
    }

    async fn display_name(&self, user_id: Uuid) -> Result<Option<String>, AppError> {
        Ok(self.names.get(&user_id).cloned())
    }
}

#[derive(Default)]
pub struct MockTenants {
    names: HashMap<Uuid, String>,
}

impl MockTenants {
    pub fn with_name(tenant_id: Uuid, name: &str) -> Self {
        let mut names = HashMap::new();
        names.insert(tenant_id, name.to_string());
        Self { names }
    }
}

#[async_trait]
impl TenantDirectory for MockTenants {
    async fn tenant_name(&self, tenant_id: Uuid) -> Result<Option<String>, AppError> {
        Ok(self.names.get(&tenant_id).cloned())
    }
}

#[derive(Default)]
pub struct MockFolders {
    names: HashMap<Uuid, String>,
}

impl MockFolders {
    pub fn with_name(folder_id: Uuid, name: &str) -> Self {
        let mut names = HashMap::new();
        names.insert(folder_id, name.to_string());
        Self { names }
    }
}

#[async_trait]
impl FolderDirectory for MockFolders {
    async fn folder_name(&self, folder_id: Uuid) -> Result<Option<String>, AppError> {
        Ok(self.names.get(&folder_id).cloned())
    }
}

#[derive(Default)]
pub struct RecordingNotificationAudit {
    entries: Mutex<Vec<NewNotificationLog>>,
}

impl RecordingNotificationAudit {
    pub fn entries(&self) -> Vec<NewNotificationLog> {
        self.entries.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationAudit for RecordingNotificationAudit {
    async fn record(&self, entry: NewNotificationLog) -> Result<(), AppError> {
        self.entries.lock().unwrap().push(entry);
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingWebhookAudit {
    entries: Mutex<Vec<NewWebhookLog>>,
}

impl RecordingWebhookAudit {
    pub fn entries(&self) -> Vec<NewWebhookLog> {
        self.entries.lock().unwrap().clone()
    }
}

#[async_trait]
impl WebhookAudit for RecordingWebhookAudit {
    async fn record(&self, entry: NewWebhookLog) -> Result<(), AppError> {
        self.entries.lock().unwrap().push(entry);
        Ok(())
    }
}

#[derive(Default)]
pub struct MockEmail {
    fail_for: Vec<String>,
    sent: Mutex<Vec<(String, String)>>,
}

impl MockEmail {
    pub fn failing_for(address: &str) -> Self {
        Self {
            fail_for: vec![address.to_string()],
            sent: Mutex::default(),
        }
    }

    /// (recipient, subject) pairs of accepted sends
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailTransport for MockEmail {
    async fn send(&self, to: &str, subject: &str, _body: &str) -> Result<(), AppError> {
        if self.fail_for.iter().any(|a| a == to) {
            return Err(AppError::Email(format!("mailbox unavailable: {}", to)));
        }
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), subject.to_string()));
        Ok(())
    }
}

/// Spin up a loopback HTTP listener that records the signature header and
/// raw body of every POST it receives.
pub async fn loopback_webhook_server() -> (String, Arc<Mutex<Vec<(String, Vec<u8>)>>>) {
    loopback_webhook_server_responding("ok".to_string()).await
}

/// Same as `loopback_webhook_server`, answering with the given body.
pub async fn loopback_webhook_server_responding(
    response: String,
) -> (String, Arc<Mutex<Vec<(String, Vec<u8>)>>>) {
    use axum::{body::Bytes, extract::State, http::HeaderMap, routing::post, Router};

    type Received = Arc<Mutex<Vec<(String, Vec<u8>)>>>;

    let received: Received = Arc::default();
    let state = received.clone();

    let app = Router::new()
        .route(
            "/hook",
            post(
                move |State(state): State<Received>, headers: HeaderMap, body: Bytes| {
                    let response = response.clone();
                    async move {
                        let signature = headers
                            .get("X-Webhook-Signature")
                            .and_then(|v| v.to_str().ok())
                            .unwrap_or_default()
                            .to_string();
                        state.lock().unwrap().push((signature, body.to_vec()));
                        response
                    }
                },
            ),
        )
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/hook", addr), received)
}
