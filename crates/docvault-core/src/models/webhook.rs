use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

/// Webhook event kinds. Mirrors the tag carried on the wire and recorded
/// in the audit log.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "webhook_event_kind", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum WebhookEventKind {
    FileExpiring,
    NewFile,
}

impl Display for WebhookEventKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            WebhookEventKind::FileExpiring => write!(f, "file_expiring"),
            WebhookEventKind::NewFile => write!(f, "new_file"),
        }
    }
}

impl FromStr for WebhookEventKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "file_expiring" => Ok(WebhookEventKind::FileExpiring),
            "new_file" => Ok(WebhookEventKind::NewFile),
            _ => Err(anyhow::anyhow!("Invalid webhook event kind: {}", s)),
        }
    }
}

/// Event payload body, tagged on the wire as
/// `"event": "file_expiring" | "new_file"` with a camelCase `data` object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum WebhookEventData {
    #[serde(rename_all = "camelCase")]
    FileExpiring {
        file_name: String,
        file_id: Uuid,
        expires_at: DateTime<Utc>,
        days_remaining: i64,
    },
    #[serde(rename_all = "camelCase")]
    NewFile {
        file_name: String,
        file_id: Uuid,
        uploaded_by: String,
        folder_name: String,
    },
}

/// A webhook event addressed to one tenant's configured endpoint.
///
/// Serializes to `{"companyId": ..., "event": ..., "data": {...}}`; the
/// serialized bytes are exactly what gets signed and transmitted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct WebhookEvent {
    #[serde(rename = "companyId")]
    pub company_id: Uuid,
    #[serde(flatten)]
    pub data: WebhookEventData,
}

impl WebhookEvent {
    pub fn kind(&self) -> WebhookEventKind {
        match self.data {
            WebhookEventData::FileExpiring { .. } => WebhookEventKind::FileExpiring,
            WebhookEventData::NewFile { .. } => WebhookEventKind::NewFile,
        }
    }

    /// Document id the event is about.
    pub fn document_id(&self) -> Uuid {
        match self.data {
            WebhookEventData::FileExpiring { file_id, .. } => file_id,
            WebhookEventData::NewFile { file_id, .. } => file_id,
        }
    }
}

/// Append-only record of one completed webhook delivery attempt.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct WebhookLog {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub event: WebhookEventKind,
    pub url: String,
    pub request_body: JsonValue,
    pub response_status: i32,
    pub response_body: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insert model for the webhook audit log
#[derive(Debug, Clone)]
pub struct NewWebhookLog {
    pub tenant_id: Uuid,
    pub event: WebhookEventKind,
    pub url: String,
    pub request_body: JsonValue,
    pub response_status: i32,
    pub response_body: Option<String>,
}
