pub mod document;
pub mod folder;
pub mod member;
pub mod notification;
pub mod tenant;
pub mod webhook;

pub use document::{CreateDocumentRequest, Document, NewFileUpload};
pub use folder::Folder;
pub use member::{MemberRole, Profile, Recipient, TenantMembership};
pub use notification::{
    NewNotificationLog, NotificationKind, NotificationLog, NotificationSetting,
    NotificationStatus, UpdateNotificationSettingsRequest,
};
pub use tenant::Tenant;
pub use webhook::{NewWebhookLog, WebhookEvent, WebhookEventData, WebhookEventKind, WebhookLog};

use serde::Deserialize;
use utoipa::ToSchema;

/// Paging parameters for the audit log endpoints
#[derive(Debug, Deserialize, ToSchema)]
pub struct PageQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            limit: Some(50),
            offset: Some(0),
        }
    }
}

impl PageQuery {
    /// Clamp the requested page to sane bounds.
    pub fn bounded(&self) -> (i64, i64) {
        let limit = self.limit.unwrap_or(50).clamp(1, 200);
        let offset = self.offset.unwrap_or(0).max(0);
        (limit, offset)
    }
}
