use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

/// Default expiration lookahead when the setting is unset or non-positive
pub const DEFAULT_EXPIRATION_LOOKAHEAD_DAYS: i64 = 7;

/// Notification kinds recorded in the audit log
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "notification_kind", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Expiration,
    NewFile,
}

impl Display for NotificationKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            NotificationKind::Expiration => write!(f, "expiration"),
            NotificationKind::NewFile => write!(f, "new_file"),
        }
    }
}

impl FromStr for NotificationKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "expiration" => Ok(NotificationKind::Expiration),
            "new_file" => Ok(NotificationKind::NewFile),
            _ => Err(anyhow::anyhow!("Invalid notification kind: {}", s)),
        }
    }
}

/// Outcome of one attempted email send
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "notification_status", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    Sent,
    Failed,
}

impl Display for NotificationStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            NotificationStatus::Sent => write!(f, "sent"),
            NotificationStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Per-tenant notification configuration. Read-only to the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct NotificationSetting {
    pub tenant_id: Uuid,
    pub notify_expiration: bool,
    pub notify_new_files: bool,
    pub expiration_days_before: i32,
    pub webhook_url: Option<String>,
    pub webhook_secret: Option<String>,
    pub custom_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NotificationSetting {
    /// Effective lookahead window in days. Non-positive stored values
    /// fall back to the default.
    pub fn lookahead_days(&self) -> i64 {
        if self.expiration_days_before > 0 {
            self.expiration_days_before as i64
        } else {
            DEFAULT_EXPIRATION_LOOKAHEAD_DAYS
        }
    }
}

/// Append-only record of one attempted email send. Never mutated.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct NotificationLog {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub kind: NotificationKind,
    pub recipient_email: String,
    pub document_id: Option<Uuid>,
    pub status: NotificationStatus,
    pub created_at: DateTime<Utc>,
}

/// Insert model for the notification audit log
#[derive(Debug, Clone)]
pub struct NewNotificationLog {
    pub tenant_id: Uuid,
    pub kind: NotificationKind,
    pub recipient_email: String,
    pub document_id: Option<Uuid>,
    pub status: NotificationStatus,
}

/// Request model for settings updates
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNotificationSettingsRequest {
    pub notify_expiration: Option<bool>,
    pub notify_new_files: Option<bool>,
    #[validate(range(min = 1, max = 365, message = "Lookahead must be between 1 and 365 days"))]
    pub expiration_days_before: Option<i32>,
    #[validate(
        url(message = "Invalid webhook URL"),
        length(max = 2048, message = "URL must be at most 2048 characters")
    )]
    pub webhook_url: Option<String>,
    #[validate(length(
        min = 16,
        max = 256,
        message = "Webhook secret must be between 16 and 256 characters"
    ))]
    pub webhook_secret: Option<String>,
    #[validate(length(max = 1000, message = "Custom message must be at most 1000 characters"))]
    pub custom_message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setting(days: i32) -> NotificationSetting {
        NotificationSetting {
            tenant_id: Uuid::new_v4(),
            notify_expiration: true,
            notify_new_files: true,
            expiration_days_before: days,
            webhook_url: None,
            webhook_secret: None,
            custom_message: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn lookahead_uses_stored_value_when_positive() {
        assert_eq!(setting(14).lookahead_days(), 14);
        assert_eq!(setting(1).lookahead_days(), 1);
    }

    #[test]
    fn lookahead_defaults_when_non_positive() {
        assert_eq!(setting(0).lookahead_days(), DEFAULT_EXPIRATION_LOOKAHEAD_DAYS);
        assert_eq!(setting(-3).lookahead_days(), DEFAULT_EXPIRATION_LOOKAHEAD_DAYS);
    }
}
