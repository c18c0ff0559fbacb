//! Email composition.
//!
//! Pure templates: no IO, no clock, no store access. Callers resolve
//! tenant and uploader names before composing.

use chrono::{DateTime, Utc};

/// What an email notification is about. Closed set; adding a variant
/// forces every template and dispatch site to handle it.
#[derive(Debug, Clone, PartialEq)]
pub enum NotificationContent {
    Expiration {
        file_name: String,
        expires_at: DateTime<Utc>,
        days_remaining: i64,
        custom_message: Option<String>,
    },
    NewFile {
        file_name: String,
        folder_name: String,
        uploaded_by: String,
    },
}

/// A composed email, ready for the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailMessage {
    pub subject: String,
    pub body_html: String,
}

/// Render the notification email for a tenant.
pub fn compose(tenant_name: &str, content: &NotificationContent) -> EmailMessage {
    match content {
        NotificationContent::Expiration {
            file_name,
            expires_at,
            days_remaining,
            custom_message,
        } => {
            let subject = format!("[{}] - File approaching expiration", tenant_name);
            let expires_on = expires_at.format("%d/%m/%Y");
            let custom_block = custom_message
                .as_deref()
                .map(|msg| format!("<p>{}</p>\n", msg))
                .unwrap_or_default();
            let body_html = format!(
                "<h1>File approaching expiration</h1>\n\
                 <p>Hello,</p>\n\
                 <p>The file <strong>\"{file_name}\"</strong> at {tenant_name} is close to its expiration date.</p>\n\
                 <p><strong>Expiration date:</strong> {expires_on}</p>\n\
                 <p><strong>Days remaining:</strong> {days_remaining}</p>\n\
                 {custom_block}\
                 <p>Sign in to renew or archive the document.</p>\n"
            );
            EmailMessage { subject, body_html }
        }
        NotificationContent::NewFile {
            file_name,
            folder_name,
            uploaded_by,
        } => {
            let subject = format!("[{}] - New file added", tenant_name);
            let body_html = format!(
                "<h1>New file added</h1>\n\
                 <p>Hello,</p>\n\
                 <p>A new file was added at {tenant_name}.</p>\n\
                 <p><strong>File name:</strong> {file_name}</p>\n\
                 <p><strong>Folder:</strong> {folder_name}</p>\n\
                 <p><strong>Uploaded by:</strong> {uploaded_by}</p>\n\
                 <p>Sign in to view it.</p>\n"
            );
            EmailMessage { subject, body_html }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiration_template_includes_all_fields() {
        let content = NotificationContent::Expiration {
            file_name: "insurance-policy.pdf".to_string(),
            expires_at: "2026-09-15T12:00:00Z".parse().unwrap(),
            days_remaining: 3,
            custom_message: None,
        };
        let message = compose("Acme Corp", &content);

        assert_eq!(message.subject, "[Acme Corp] - File approaching expiration");
        assert!(message.body_html.contains("\"insurance-policy.pdf\""));
        assert!(message.body_html.contains("15/09/2026"));
        assert!(message.body_html.contains("Days remaining:</strong> 3"));
    }

    #[test]
    fn expiration_template_renders_custom_message_when_present() {
        let base = NotificationContent::Expiration {
            file_name: "f.pdf".to_string(),
            expires_at: Utc::now(),
            days_remaining: 1,
            custom_message: Some("Please contact the compliance team.".to_string()),
        };
        let message = compose("Acme Corp", &base);
        assert!(message.body_html.contains("Please contact the compliance team."));

        let without = NotificationContent::Expiration {
            file_name: "f.pdf".to_string(),
            expires_at: Utc::now(),
            days_remaining: 1,
            custom_message: None,
        };
        let message = compose("Acme Corp", &without);
        assert!(!message.body_html.contains("compliance"));
    }

    #[test]
    fn new_file_template_includes_folder_and_uploader() {
        let content = NotificationContent::NewFile {
            file_name: "q3-report.xlsx".to_string(),
            folder_name: "Root".to_string(),
            uploaded_by: "System".to_string(),
        };
        let message = compose("Acme Corp", &content);

        assert_eq!(message.subject, "[Acme Corp] - New file added");
        assert!(message.body_html.contains("q3-report.xlsx"));
        assert!(message.body_html.contains("Folder:</strong> Root"));
        assert!(message.body_html.contains("Uploaded by:</strong> System"));
    }
}
