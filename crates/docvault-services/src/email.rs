//! SMTP email delivery via lettre.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::Arc;

use docvault_core::{AppError, Config, EmailTransport};

/// SMTP-backed email transport. Construction returns `None` when SMTP is
/// not configured; setup decides what to do about that.
#[derive(Clone)]
pub struct EmailService {
    mailer: Arc<AsyncSmtpTransport<Tokio1Executor>>,
    from: String,
}

impl EmailService {
    /// Create the email service from config. Returns `None` if SMTP is
    /// not configured.
    pub fn from_config(config: &Config) -> Option<Self> {
        let host = config.smtp_host()?;
        let from = config.smtp_from()?.to_string();
        let port = config.smtp_port().unwrap_or(587);
        let timeout = std::time::Duration::from_secs(config.email_timeout_seconds());

        let mailer = if config.smtp_tls() {
            let b = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host).ok()?;
            let b = b.port(port).timeout(Some(timeout));
            let b = if let (Some(u), Some(p)) = (config.smtp_user(), config.smtp_password()) {
                b.credentials(Credentials::new(u.to_string(), p.to_string()))
            } else {
                b
            };
            tracing::info!(host = %host, port = port, "Email service initialized (SMTP with STARTTLS)");
            b.build()
        } else {
            let b = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
                .port(port)
                .timeout(Some(timeout));
            let b = if let (Some(u), Some(p)) = (config.smtp_user(), config.smtp_password()) {
                b.credentials(Credentials::new(u.to_string(), p.to_string()))
            } else {
                b
            };
            tracing::info!(host = %host, port = port, "Email service initialized (SMTP)");
            b.build()
        };

        Some(Self {
            mailer: Arc::new(mailer),
            from,
        })
    }

    async fn send_html(&self, to: &str, subject: &str, body_html: &str) -> Result<(), AppError> {
        let to_addr: Mailbox = to
            .parse()
            .map_err(|e| AppError::Email(format!("Invalid recipient address: {}", e)))?;
        let from_addr: Mailbox = self
            .from
            .parse()
            .map_err(|e| AppError::Email(format!("Invalid SMTP_FROM: {}", e)))?;

        let email = Message::builder()
            .from(from_addr)
            .to(to_addr)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(body_html.to_string())
            .map_err(|e| AppError::Email(e.to_string()))?;

        self.mailer
            .send(email)
            .await
            .map_err(|e| AppError::Email(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl EmailTransport for EmailService {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), AppError> {
        self.send_html(to, subject, body).await
    }
}

/// Transport used when SMTP is absent (local development). Accepts every
/// message and logs it instead of delivering.
#[derive(Clone, Default)]
pub struct LogOnlyEmailService;

#[async_trait]
impl EmailTransport for LogOnlyEmailService {
    async fn send(&self, to: &str, subject: &str, _body: &str) -> Result<(), AppError> {
        tracing::info!(to = %to, subject = %subject, "SMTP not configured, logging email instead of sending");
        Ok(())
    }
}
