//! Configuration module
//!
//! Environment-driven configuration for the API and the notification
//! pipeline: database, server, CORS, SMTP, webhook delivery, and scan
//! concurrency settings.

use std::env;

// Common constants
const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const WEBHOOK_TIMEOUT_SECS: u64 = 30;
const EMAIL_TIMEOUT_SECS: u64 = 30;
const SCAN_MAX_CONCURRENT_TENANTS: usize = 8;
const NOTIFY_QUEUE_SIZE: usize = 1000;
const NOTIFY_MAX_CONCURRENT_JOBS: usize = 10;

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    server_port: u16,
    cors_origins: Vec<String>,
    environment: String,
    database_url: String,
    db_max_connections: u32,
    db_timeout_seconds: u64,
    // Email transport
    smtp_host: Option<String>,
    smtp_port: Option<u16>,
    smtp_user: Option<String>,
    smtp_password: Option<String>,
    smtp_from: Option<String>,
    smtp_tls: bool,
    email_timeout_seconds: u64,
    // Webhook delivery
    webhook_timeout_seconds: u64,
    // Expiration scan
    scan_max_concurrent_tenants: usize,
    // Upload notification job queue
    notify_queue_size: usize,
    notify_max_concurrent_jobs: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        // Load .env if present; real environments set variables directly.
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "4000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| MAX_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| CONNECTION_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            smtp_host: env::var("SMTP_HOST").ok(),
            smtp_port: env::var("SMTP_PORT").ok().and_then(|s| s.parse().ok()),
            smtp_user: env::var("SMTP_USER").ok(),
            smtp_password: env::var("SMTP_PASSWORD").ok(),
            smtp_from: env::var("SMTP_FROM").ok(),
            smtp_tls: env::var("SMTP_TLS")
                .unwrap_or_else(|_| "true".to_string())
                .to_lowercase()
                .parse()
                .unwrap_or(true),
            email_timeout_seconds: env::var("EMAIL_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| EMAIL_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(EMAIL_TIMEOUT_SECS),
            webhook_timeout_seconds: env::var("WEBHOOK_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| WEBHOOK_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(WEBHOOK_TIMEOUT_SECS),
            scan_max_concurrent_tenants: env::var("SCAN_MAX_CONCURRENT_TENANTS")
                .unwrap_or_else(|_| SCAN_MAX_CONCURRENT_TENANTS.to_string())
                .parse()
                .unwrap_or(SCAN_MAX_CONCURRENT_TENANTS)
                .max(1),
            notify_queue_size: env::var("NOTIFY_QUEUE_SIZE")
                .unwrap_or_else(|_| NOTIFY_QUEUE_SIZE.to_string())
                .parse()
                .unwrap_or(NOTIFY_QUEUE_SIZE)
                .max(1),
            notify_max_concurrent_jobs: env::var("NOTIFY_MAX_CONCURRENT_JOBS")
                .unwrap_or_else(|_| NOTIFY_MAX_CONCURRENT_JOBS.to_string())
                .parse()
                .unwrap_or(NOTIFY_MAX_CONCURRENT_JOBS)
                .max(1),
        })
    }

    /// Fail fast on misconfiguration that would otherwise surface mid-scan.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.is_production() && self.cors_origins.contains(&"*".to_string()) {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }
        if self.smtp_host.is_some() && self.smtp_from.is_none() {
            return Err(anyhow::anyhow!("SMTP_FROM must be set when SMTP_HOST is configured"));
        }
        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.db_timeout_seconds
    }

    pub fn smtp_host(&self) -> Option<&str> {
        self.smtp_host.as_deref()
    }

    pub fn smtp_port(&self) -> Option<u16> {
        self.smtp_port
    }

    pub fn smtp_user(&self) -> Option<&str> {
        self.smtp_user.as_deref()
    }

    pub fn smtp_password(&self) -> Option<&str> {
        self.smtp_password.as_deref()
    }

    pub fn smtp_from(&self) -> Option<&str> {
        self.smtp_from.as_deref()
    }

    pub fn smtp_tls(&self) -> bool {
        self.smtp_tls
    }

    pub fn email_timeout_seconds(&self) -> u64 {
        self.email_timeout_seconds
    }

    pub fn webhook_timeout_seconds(&self) -> u64 {
        self.webhook_timeout_seconds
    }

    pub fn scan_max_concurrent_tenants(&self) -> usize {
        self.scan_max_concurrent_tenants
    }

    pub fn notify_queue_size(&self) -> usize {
        self.notify_queue_size
    }

    pub fn notify_max_concurrent_jobs(&self) -> usize {
        self.notify_max_concurrent_jobs
    }
}
