//! Route configuration and setup.

use anyhow::Result;
use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use docvault_core::Config;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::handlers::{audit, documents, health, notifications, settings};
use crate::state::AppState;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>> {
    let cors = setup_cors(config)?;

    let app = Router::new()
        .route("/health", get(health::health))
        .route(
            "/api/openapi.json",
            get(|| async { axum::Json(crate::api_doc::ApiDoc::openapi()) }),
        )
        .route(
            "/api/notifications/check-expiring",
            post(notifications::check_expiring),
        )
        .route("/api/notifications/new-file", post(notifications::new_file))
        .route("/api/documents", post(documents::create_document))
        .route(
            "/api/tenants/{tenant_id}/documents/{document_id}",
            get(documents::get_document).delete(documents::delete_document),
        )
        .route(
            "/api/tenants/{tenant_id}/notification-logs",
            get(audit::list_notification_logs),
        )
        .route(
            "/api/tenants/{tenant_id}/webhook-logs",
            get(audit::list_webhook_logs),
        )
        .route(
            "/api/tenants/{tenant_id}/notification-settings",
            get(settings::get_settings).put(settings::update_settings),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    Ok(app)
}

/// CORS for browser and scheduler callers. Preflight OPTIONS requests are
/// answered by the layer itself.
fn setup_cors(config: &Config) -> Result<CorsLayer> {
    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .map_err(|e| anyhow::anyhow!("Invalid CORS origin '{}': {}", o, e))
            })
            .collect::<Result<Vec<_>>>()?;
        CorsLayer::new().allow_origin(origins)
    };

    Ok(cors
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
        ]))
}
