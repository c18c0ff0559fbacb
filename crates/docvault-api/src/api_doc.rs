//! OpenAPI document assembly.

use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::handlers::notifications::{NewFileRequest, NotificationRunResponse};
use crate::handlers::settings::NotificationSettingsResponse;
use docvault_core::models::{CreateDocumentRequest, UpdateNotificationSettingsRequest};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::notifications::check_expiring,
        crate::handlers::notifications::new_file,
        crate::handlers::documents::create_document,
        crate::handlers::documents::get_document,
        crate::handlers::documents::delete_document,
        crate::handlers::audit::list_notification_logs,
        crate::handlers::audit::list_webhook_logs,
        crate::handlers::settings::get_settings,
        crate::handlers::settings::update_settings,
    ),
    components(schemas(
        ErrorResponse,
        NewFileRequest,
        NotificationRunResponse,
        NotificationSettingsResponse,
        CreateDocumentRequest,
        UpdateNotificationSettingsRequest,
    )),
    tags(
        (name = "notifications", description = "Notification pipeline invocation"),
        (name = "documents", description = "Document records"),
        (name = "audit", description = "Append-only delivery logs"),
        (name = "settings", description = "Per-tenant notification settings"),
    )
)]
pub struct ApiDoc;
