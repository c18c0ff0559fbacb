//! Invocation endpoints for the notification pipeline.

use axum::{extract::State, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use docvault_core::models::NewFileUpload;
use docvault_services::UploadOutcome;

use crate::error::{HttpAppError, ValidatedJson};
use crate::state::PipelineState;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRunResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications_sent: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// POST /api/notifications/check-expiring
///
/// Scheduled entry point. Scans every opted-in tenant for documents
/// approaching expiration and fans out emails and webhooks.
#[utoipa::path(
    post,
    path = "/api/notifications/check-expiring",
    responses(
        (status = 200, description = "Scan completed", body = NotificationRunResponse),
        (status = 500, description = "Scan could not run", body = crate::error::ErrorResponse),
    ),
    tag = "notifications"
)]
pub async fn check_expiring(
    State(pipeline): State<PipelineState>,
) -> Result<impl IntoResponse, HttpAppError> {
    let outcome = pipeline.scanner.run().await?;

    Ok(Json(NotificationRunResponse {
        success: true,
        notifications_sent: Some(outcome.notifications_sent),
        message: Some(format!(
            "Scanned {} tenants, flagged {} documents",
            outcome.tenants_scanned, outcome.documents_flagged
        )),
    }))
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewFileRequest {
    pub file_id: Uuid,
    #[validate(length(min = 1, max = 512, message = "File name must be between 1 and 512 characters"))]
    pub file_name: String,
    pub company_id: Uuid,
    pub folder_id: Option<Uuid>,
    pub uploaded_by: Option<Uuid>,
}

/// POST /api/notifications/new-file
///
/// Direct invocation of the new-file path. The uploader is excluded from
/// the recipient list; disabled settings short-circuit to success.
#[utoipa::path(
    post,
    path = "/api/notifications/new-file",
    request_body = NewFileRequest,
    responses(
        (status = 200, description = "Notification run completed", body = NotificationRunResponse),
        (status = 500, description = "Notification run failed", body = crate::error::ErrorResponse),
    ),
    tag = "notifications"
)]
pub async fn new_file(
    State(pipeline): State<PipelineState>,
    ValidatedJson(request): ValidatedJson<NewFileRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let upload = NewFileUpload {
        document_id: request.file_id,
        file_name: request.file_name,
        tenant_id: request.company_id,
        folder_id: request.folder_id,
        uploaded_by: request.uploaded_by,
    };

    let response = match pipeline.uploads.notify(upload).await? {
        UploadOutcome::Disabled => NotificationRunResponse {
            success: true,
            notifications_sent: None,
            message: Some("New file notifications are disabled for this company".to_string()),
        },
        UploadOutcome::Notified { emails_sent } => NotificationRunResponse {
            success: true,
            notifications_sent: Some(emails_sent),
            message: None,
        },
    };

    Ok(Json(response))
}
