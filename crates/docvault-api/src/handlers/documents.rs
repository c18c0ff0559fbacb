//! Document creation.
//!
//! Creating a document enqueues the new-file notification job; the
//! response never waits on notification fan-out.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use docvault_core::models::{CreateDocumentRequest, NewFileUpload};
use docvault_core::AppError;

use crate::error::{HttpAppError, ValidatedJson};
use crate::job_queue::NotificationJob;
use crate::state::{DbState, PipelineState};

/// POST /api/documents
#[utoipa::path(
    post,
    path = "/api/documents",
    request_body = CreateDocumentRequest,
    responses(
        (status = 201, description = "Document created"),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 404, description = "Folder not found", body = crate::error::ErrorResponse),
    ),
    tag = "documents"
)]
pub async fn create_document(
    State(db): State<DbState>,
    State(pipeline): State<PipelineState>,
    ValidatedJson(request): ValidatedJson<CreateDocumentRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let document = db
        .documents
        .create(
            request.company_id,
            request.name,
            request.folder_id,
            request.uploaded_by,
            request.expires_at,
        )
        .await?;

    // A full queue only costs the notification, never the document.
    let job = NotificationJob::NewFile(NewFileUpload {
        document_id: document.id,
        file_name: document.name.clone(),
        tenant_id: document.tenant_id,
        folder_id: document.folder_id,
        uploaded_by: document.uploaded_by,
    });
    if let Err(e) = pipeline.jobs.submit(job) {
        tracing::warn!(document_id = %document.id, error = %e, "Could not enqueue new-file notification");
    }

    Ok((StatusCode::CREATED, Json(document)))
}

/// GET /api/tenants/{tenant_id}/documents/{document_id}
#[utoipa::path(
    get,
    path = "/api/tenants/{tenant_id}/documents/{document_id}",
    params(
        ("tenant_id" = Uuid, Path, description = "Tenant ID"),
        ("document_id" = Uuid, Path, description = "Document ID"),
    ),
    responses(
        (status = 200, description = "Document record"),
        (status = 404, description = "Document not found", body = crate::error::ErrorResponse),
    ),
    tag = "documents"
)]
pub async fn get_document(
    State(db): State<DbState>,
    Path((tenant_id, document_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, HttpAppError> {
    let document = db
        .documents
        .get(tenant_id, document_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Document not found".to_string()))?;
    Ok(Json(document))
}

/// DELETE /api/tenants/{tenant_id}/documents/{document_id}
///
/// Soft delete. The document drops out of expiration scans immediately;
/// its audit log entries remain.
#[utoipa::path(
    delete,
    path = "/api/tenants/{tenant_id}/documents/{document_id}",
    params(
        ("tenant_id" = Uuid, Path, description = "Tenant ID"),
        ("document_id" = Uuid, Path, description = "Document ID"),
    ),
    responses(
        (status = 204, description = "Document deleted"),
        (status = 404, description = "Document not found", body = crate::error::ErrorResponse),
    ),
    tag = "documents"
)]
pub async fn delete_document(
    State(db): State<DbState>,
    Path((tenant_id, document_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, HttpAppError> {
    let deleted = db.documents.soft_delete(tenant_id, document_id).await?;
    if !deleted {
        return Err(AppError::NotFound("Document not found".to_string()).into());
    }
    Ok(StatusCode::NO_CONTENT)
}
