use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

/// Document entity. `deleted_at` is a soft-delete marker; soft-deleted
/// documents are excluded from every expiration scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct Document {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub name: String,
    pub folder_id: Option<Uuid>,
    pub uploaded_by: Option<Uuid>,
    pub expires_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Upload event carried into the new-file notification path.
#[derive(Debug, Clone)]
pub struct NewFileUpload {
    pub document_id: Uuid,
    pub file_name: String,
    pub tenant_id: Uuid,
    pub folder_id: Option<Uuid>,
    pub uploaded_by: Option<Uuid>,
}

/// Request model for document creation
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentRequest {
    #[validate(length(min = 1, max = 512, message = "Name must be between 1 and 512 characters"))]
    pub name: String,
    pub company_id: Uuid,
    pub folder_id: Option<Uuid>,
    pub uploaded_by: Option<Uuid>,
    pub expires_at: Option<DateTime<Utc>>,
}
