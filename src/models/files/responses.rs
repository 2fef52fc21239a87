use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/file.ts")]
pub struct FileUploadResponse {
    /// Referenced as `attachment` by materials, assignments and submissions.
    pub download_token: String,
    pub file_name: String,
    pub size: i64,
    pub content_type: String,
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}
