use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Metadata of an uploaded file; the bytes live under `upload.dir/stored_name`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/file.ts")]
pub struct File {
    pub download_token: String,
    pub original_name: String,
    #[serde(skip_serializing, default)]
    #[ts(skip)]
    pub stored_name: String,
    pub file_size: i64,
    pub content_type: String,
    pub user_id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
