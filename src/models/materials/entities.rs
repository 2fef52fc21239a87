use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/material.ts")]
pub struct Material {
    pub id: i64,
    pub topic_id: i64,
    pub title: String,
    pub content: Option<String>,
    /// Download token of an uploaded file.
    pub attachment: Option<String>,
    pub created_by: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
