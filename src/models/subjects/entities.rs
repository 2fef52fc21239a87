use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A subject taught to one class by one teacher.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/subject.ts")]
pub struct Subject {
    pub id: i64,
    pub class_id: i64,
    pub teacher_id: i64,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
