use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A homeroom group of students, e.g. "X IPA 1".
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/class.ts")]
pub struct Class {
    pub id: i64,
    pub name: String,
    pub grade_level: i32,
    /// e.g. "2025/2026"
    pub academic_year: String,
    pub homeroom_teacher_id: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
