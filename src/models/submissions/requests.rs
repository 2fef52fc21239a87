use serde::Deserialize;
use ts_rs::TS;

use super::entities::SubmissionStatus;
use crate::models::common::{PaginationQuery, de};

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/submission.ts")]
pub struct CreateSubmissionRequest {
    pub assignment_id: i64,
    pub content: Option<String>,
    pub attachment: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/submission.ts")]
pub struct GradeSubmissionRequest {
    pub score: f64,
    pub feedback: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/submission.ts")]
pub struct SubmissionListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "de::option_from_str")]
    pub assignment_id: Option<i64>,
    #[serde(default, deserialize_with = "de::option_from_str")]
    pub student_id: Option<i64>,
    pub status: Option<SubmissionStatus>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/submission.ts")]
pub struct GradeReportParams {
    #[serde(deserialize_with = "de::from_str")]
    pub subject_id: i64,
}

/// Storage-level filter; `assignment_ids` restricts results to assignments
/// the caller can see.
#[derive(Debug, Clone, Default)]
pub struct SubmissionListQuery {
    pub page: u64,
    pub size: u64,
    pub assignment_id: Option<i64>,
    pub student_id: Option<i64>,
    pub status: Option<SubmissionStatus>,
    pub assignment_ids: Option<Vec<i64>>,
}
