use serde::Serialize;
use ts_rs::TS;

use super::entities::Submission;
use crate::models::PaginatedResponse;

pub type SubmissionListResponse = PaginatedResponse<Submission>;

/// One student's graded work, aggregated over a set of assignments.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/submission.ts")]
pub struct StudentGradeSummary {
    pub student_id: i64,
    pub username: String,
    pub display_name: Option<String>,
    pub graded_count: i64,
    /// Mean of raw scores.
    pub average_score: Option<f64>,
    /// Mean of score / max_score, scaled to 0..=100.
    pub average_percentage: Option<f64>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/submission.ts")]
pub struct GradeReportResponse {
    pub subject_id: Option<i64>,
    pub class_id: i64,
    pub assignment_count: i64,
    pub students: Vec<StudentGradeSummary>,
}
