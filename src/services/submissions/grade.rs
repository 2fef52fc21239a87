use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SubmissionService, load_visible_submission, submission_not_found};
use crate::errors::ApiError;
use crate::models::{ApiResponse, ErrorCode, submissions::requests::GradeSubmissionRequest};
use crate::services::access::current_user;
use crate::services::assignments::load_assignment;

pub async fn grade_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
    grade: GradeSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let claims = current_user(request)?;
    let storage = service.get_storage(request)?;

    // also enforces the subject-teacher rule for teachers
    let submission = load_visible_submission(&storage, claims, submission_id).await?;
    let assignment = load_assignment(&storage, submission.assignment_id).await?;

    if !grade.score.is_finite() || grade.score < 0.0 || grade.score > assignment.max_score {
        return Err(ApiError::bad_request(
            ErrorCode::ScoreOutOfRange,
            format!("Score must be between 0 and {}", assignment.max_score),
        )
        .into());
    }

    let feedback = grade
        .feedback
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty());

    let graded = storage
        .grade_submission(submission_id, grade.score, feedback, claims.user_id)
        .await?
        .ok_or_else(submission_not_found)?;

    tracing::info!(
        "Submission {} graded {} by user {}",
        submission_id,
        grade.score,
        claims.user_id
    );
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        graded,
        "Submission graded successfully",
    )))
}
