use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::{DateTime, Utc};

use super::{SubmissionService, load_visible_submission};
use crate::errors::ApiError;
use crate::models::{
    ApiResponse, ErrorCode,
    assignments::entities::Assignment,
    submissions::{entities::SubmissionStatus, requests::CreateSubmissionRequest},
};
use crate::services::access::{
    current_user, ensure_attachment, ensure_subject_visible, load_subject,
};
use crate::services::assignments::load_assignment;

/// Status of a submission made at `at`: late work is only accepted when allowed.
pub(crate) fn status_for(
    assignment: &Assignment,
    at: DateTime<Utc>,
) -> Result<SubmissionStatus, ApiError> {
    if !assignment.is_past_deadline(at) {
        Ok(SubmissionStatus::Submitted)
    } else if assignment.allow_late {
        Ok(SubmissionStatus::Late)
    } else {
        Err(ApiError::bad_request(
            ErrorCode::SubmissionDeadlinePassed,
            "The deadline for this assignment has passed",
        ))
    }
}

pub async fn create_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission: CreateSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let claims = current_user(request)?;

    let content = submission
        .content
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());
    if content.is_none() && submission.attachment.is_none() {
        return Err(ApiError::bad_request(
            ErrorCode::BadRequest,
            "A submission needs content or an attachment",
        )
        .into());
    }

    let storage = service.get_storage(request)?;
    let assignment = load_assignment(&storage, submission.assignment_id).await?;
    let subject = load_subject(&storage, assignment.subject_id).await?;
    ensure_subject_visible(&storage, claims, &subject).await?;
    ensure_attachment(&storage, submission.attachment.as_deref()).await?;

    let status = status_for(&assignment, Utc::now())?;

    let saved = storage
        .upsert_submission(
            assignment.id,
            claims.user_id,
            content,
            submission.attachment,
            status,
        )
        .await?;

    tracing::info!(
        "Student {} submitted assignment {} ({})",
        claims.user_id,
        assignment.id,
        saved.status
    );
    Ok(HttpResponse::Created().json(ApiResponse::success(saved, "Submission saved successfully")))
}

pub async fn delete_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
) -> ActixResult<HttpResponse> {
    let claims = current_user(request)?;
    let storage = service.get_storage(request)?;

    let submission = load_visible_submission(&storage, claims, submission_id).await?;
    if submission.student_id != claims.user_id {
        return Err(ApiError::forbidden(
            ErrorCode::Forbidden,
            "Only the submitting student can withdraw a submission",
        )
        .into());
    }
    if submission.is_graded() {
        return Err(ApiError::conflict(
            ErrorCode::SubmissionAlreadyGraded,
            "A graded submission can no longer be withdrawn",
        )
        .into());
    }

    storage.delete_submission(submission_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Submission deleted successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn assignment(deadline: Option<DateTime<Utc>>, allow_late: bool) -> Assignment {
        let now = Utc::now();
        Assignment {
            id: 1,
            subject_id: 1,
            topic_id: None,
            title: "Laporan praktikum".into(),
            description: None,
            attachment: None,
            max_score: 100.0,
            deadline,
            allow_late,
            created_by: 1,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_submission_lateness() {
        let now = Utc::now();
        let yesterday = Some(now - Duration::days(1));
        let tomorrow = Some(now + Duration::days(1));

        assert_eq!(
            status_for(&assignment(None, false), now).unwrap(),
            SubmissionStatus::Submitted
        );
        assert_eq!(
            status_for(&assignment(tomorrow, false), now).unwrap(),
            SubmissionStatus::Submitted
        );
        assert_eq!(
            status_for(&assignment(yesterday, true), now).unwrap(),
            SubmissionStatus::Late
        );

        let err = status_for(&assignment(yesterday, false), now).unwrap_err();
        assert_eq!(err.code, ErrorCode::SubmissionDeadlinePassed);
    }
}
