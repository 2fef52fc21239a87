pub mod create;
pub mod grade;
pub mod list;
pub mod report;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::ApiError;
use crate::middlewares::AuthClaims;
use crate::models::ErrorCode;
use crate::models::submissions::entities::Submission;
use crate::models::submissions::requests::{
    CreateSubmissionRequest, GradeReportParams, GradeSubmissionRequest, SubmissionListParams,
};
use crate::models::users::entities::UserRole;
use crate::services::access::{ensure_subject_teacher, load_subject};
use crate::services::assignments::load_assignment;
use crate::storage::Storage;

use super::storage_service;

storage_service! {
    /// Student work on assignments and its grading.
    SubmissionService
}

impl SubmissionService {
    pub async fn create_submission(
        &self,
        request: &HttpRequest,
        submission: CreateSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_submission(self, request, submission).await
    }

    pub async fn list_submissions(
        &self,
        request: &HttpRequest,
        query: SubmissionListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_submissions(self, request, query).await
    }

    pub async fn get_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::get_submission(self, request, submission_id).await
    }

    pub async fn delete_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        create::delete_submission(self, request, submission_id).await
    }

    pub async fn grade_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
        grade: GradeSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        grade::grade_submission(self, request, submission_id, grade).await
    }

    pub async fn grade_report(
        &self,
        request: &HttpRequest,
        query: GradeReportParams,
    ) -> ActixResult<HttpResponse> {
        report::grade_report(self, request, query).await
    }
}

fn submission_not_found() -> ApiError {
    ApiError::not_found(ErrorCode::SubmissionNotFound, "Submission not found")
}

/// Loads a submission the caller may see: students their own, teachers those
/// of subjects they teach, admins all.
pub(crate) async fn load_visible_submission(
    storage: &Arc<dyn Storage>,
    claims: AuthClaims,
    submission_id: i64,
) -> ActixResult<Submission> {
    let submission = storage
        .get_submission_by_id(submission_id)
        .await?
        .ok_or_else(submission_not_found)?;

    match claims.role {
        UserRole::Admin => {}
        // another student's work is reported as missing
        UserRole::Student if submission.student_id != claims.user_id => {
            return Err(submission_not_found().into());
        }
        UserRole::Student => {}
        UserRole::Teacher => {
            let assignment = load_assignment(storage, submission.assignment_id).await?;
            let subject = load_subject(storage, assignment.subject_id).await?;
            ensure_subject_teacher(claims, &subject)?;
        }
    }
    Ok(submission)
}
