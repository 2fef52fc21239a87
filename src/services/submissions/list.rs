use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SubmissionService, load_visible_submission};
use crate::models::{
    ApiResponse,
    submissions::requests::{SubmissionListParams, SubmissionListQuery},
    users::entities::UserRole,
};
use crate::services::access::current_user;

pub async fn list_submissions(
    service: &SubmissionService,
    request: &HttpRequest,
    query: SubmissionListParams,
) -> ActixResult<HttpResponse> {
    let claims = current_user(request)?;
    let storage = service.get_storage(request)?;
    let (page, size) = query.pagination.normalized();

    let mut list_query = SubmissionListQuery {
        page,
        size,
        assignment_id: query.assignment_id,
        student_id: query.student_id,
        status: query.status,
        assignment_ids: None,
    };

    match claims.role {
        UserRole::Admin => {}
        UserRole::Student => list_query.student_id = Some(claims.user_id),
        UserRole::Teacher => {
            let subject_ids = storage.list_subject_ids_by_teacher(claims.user_id).await?;
            let assignments = storage.list_assignments_by_subjects(&subject_ids).await?;
            list_query.assignment_ids = Some(assignments.into_iter().map(|a| a.id).collect());
        }
    }

    let submissions = storage.list_submissions_with_pagination(list_query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        submissions,
        "Submission list retrieved successfully",
    )))
}

pub async fn get_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
) -> ActixResult<HttpResponse> {
    let claims = current_user(request)?;
    let storage = service.get_storage(request)?;
    let submission = load_visible_submission(&storage, claims, submission_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        submission,
        "Submission retrieved successfully",
    )))
}
