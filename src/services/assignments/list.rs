use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssignmentService, load_assignment};
use crate::models::{
    ApiResponse,
    assignments::requests::{AssignmentListParams, AssignmentListQuery},
};
use crate::services::access::{
    current_user, ensure_subject_visible, load_subject, visible_subject_ids,
};

pub async fn list_assignments(
    service: &AssignmentService,
    request: &HttpRequest,
    query: AssignmentListParams,
) -> ActixResult<HttpResponse> {
    let claims = current_user(request)?;
    let storage = service.get_storage(request)?;
    let (page, size) = query.pagination.normalized();

    let list_query = AssignmentListQuery {
        page,
        size,
        subject_id: query.subject_id,
        topic_id: query.topic_id,
        subject_ids: visible_subject_ids(&storage, claims).await?,
    };

    let assignments = storage.list_assignments_with_pagination(list_query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        assignments,
        "Assignment list retrieved successfully",
    )))
}

pub async fn get_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let claims = current_user(request)?;
    let storage = service.get_storage(request)?;

    let assignment = load_assignment(&storage, assignment_id).await?;
    let subject = load_subject(&storage, assignment.subject_id).await?;
    ensure_subject_visible(&storage, claims, &subject).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        assignment,
        "Assignment retrieved successfully",
    )))
}
