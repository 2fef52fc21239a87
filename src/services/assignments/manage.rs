use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::{AssignmentService, load_assignment};
use crate::errors::ApiError;
use crate::models::{
    ApiResponse, ErrorCode,
    assignments::requests::{CreateAssignmentRequest, UpdateAssignmentRequest},
};
use crate::services::access::{
    current_user, ensure_attachment, ensure_subject_teacher, load_subject,
};
use crate::storage::Storage;

fn check_max_score(max_score: Option<f64>) -> Result<(), ApiError> {
    match max_score {
        Some(score) if !score.is_finite() || score <= 0.0 => Err(ApiError::bad_request(
            ErrorCode::BadRequest,
            "max_score must be a positive number",
        )),
        _ => Ok(()),
    }
}

/// An assignment's topic must belong to the same subject.
async fn check_topic(
    storage: &Arc<dyn Storage>,
    subject_id: i64,
    topic_id: Option<i64>,
) -> ActixResult<()> {
    let Some(topic_id) = topic_id else {
        return Ok(());
    };
    match storage.get_topic_by_id(topic_id).await? {
        Some(topic) if topic.subject_id == subject_id => Ok(()),
        Some(_) => Err(ApiError::bad_request(
            ErrorCode::BadRequest,
            "Topic belongs to another subject",
        )
        .into()),
        None => Err(ApiError::not_found(ErrorCode::TopicNotFound, "Topic not found").into()),
    }
}

pub async fn create_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    mut assignment: CreateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let claims = current_user(request)?;
    assignment.title = assignment.title.trim().to_string();
    if assignment.title.is_empty() {
        return Err(
            ApiError::bad_request(ErrorCode::BadRequest, "Assignment title is required").into(),
        );
    }
    check_max_score(assignment.max_score)?;

    let storage = service.get_storage(request)?;
    let subject = load_subject(&storage, assignment.subject_id).await?;
    ensure_subject_teacher(claims, &subject)?;
    check_topic(&storage, subject.id, assignment.topic_id).await?;
    ensure_attachment(&storage, assignment.attachment.as_deref()).await?;

    let created = storage.create_assignment(assignment, claims.user_id).await?;
    tracing::info!(
        "Assignment {} created in subject {} by user {}",
        created.id,
        created.subject_id,
        claims.user_id
    );
    Ok(HttpResponse::Created().json(ApiResponse::success(
        created,
        "Assignment created successfully",
    )))
}

pub async fn update_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
    update: UpdateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let claims = current_user(request)?;
    check_max_score(update.max_score)?;

    let storage = service.get_storage(request)?;
    let assignment = load_assignment(&storage, assignment_id).await?;
    let subject = load_subject(&storage, assignment.subject_id).await?;
    ensure_subject_teacher(claims, &subject)?;
    if let Some(topic_id) = update.topic_id {
        check_topic(&storage, subject.id, topic_id).await?;
    }
    if let Some(attachment) = &update.attachment {
        ensure_attachment(&storage, attachment.as_deref()).await?;
    }

    let updated = storage
        .update_assignment(assignment_id, update)
        .await?
        .ok_or_else(|| {
            ApiError::not_found(ErrorCode::AssignmentNotFound, "Assignment not found")
        })?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        updated,
        "Assignment updated successfully",
    )))
}

pub async fn delete_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let claims = current_user(request)?;
    let storage = service.get_storage(request)?;

    let assignment = load_assignment(&storage, assignment_id).await?;
    let subject = load_subject(&storage, assignment.subject_id).await?;
    ensure_subject_teacher(claims, &subject)?;

    storage.delete_assignment(assignment_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Assignment deleted successfully")))
}
