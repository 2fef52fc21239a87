use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::SubjectService;
use crate::errors::ApiError;
use crate::models::{
    ApiResponse, ErrorCode,
    subjects::requests::{CreateSubjectRequest, UpdateSubjectRequest},
    users::entities::UserRole,
};
use crate::storage::Storage;

async fn ensure_teacher(storage: &Arc<dyn Storage>, teacher_id: i64) -> ActixResult<()> {
    match storage.get_user_by_id(teacher_id).await? {
        Some(user) if user.role == UserRole::Teacher => Ok(()),
        Some(_) => Err(ApiError::bad_request(
            ErrorCode::BadRequest,
            "Subject teacher must have the teacher role",
        )
        .into()),
        None => Err(ApiError::not_found(ErrorCode::UserNotFound, "Teacher not found").into()),
    }
}

pub async fn create_subject(
    service: &SubjectService,
    request: &HttpRequest,
    mut subject: CreateSubjectRequest,
) -> ActixResult<HttpResponse> {
    subject.name = subject.name.trim().to_string();
    subject.code = subject.code.trim().to_string();
    if subject.name.is_empty() || subject.code.is_empty() {
        return Err(
            ApiError::bad_request(ErrorCode::BadRequest, "Subject name and code are required")
                .into(),
        );
    }

    let storage = service.get_storage(request)?;
    if storage.get_class_by_id(subject.class_id).await?.is_none() {
        return Err(ApiError::not_found(ErrorCode::ClassNotFound, "Class not found").into());
    }
    ensure_teacher(&storage, subject.teacher_id).await?;

    let created = storage.create_subject(subject).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(
        created,
        "Subject created successfully",
    )))
}

pub async fn update_subject(
    service: &SubjectService,
    request: &HttpRequest,
    subject_id: i64,
    update: UpdateSubjectRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    if let Some(teacher_id) = update.teacher_id {
        ensure_teacher(&storage, teacher_id).await?;
    }

    let subject = storage
        .update_subject(subject_id, update)
        .await?
        .ok_or_else(|| ApiError::not_found(ErrorCode::SubjectNotFound, "Subject not found"))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        subject,
        "Subject updated successfully",
    )))
}

pub async fn delete_subject(
    service: &SubjectService,
    request: &HttpRequest,
    subject_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    if !storage.delete_subject(subject_id).await? {
        return Err(ApiError::not_found(ErrorCode::SubjectNotFound, "Subject not found").into());
    }
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Subject deleted successfully")))
}
