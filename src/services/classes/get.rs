use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::errors::ApiError;
use crate::models::{ApiResponse, ErrorCode, homeroom::HomeroomStudentsResponse};

pub async fn get_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let class = storage
        .get_class_by_id(class_id)
        .await?
        .ok_or_else(|| ApiError::not_found(ErrorCode::ClassNotFound, "Class not found"))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(class, "Class retrieved successfully")))
}

pub async fn list_class_students(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let class = storage
        .get_class_by_id(class_id)
        .await?
        .ok_or_else(|| ApiError::not_found(ErrorCode::ClassNotFound, "Class not found"))?;
    let students = storage.list_students_by_class(class_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        HomeroomStudentsResponse { class, students },
        "Class students retrieved successfully",
    )))
}
