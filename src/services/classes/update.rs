use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ClassService, class_conflict, ensure_homeroom_teacher};
use crate::errors::ApiError;
use crate::models::{ApiResponse, ErrorCode, classes::requests::UpdateClassRequest};

pub async fn update_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
    update_data: UpdateClassRequest,
) -> ActixResult<HttpResponse> {
    if update_data
        .grade_level
        .is_some_and(|level| !(1..=12).contains(&level))
    {
        return Err(
            ApiError::bad_request(ErrorCode::BadRequest, "Grade level must be between 1 and 12")
                .into(),
        );
    }

    let storage = service.get_storage(request)?;
    if let Some(Some(teacher_id)) = update_data.homeroom_teacher_id {
        ensure_homeroom_teacher(&storage, teacher_id).await?;
    }

    match storage.update_class(class_id, update_data).await {
        Ok(Some(class)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(class, "Class updated successfully")))
        }
        Ok(None) => Err(ApiError::not_found(ErrorCode::ClassNotFound, "Class not found").into()),
        Err(e) if e.is_unique_violation() => Err(class_conflict().into()),
        Err(e) => Err(e.into()),
    }
}
