use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ClassService, class_conflict, ensure_homeroom_teacher};
use crate::errors::ApiError;
use crate::models::{ApiResponse, ErrorCode, classes::requests::CreateClassRequest};

pub async fn create_class(
    service: &ClassService,
    request: &HttpRequest,
    mut class_data: CreateClassRequest,
) -> ActixResult<HttpResponse> {
    class_data.name = class_data.name.trim().to_string();
    if class_data.name.is_empty() {
        return Err(ApiError::bad_request(ErrorCode::BadRequest, "Class name is required").into());
    }
    if !(1..=12).contains(&class_data.grade_level) {
        return Err(
            ApiError::bad_request(ErrorCode::BadRequest, "Grade level must be between 1 and 12")
                .into(),
        );
    }

    let storage = service.get_storage(request)?;
    if let Some(teacher_id) = class_data.homeroom_teacher_id {
        ensure_homeroom_teacher(&storage, teacher_id).await?;
    }

    match storage.create_class(class_data).await {
        Ok(class) => {
            Ok(HttpResponse::Created().json(ApiResponse::success(class, "Class created successfully")))
        }
        Err(e) if e.is_unique_violation() => Err(class_conflict().into()),
        Err(e) => Err(e.into()),
    }
}
