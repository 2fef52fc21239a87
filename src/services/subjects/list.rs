use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::models::{
    ApiResponse, PaginatedResponse, PaginationInfo,
    subjects::{entities::Subject, requests::SubjectListParams},
    users::entities::UserRole,
};
use crate::services::access::{current_user, student_class_id};

pub async fn list_subjects(
    service: &SubjectService,
    request: &HttpRequest,
    mut query: SubjectListParams,
) -> ActixResult<HttpResponse> {
    let claims = current_user(request)?;
    let storage = service.get_storage(request)?;

    match claims.role {
        UserRole::Admin => {}
        UserRole::Teacher => query.teacher_id = Some(claims.user_id),
        UserRole::Student => match student_class_id(&storage, claims).await? {
            Some(class_id) => query.class_id = Some(class_id),
            None => {
                // not enrolled anywhere yet
                let (page, size) = query.pagination.normalized();
                let empty = PaginatedResponse::<Subject> {
                    items: Vec::new(),
                    pagination: PaginationInfo::new(page, size, 0, 0),
                };
                return Ok(HttpResponse::Ok().json(ApiResponse::success(
                    empty,
                    "Subject list retrieved successfully",
                )));
            }
        },
    }

    let subjects = storage.list_subjects_with_pagination(query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        subjects,
        "Subject list retrieved successfully",
    )))
}
