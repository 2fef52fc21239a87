use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::models::ApiResponse;
use crate::services::access::{current_user, ensure_subject_visible, load_subject};

pub async fn get_subject(
    service: &SubjectService,
    request: &HttpRequest,
    subject_id: i64,
) -> ActixResult<HttpResponse> {
    let claims = current_user(request)?;
    let storage = service.get_storage(request)?;

    let subject = load_subject(&storage, subject_id).await?;
    ensure_subject_visible(&storage, claims, &subject).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        subject,
        "Subject retrieved successfully",
    )))
}
