use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::errors::ApiError;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    if storage.delete_class(class_id).await? {
        tracing::info!("Deleted class {}", class_id);
        Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Class deleted successfully")))
    } else {
        Err(ApiError::not_found(ErrorCode::ClassNotFound, "Class not found").into())
    }
}
