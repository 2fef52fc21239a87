use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::models::{ApiResponse, classes::requests::ClassListParams};

pub async fn list_classes(
    service: &ClassService,
    request: &HttpRequest,
    query: ClassListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let classes = storage.list_classes_with_pagination(query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        classes,
        "Class list retrieved successfully",
    )))
}
