use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::errors::ApiError;
use crate::models::{ApiResponse, ErrorCode};

pub async fn get_user(
    service: &UserService,
    request: &HttpRequest,
    user_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = storage
        .get_user_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found(ErrorCode::UserNotFound, "User not found"))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(user, "User retrieved successfully")))
}
