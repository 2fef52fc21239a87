use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::errors::ApiError;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::current_user;

pub async fn delete_user(
    service: &UserService,
    request: &HttpRequest,
    user_id: i64,
) -> ActixResult<HttpResponse> {
    if current_user(request)?.user_id == user_id {
        return Err(ApiError::bad_request(
            ErrorCode::CanNotDeleteCurrentUser,
            "Cannot delete current user",
        )
        .into());
    }

    let storage = service.get_storage(request)?;
    if storage.delete_user(user_id).await? {
        Ok(HttpResponse::Ok().json(ApiResponse::success_empty("User deleted successfully")))
    } else {
        Err(ApiError::not_found(ErrorCode::UserNotFound, "User not found").into())
    }
}
