use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::models::{ApiResponse, users::requests::UserListParams};

pub async fn list_users(
    service: &UserService,
    request: &HttpRequest,
    query: UserListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let users = storage.list_users_with_pagination(query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(users, "User list retrieved successfully")))
}
