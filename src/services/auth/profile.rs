use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AuthService;
use crate::errors::ApiError;
use crate::models::{
    ApiResponse, ErrorCode, auth::requests::UpdateProfileRequest,
    users::requests::UpdateUserRequest,
};
use crate::services::access::{current_account, current_user};
use crate::utils::password::{hash_password, verify_password};
use crate::utils::validate::validate_password_simple;

pub async fn get_profile(service: &AuthService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_account(&storage, current_user(request)?).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(user, "Profile retrieved successfully")))
}

pub async fn update_profile(
    service: &AuthService,
    request: &HttpRequest,
    update: UpdateProfileRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = current_account(&storage, current_user(request)?).await?;

    let password = match update.new_password {
        Some(new_password) => {
            let current = update.current_password.unwrap_or_default();
            if !verify_password(&current, &user.password_hash) {
                return Err(ApiError::bad_request(
                    ErrorCode::AuthFailed,
                    "Current password is incorrect",
                )
                .into());
            }
            validate_password_simple(&new_password).map_err(|msg| {
                ApiError::bad_request(ErrorCode::PasswordPolicyViolation, msg)
            })?;
            Some(hash_password(&new_password)?)
        }
        None => None,
    };

    let display_name = update
        .display_name
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty());

    let changes = UpdateUserRequest {
        password,
        display_name,
        // an explicit null clears the avatar
        avatar_url: update.avatar_url.map(Option::unwrap_or_default),
        ..Default::default()
    };

    let updated = storage
        .update_user(user.id, changes)
        .await?
        .ok_or_else(|| ApiError::not_found(ErrorCode::UserNotFound, "User not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(updated, "Profile updated successfully")))
}
