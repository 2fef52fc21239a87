use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{UserService, ensure_class_exists};
use crate::errors::ApiError;
use crate::models::{
    ApiResponse, ErrorCode,
    users::{entities::UserRole, requests::CreateUserRequest},
};
use crate::utils::password::hash_password;
use crate::utils::validate::{
    validate_email, validate_identity_number, validate_password_simple, validate_username,
};

pub async fn create_user(
    service: &UserService,
    request: &HttpRequest,
    mut user_data: CreateUserRequest,
) -> ActixResult<HttpResponse> {
    validate_username(&user_data.username)
        .map_err(|msg| ApiError::bad_request(ErrorCode::UserNameInvalid, msg))?;
    validate_email(&user_data.email)
        .map_err(|msg| ApiError::bad_request(ErrorCode::UserEmailInvalid, msg))?;
    if let Some(number) = &user_data.identity_number {
        validate_identity_number(number)
            .map_err(|msg| ApiError::bad_request(ErrorCode::UserIdentityNumberInvalid, msg))?;
    }
    validate_password_simple(&user_data.password)
        .map_err(|msg| ApiError::bad_request(ErrorCode::PasswordPolicyViolation, msg))?;

    if user_data.role != UserRole::Student {
        user_data.class_id = None;
    }

    let storage = service.get_storage(request)?;
    ensure_class_exists(&storage, user_data.class_id).await?;

    user_data.password = hash_password(&user_data.password)?;

    match storage.create_user(user_data).await {
        Ok(user) => {
            info!("Created {} account {}", user.role, user.username);
            Ok(HttpResponse::Created().json(ApiResponse::success(user, "User created successfully")))
        }
        Err(e) if e.is_unique_violation() => Err(ApiError::conflict(
            ErrorCode::UserAlreadyExists,
            "Username or email already exists",
        )
        .into()),
        Err(e) => Err(e.into()),
    }
}
