use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{UserService, ensure_class_exists};
use crate::errors::ApiError;
use crate::models::{ApiResponse, ErrorCode, users::requests::UpdateUserRequest};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_identity_number, validate_password_simple};

pub async fn update_user(
    service: &UserService,
    request: &HttpRequest,
    user_id: i64,
    mut update_data: UpdateUserRequest,
) -> ActixResult<HttpResponse> {
    if let Some(email) = &update_data.email {
        validate_email(email).map_err(|msg| ApiError::bad_request(ErrorCode::UserEmailInvalid, msg))?;
    }
    if let Some(number) = &update_data.identity_number {
        validate_identity_number(number)
            .map_err(|msg| ApiError::bad_request(ErrorCode::UserIdentityNumberInvalid, msg))?;
    }
    if let Some(password) = &update_data.password {
        validate_password_simple(password)
            .map_err(|msg| ApiError::bad_request(ErrorCode::PasswordPolicyViolation, msg))?;
        update_data.password = Some(hash_password(password)?);
    }

    let storage = service.get_storage(request)?;
    if let Some(class_id) = update_data.class_id {
        ensure_class_exists(&storage, class_id).await?;
    }

    match storage.update_user(user_id, update_data).await {
        Ok(Some(user)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(user, "User updated successfully")))
        }
        Ok(None) => Err(ApiError::not_found(ErrorCode::UserNotFound, "User not found").into()),
        Err(e) if e.is_unique_violation() => {
            Err(ApiError::conflict(ErrorCode::UserAlreadyExists, "Email already exists").into())
        }
        Err(e) => Err(e.into()),
    }
}
