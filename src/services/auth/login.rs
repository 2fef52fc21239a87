use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::StatusCode};

use super::AuthService;
use crate::errors::{ApiError, SpadaError};
use crate::models::{
    ApiResponse, ErrorCode,
    auth::{requests::LoginRequest, responses::LoginResponse},
};
use crate::services::DynamicConfig;
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;

pub async fn handle_login(
    service: &AuthService,
    request: &HttpRequest,
    login_request: LoginRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let identifier = login_request.username.trim();

    let user = storage
        .get_user_by_username_or_email(identifier)
        .await?
        .filter(|user| verify_password(&login_request.password, &user.password_hash));

    let Some(mut user) = user else {
        tracing::info!("Failed login attempt for '{}'", identifier);
        return Err(ApiError::new(
            StatusCode::UNAUTHORIZED,
            ErrorCode::AuthFailed,
            "Username or password is incorrect",
        )
        .into());
    };

    if !user.is_active() {
        return Err(ApiError::new(
            StatusCode::UNAUTHORIZED,
            ErrorCode::AccountInactive,
            format!("Account is {}", user.status),
        )
        .into());
    }

    let expiry_minutes = DynamicConfig::access_token_expiry().await;
    let access_token =
        JwtUtils::generate_access_token(user.id, user.role.as_str(), expiry_minutes)
            .map_err(|e| SpadaError::authentication(format!("Failed to sign token: {e}")))?;

    match storage.update_last_login(user.id).await {
        Ok(_) => user.last_login = Some(chrono::Utc::now()),
        Err(e) => tracing::warn!("Failed to record last login for user {}: {}", user.id, e),
    }

    tracing::info!("User {} logged in", user.username);

    let response = LoginResponse {
        access_token,
        expires_in: expiry_minutes * 60,
        user,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Login successful")))
}
