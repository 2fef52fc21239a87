use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AdminService;
use crate::errors::ApiError;
use crate::middlewares::rate_limit::remote_ip;
use crate::models::{
    ApiResponse, ErrorCode,
    system::{
        entities::{KnownSettingKey, SystemSetting},
        requests::{SettingAuditParams, UpdateSettingRequest},
        responses::AdminSettingsListResponse,
    },
};
use crate::services::access::current_user;
use crate::services::system::DynamicConfig;

/// Type check plus the range rules of settings the application reads.
pub(crate) fn validate_setting_value(setting: &SystemSetting, value: &str) -> Result<(), String> {
    setting.value_type.validate(value)?;

    let Ok(known) = setting.key.parse::<KnownSettingKey>() else {
        return Ok(());
    };
    let number = || value.trim().parse::<i64>().unwrap_or_default();
    match known {
        KnownSettingKey::Semester if !(1..=2).contains(&number()) => {
            Err("semester must be 1 or 2".to_string())
        }
        KnownSettingKey::AccessTokenExpiry | KnownSettingKey::UploadMaxSize if number() <= 0 => {
            Err(format!("{} must be positive", setting.key))
        }
        KnownSettingKey::SchoolName | KnownSettingKey::AcademicYear if value.trim().is_empty() => {
            Err(format!("{} must not be empty", setting.key))
        }
        _ => Ok(()),
    }
}

pub async fn list_settings(service: &AdminService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let settings = storage.list_all_settings().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        AdminSettingsListResponse { settings },
        "Settings retrieved successfully",
    )))
}

pub async fn update_setting(
    service: &AdminService,
    request: &HttpRequest,
    key: String,
    update: UpdateSettingRequest,
) -> ActixResult<HttpResponse> {
    let claims = current_user(request)?;
    let storage = service.get_storage(request)?;

    let setting = storage.get_setting_by_key(&key).await?.ok_or_else(|| {
        ApiError::not_found(ErrorCode::SettingNotFound, format!("Setting '{key}' not found"))
    })?;
    validate_setting_value(&setting, &update.value)
        .map_err(|msg| ApiError::bad_request(ErrorCode::SettingValueInvalid, msg))?;

    let ip_address = remote_ip(&request.connection_info());
    let updated = storage
        .update_setting(&key, &update.value, claims.user_id, ip_address)
        .await?;
    DynamicConfig::update(&updated.key, &updated.value).await;

    tracing::info!("Setting '{}' changed by user {}", updated.key, claims.user_id);
    Ok(HttpResponse::Ok().json(ApiResponse::success(updated, "Setting updated successfully")))
}

pub async fn list_setting_audits(
    service: &AdminService,
    request: &HttpRequest,
    query: SettingAuditParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let audits = storage.list_setting_audits(query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        audits,
        "Setting audits retrieved successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::system::entities::SettingValueType;

    fn setting(key: &str, value_type: SettingValueType) -> SystemSetting {
        SystemSetting {
            key: key.to_string(),
            value: String::new(),
            value_type,
            description: None,
            updated_at: chrono::Utc::now(),
            updated_by: None,
        }
    }

    #[test]
    fn test_setting_value_rules() {
        let semester = setting("app.semester", SettingValueType::Integer);
        assert!(validate_setting_value(&semester, "2").is_ok());
        assert!(validate_setting_value(&semester, "3").is_err());
        assert!(validate_setting_value(&semester, "two").is_err());

        let expiry = setting("jwt.access_token_expiry", SettingValueType::Integer);
        assert!(validate_setting_value(&expiry, "1440").is_ok());
        assert!(validate_setting_value(&expiry, "0").is_err());

        let types = setting("upload.allowed_types", SettingValueType::JsonArray);
        assert!(validate_setting_value(&types, r#"[".pdf"]"#).is_ok());
        assert!(validate_setting_value(&types, ".pdf").is_err());

        let custom = setting("school.motto", SettingValueType::String);
        assert!(validate_setting_value(&custom, "").is_ok());
    }
}
