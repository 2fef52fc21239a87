use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{DynamicConfig, SystemService};
use crate::models::{ApiResponse, system::responses::PublicSettingsResponse};

pub async fn get_public_settings(
    _service: &SystemService,
    _req: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let response = PublicSettingsResponse {
        school_name: DynamicConfig::school_name().await,
        academic_year: DynamicConfig::academic_year().await,
        semester: DynamicConfig::semester().await,
        max_file_size: DynamicConfig::upload_max_size().await as u64,
        allowed_file_types: DynamicConfig::upload_allowed_types().await,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Settings retrieved successfully",
    )))
}
