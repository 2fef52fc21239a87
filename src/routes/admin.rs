use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireJWT, RequireRole};
use crate::models::system::requests::{SettingAuditParams, UpdateSettingRequest};
use crate::models::users::entities::UserRole;
use crate::services::AdminService;
use crate::utils::SafeSettingKey;

static ADMIN_SERVICE: Lazy<AdminService> = Lazy::new(AdminService::new_lazy);

pub async fn list_settings(req: HttpRequest) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.list_settings(&req).await
}

pub async fn update_setting(
    req: HttpRequest,
    key: SafeSettingKey,
    update: web::Json<UpdateSettingRequest>,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE
        .update_setting(&req, key.0, update.into_inner())
        .await
}

pub async fn list_setting_audits(
    req: HttpRequest,
    query: web::Query<SettingAuditParams>,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE
        .list_setting_audits(&req, query.into_inner())
        .await
}

pub async fn dashboard(req: HttpRequest) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.dashboard(&req).await
}

pub fn configure_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/admin")
            .wrap(RequireRole::new_any(UserRole::admin_roles()))
            .wrap(RequireJWT::new())
            .route("/settings", web::get().to(list_settings))
            .route("/settings/audits", web::get().to(list_setting_audits))
            .route("/settings/{key}", web::put().to(update_setting))
            .route("/dashboard", web::get().to(dashboard)),
    );
}
