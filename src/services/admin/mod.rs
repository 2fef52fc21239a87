pub mod dashboard;
pub mod settings;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::system::requests::{SettingAuditParams, UpdateSettingRequest};

use super::storage_service;

storage_service! {
    /// Runtime settings and school-wide statistics for administrators.
    AdminService
}

impl AdminService {
    pub async fn list_settings(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        settings::list_settings(self, request).await
    }

    pub async fn update_setting(
        &self,
        request: &HttpRequest,
        key: String,
        update: UpdateSettingRequest,
    ) -> ActixResult<HttpResponse> {
        settings::update_setting(self, request, key, update).await
    }

    pub async fn list_setting_audits(
        &self,
        request: &HttpRequest,
        query: SettingAuditParams,
    ) -> ActixResult<HttpResponse> {
        settings::list_setting_audits(self, request, query).await
    }

    pub async fn dashboard(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        dashboard::dashboard(self, request).await
    }
}
