pub mod login;
pub mod profile;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::auth::requests::{LoginRequest, UpdateProfileRequest};

use super::storage_service;

storage_service! {
    /// Login and the caller's own profile.
    AuthService
}

impl AuthService {
    pub async fn login(
        &self,
        request: &HttpRequest,
        login_request: LoginRequest,
    ) -> ActixResult<HttpResponse> {
        login::handle_login(self, request, login_request).await
    }

    pub async fn get_profile(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        profile::get_profile(self, request).await
    }

    pub async fn update_profile(
        &self,
        request: &HttpRequest,
        update: UpdateProfileRequest,
    ) -> ActixResult<HttpResponse> {
        profile::update_profile(self, request, update).await
    }
}
