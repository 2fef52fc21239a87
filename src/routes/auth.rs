use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RateLimit, RequireJWT};
use crate::models::auth::requests::{LoginRequest, UpdateProfileRequest};
use crate::services::AuthService;

static AUTH_SERVICE: Lazy<AuthService> = Lazy::new(AuthService::new_lazy);

pub async fn login(
    req: HttpRequest,
    login_data: web::Json<LoginRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.login(&req, login_data.into_inner()).await
}

pub async fn get_profile(req: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.get_profile(&req).await
}

pub async fn update_profile(
    req: HttpRequest,
    update: web::Json<UpdateProfileRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.update_profile(&req, update.into_inner()).await
}

pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/auth")
            .service(
                web::resource("/login")
                    .wrap(RateLimit::login())
                    .route(web::post().to(login)),
            )
            .service(
                web::resource("/me")
                    .wrap(RequireJWT::new())
                    .route(web::get().to(get_profile))
                    .route(web::put().to(update_profile)),
            ),
    );
}
