use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireJWT, RequireRole};
use crate::models::announcements::requests::{
    AnnouncementListParams, CreateAnnouncementRequest, UpdateAnnouncementRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::AnnouncementService;
use crate::utils::SafeIDI64;

static ANNOUNCEMENT_SERVICE: Lazy<AnnouncementService> =
    Lazy::new(AnnouncementService::new_lazy);

pub async fn list_announcements(
    req: HttpRequest,
    query: web::Query<AnnouncementListParams>,
) -> ActixResult<HttpResponse> {
    ANNOUNCEMENT_SERVICE
        .list_announcements(&req, query.into_inner())
        .await
}

pub async fn create_announcement(
    req: HttpRequest,
    announcement: web::Json<CreateAnnouncementRequest>,
) -> ActixResult<HttpResponse> {
    ANNOUNCEMENT_SERVICE
        .create_announcement(&req, announcement.into_inner())
        .await
}

pub async fn get_announcement(
    req: HttpRequest,
    announcement_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    ANNOUNCEMENT_SERVICE
        .get_announcement(&req, announcement_id.0)
        .await
}

pub async fn update_announcement(
    req: HttpRequest,
    announcement_id: SafeIDI64,
    update: web::Json<UpdateAnnouncementRequest>,
) -> ActixResult<HttpResponse> {
    ANNOUNCEMENT_SERVICE
        .update_announcement(&req, announcement_id.0, update.into_inner())
        .await
}

pub async fn delete_announcement(
    req: HttpRequest,
    announcement_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    ANNOUNCEMENT_SERVICE
        .delete_announcement(&req, announcement_id.0)
        .await
}

pub fn configure_announcements_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/announcements")
            .wrap(RequireJWT::new())
            .service(
                web::resource("")
                    .route(web::get().to(list_announcements))
                    .route(
                        web::post()
                            .to(create_announcement)
                            .wrap(RequireRole::new_any(UserRole::staff_roles())),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_announcement))
                    // author or admin, checked in the service
                    .route(
                        web::put()
                            .to(update_announcement)
                            .wrap(RequireRole::new_any(UserRole::staff_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_announcement)
                            .wrap(RequireRole::new_any(UserRole::staff_roles())),
                    ),
            ),
    );
}
