use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireJWT, RequireRole};
use crate::models::homeroom::HomeroomParams;
use crate::models::users::entities::UserRole;
use crate::services::HomeroomService;

static HOMEROOM_SERVICE: Lazy<HomeroomService> = Lazy::new(HomeroomService::new_lazy);

pub async fn get_class(
    req: HttpRequest,
    query: web::Query<HomeroomParams>,
) -> ActixResult<HttpResponse> {
    HOMEROOM_SERVICE.get_class(&req, query.into_inner()).await
}

pub async fn list_students(
    req: HttpRequest,
    query: web::Query<HomeroomParams>,
) -> ActixResult<HttpResponse> {
    HOMEROOM_SERVICE.list_students(&req, query.into_inner()).await
}

pub async fn attendance_report(
    req: HttpRequest,
    query: web::Query<HomeroomParams>,
) -> ActixResult<HttpResponse> {
    HOMEROOM_SERVICE
        .attendance_report(&req, query.into_inner())
        .await
}

pub async fn grade_report(
    req: HttpRequest,
    query: web::Query<HomeroomParams>,
) -> ActixResult<HttpResponse> {
    HOMEROOM_SERVICE.grade_report(&req, query.into_inner()).await
}

pub fn configure_homeroom_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/homeroom")
            .wrap(RequireRole::new_any(UserRole::staff_roles()))
            .wrap(RequireJWT::new())
            .route("/class", web::get().to(get_class))
            .route("/students", web::get().to(list_students))
            .route("/attendance", web::get().to(attendance_report))
            .route("/grades", web::get().to(grade_report)),
    );
}
