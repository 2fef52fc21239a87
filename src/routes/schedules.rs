use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireJWT, RequireRole};
use crate::models::schedules::requests::{
    CreateScheduleRequest, ScheduleListParams, UpdateScheduleRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::ScheduleService;
use crate::utils::SafeIDI64;

static SCHEDULE_SERVICE: Lazy<ScheduleService> = Lazy::new(ScheduleService::new_lazy);

pub async fn list_schedules(
    req: HttpRequest,
    query: web::Query<ScheduleListParams>,
) -> ActixResult<HttpResponse> {
    SCHEDULE_SERVICE.list_schedules(&req, query.into_inner()).await
}

pub async fn my_schedule(req: HttpRequest) -> ActixResult<HttpResponse> {
    SCHEDULE_SERVICE.my_schedule(&req).await
}

pub async fn create_schedule(
    req: HttpRequest,
    schedule: web::Json<CreateScheduleRequest>,
) -> ActixResult<HttpResponse> {
    SCHEDULE_SERVICE
        .create_schedule(&req, schedule.into_inner())
        .await
}

pub async fn update_schedule(
    req: HttpRequest,
    schedule_id: SafeIDI64,
    update: web::Json<UpdateScheduleRequest>,
) -> ActixResult<HttpResponse> {
    SCHEDULE_SERVICE
        .update_schedule(&req, schedule_id.0, update.into_inner())
        .await
}

pub async fn delete_schedule(
    req: HttpRequest,
    schedule_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    SCHEDULE_SERVICE.delete_schedule(&req, schedule_id.0).await
}

pub fn configure_schedules_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/schedules")
            .wrap(RequireJWT::new())
            .service(
                web::resource("")
                    .route(web::get().to(list_schedules))
                    .route(
                        web::post()
                            .to(create_schedule)
                            .wrap(RequireRole::new_any(UserRole::admin_roles())),
                    ),
            )
            .service(web::resource("/me").route(web::get().to(my_schedule)))
            .service(
                web::resource("/{id}")
                    .wrap(RequireRole::new_any(UserRole::admin_roles()))
                    .route(web::put().to(update_schedule))
                    .route(web::delete().to(delete_schedule)),
            ),
    );
}
