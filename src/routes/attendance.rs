use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireJWT, RequireRole};
use crate::models::attendance::requests::{
    AttendanceListParams, AttendanceSummaryParams, RecordAttendanceRequest,
    UpdateAttendanceRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::AttendanceService;
use crate::utils::SafeIDI64;

static ATTENDANCE_SERVICE: Lazy<AttendanceService> = Lazy::new(AttendanceService::new_lazy);

pub async fn record_attendance(
    req: HttpRequest,
    batch: web::Json<RecordAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .record_attendance(&req, batch.into_inner())
        .await
}

pub async fn list_attendances(
    req: HttpRequest,
    query: web::Query<AttendanceListParams>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .list_attendances(&req, query.into_inner())
        .await
}

pub async fn attendance_summary(
    req: HttpRequest,
    query: web::Query<AttendanceSummaryParams>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .attendance_summary(&req, query.into_inner())
        .await
}

pub async fn update_attendance(
    req: HttpRequest,
    attendance_id: SafeIDI64,
    update: web::Json<UpdateAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .update_attendance(&req, attendance_id.0, update.into_inner())
        .await
}

pub async fn delete_attendance(
    req: HttpRequest,
    attendance_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .delete_attendance(&req, attendance_id.0)
        .await
}

pub fn configure_attendance_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/attendances")
            .wrap(RequireJWT::new())
            .service(
                web::resource("")
                    // students are narrowed to their own rows
                    .route(web::get().to(list_attendances))
                    .route(
                        web::post()
                            .to(record_attendance)
                            .wrap(RequireRole::new_any(UserRole::staff_roles())),
                    ),
            )
            .service(web::resource("/summary").route(web::get().to(attendance_summary)))
            .service(
                web::resource("/{id}")
                    .wrap(RequireRole::new_any(UserRole::staff_roles()))
                    .route(web::put().to(update_attendance))
                    .route(web::delete().to(delete_attendance)),
            ),
    );
}
