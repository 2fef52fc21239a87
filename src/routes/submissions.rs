use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireJWT, RequireRole};
use crate::models::submissions::requests::{
    CreateSubmissionRequest, GradeReportParams, GradeSubmissionRequest, SubmissionListParams,
};
use crate::models::users::entities::UserRole;
use crate::services::SubmissionService;
use crate::utils::SafeIDI64;

static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

pub async fn create_submission(
    req: HttpRequest,
    submission: web::Json<CreateSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .create_submission(&req, submission.into_inner())
        .await
}

pub async fn list_submissions(
    req: HttpRequest,
    query: web::Query<SubmissionListParams>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .list_submissions(&req, query.into_inner())
        .await
}

pub async fn get_submission(
    req: HttpRequest,
    submission_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.get_submission(&req, submission_id.0).await
}

pub async fn delete_submission(
    req: HttpRequest,
    submission_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .delete_submission(&req, submission_id.0)
        .await
}

pub async fn grade_submission(
    req: HttpRequest,
    submission_id: SafeIDI64,
    grade: web::Json<GradeSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .grade_submission(&req, submission_id.0, grade.into_inner())
        .await
}

pub async fn grade_report(
    req: HttpRequest,
    query: web::Query<GradeReportParams>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.grade_report(&req, query.into_inner()).await
}

pub fn configure_submissions_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/submissions")
            .wrap(RequireJWT::new())
            .service(
                web::resource("")
                    .route(web::get().to(list_submissions))
                    .route(
                        web::post()
                            .to(create_submission)
                            .wrap(RequireRole::new(UserRole::Student)),
                    ),
            )
            .service(
                web::resource("/{id}/grade").route(
                    web::put()
                        .to(grade_submission)
                        .wrap(RequireRole::new_any(UserRole::staff_roles())),
                ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_submission))
                    .route(
                        web::delete()
                            .to(delete_submission)
                            .wrap(RequireRole::new(UserRole::Student)),
                    ),
            ),
    );
}

pub fn configure_grades_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/grades")
            .wrap(RequireRole::new_any(UserRole::staff_roles()))
            .wrap(RequireJWT::new())
            .route("/report", web::get().to(grade_report)),
    );
}
