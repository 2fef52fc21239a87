use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AdminService;
use crate::models::{
    ApiResponse,
    submissions::entities::SubmissionStatus,
    system::responses::DashboardStats,
    users::entities::UserRole,
};

pub async fn dashboard(service: &AdminService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let pending = storage
        .count_submissions_by_status(SubmissionStatus::Submitted)
        .await?
        + storage
            .count_submissions_by_status(SubmissionStatus::Late)
            .await?;

    let stats = DashboardStats {
        admins: storage.count_users_by_role(UserRole::Admin).await? as i64,
        teachers: storage.count_users_by_role(UserRole::Teacher).await? as i64,
        students: storage.count_users_by_role(UserRole::Student).await? as i64,
        classes: storage.count_classes().await? as i64,
        subjects: storage.count_subjects().await? as i64,
        assignments: storage.count_assignments().await? as i64,
        submissions_pending: pending as i64,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(stats, "Dashboard retrieved successfully")))
}
