use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AttendanceService, check_date_range};
use crate::middlewares::AuthClaims;
use crate::models::{
    ApiResponse,
    attendance::{
        requests::{AttendanceFilter, AttendanceListParams, AttendanceSummaryParams},
        responses::AttendanceSummary,
    },
    users::entities::UserRole,
};
use crate::services::access::current_user;
use crate::storage::Storage;

/// Narrows `filter` to what the caller may see.
async fn scope_filter(
    storage: &std::sync::Arc<dyn Storage>,
    claims: AuthClaims,
    filter: &mut AttendanceFilter,
) -> ActixResult<()> {
    match claims.role {
        UserRole::Admin => {}
        UserRole::Student => filter.student_id = Some(claims.user_id),
        UserRole::Teacher => {
            filter.subject_ids = Some(storage.list_subject_ids_by_teacher(claims.user_id).await?);
        }
    }
    Ok(())
}

pub async fn list_attendances(
    service: &AttendanceService,
    request: &HttpRequest,
    query: AttendanceListParams,
) -> ActixResult<HttpResponse> {
    let claims = current_user(request)?;
    let (date_from, date_to) = check_date_range(query.date_from, query.date_to)?;
    let storage = service.get_storage(request)?;

    let mut filter = AttendanceFilter {
        subject_id: query.subject_id,
        student_id: query.student_id,
        date_from,
        date_to,
        ..Default::default()
    };
    scope_filter(&storage, claims, &mut filter).await?;

    let page = storage
        .list_attendances_with_pagination(filter, query.pagination)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        page,
        "Attendance list retrieved successfully",
    )))
}

pub async fn attendance_summary(
    service: &AttendanceService,
    request: &HttpRequest,
    query: AttendanceSummaryParams,
) -> ActixResult<HttpResponse> {
    let claims = current_user(request)?;
    let storage = service.get_storage(request)?;

    let mut filter = AttendanceFilter {
        subject_id: query.subject_id,
        student_id: query.student_id,
        ..Default::default()
    };
    scope_filter(&storage, claims, &mut filter).await?;

    let summary: AttendanceSummary = storage
        .list_attendances(filter)
        .await?
        .into_iter()
        .map(|a| a.status)
        .collect();
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        summary,
        "Attendance summary retrieved successfully",
    )))
}
