use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashSet;
use std::sync::Arc;

use super::AttendanceService;
use crate::errors::ApiError;
use crate::middlewares::AuthClaims;
use crate::models::{
    ApiResponse, ErrorCode,
    attendance::{
        entities::Attendance,
        requests::{RecordAttendanceRequest, UpdateAttendanceRequest},
    },
};
use crate::services::access::{current_user, ensure_subject_teacher, load_subject};
use crate::storage::Storage;
use crate::utils::validate::parse_date;

pub async fn record_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    batch: RecordAttendanceRequest,
) -> ActixResult<HttpResponse> {
    let claims = current_user(request)?;

    let date = parse_date(batch.date.trim())
        .map_err(|msg| ApiError::bad_request(ErrorCode::AttendanceInvalidDate, msg))?
        .format("%Y-%m-%d")
        .to_string();
    if batch.entries.is_empty() {
        return Err(ApiError::bad_request(ErrorCode::BadRequest, "No attendance entries given").into());
    }

    let storage = service.get_storage(request)?;
    let subject = load_subject(&storage, batch.subject_id).await?;
    ensure_subject_teacher(claims, &subject)?;

    let enrolled: HashSet<i64> = storage
        .list_students_by_class(subject.class_id)
        .await?
        .into_iter()
        .map(|s| s.id)
        .collect();
    if let Some(entry) = batch.entries.iter().find(|e| !enrolled.contains(&e.student_id)) {
        return Err(ApiError::bad_request(
            ErrorCode::BadRequest,
            format!("Student {} is not enrolled in this subject's class", entry.student_id),
        )
        .into());
    }

    let rows = storage
        .record_attendances(subject.id, &date, batch.entries, claims.user_id)
        .await?;

    tracing::info!(
        "Recorded {} attendance rows for subject {} on {}",
        rows.len(),
        subject.id,
        date
    );
    Ok(HttpResponse::Ok().json(ApiResponse::success(rows, "Attendance recorded successfully")))
}

async fn load_for_write(
    storage: &Arc<dyn Storage>,
    claims: AuthClaims,
    attendance_id: i64,
) -> ActixResult<Attendance> {
    let attendance = storage
        .get_attendance_by_id(attendance_id)
        .await?
        .ok_or_else(|| ApiError::not_found(ErrorCode::AttendanceNotFound, "Attendance not found"))?;
    let subject = load_subject(storage, attendance.subject_id).await?;
    ensure_subject_teacher(claims, &subject)?;
    Ok(attendance)
}

pub async fn update_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    attendance_id: i64,
    update: UpdateAttendanceRequest,
) -> ActixResult<HttpResponse> {
    let claims = current_user(request)?;
    let storage = service.get_storage(request)?;
    load_for_write(&storage, claims, attendance_id).await?;

    let updated = storage
        .update_attendance(attendance_id, update)
        .await?
        .ok_or_else(|| ApiError::not_found(ErrorCode::AttendanceNotFound, "Attendance not found"))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        updated,
        "Attendance updated successfully",
    )))
}

pub async fn delete_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    attendance_id: i64,
) -> ActixResult<HttpResponse> {
    let claims = current_user(request)?;
    let storage = service.get_storage(request)?;
    load_for_write(&storage, claims, attendance_id).await?;

    storage.delete_attendance(attendance_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Attendance deleted successfully")))
}
