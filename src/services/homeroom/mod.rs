//! Read-only views for a class's homeroom teacher.

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::ApiError;
use crate::middlewares::AuthClaims;
use crate::models::{
    ApiResponse, ErrorCode,
    attendance::{requests::AttendanceFilter, responses::AttendanceSummary},
    classes::entities::Class,
    homeroom::{
        HomeroomAttendanceResponse, HomeroomParams, HomeroomStudentsResponse,
        StudentAttendanceRow,
    },
    submissions::responses::GradeReportResponse,
    users::entities::UserRole,
};
use crate::services::access::current_user;
use crate::services::attendance::check_date_range;
use crate::services::submissions::report::summarize_grades;
use crate::storage::Storage;

use super::storage_service;

storage_service! {
    HomeroomService
}

/// Teachers get the class they lead; admins name one with `class_id`.
async fn resolve_class(
    storage: &Arc<dyn Storage>,
    claims: AuthClaims,
    class_id: Option<i64>,
) -> ActixResult<Class> {
    match claims.role {
        UserRole::Admin => {
            let class_id = class_id.ok_or_else(|| {
                ApiError::bad_request(ErrorCode::BadRequest, "class_id is required for admins")
            })?;
            Ok(storage
                .get_class_by_id(class_id)
                .await?
                .ok_or_else(|| ApiError::not_found(ErrorCode::ClassNotFound, "Class not found"))?)
        }
        UserRole::Teacher => Ok(storage
            .get_class_by_homeroom_teacher(claims.user_id)
            .await?
            .ok_or_else(|| {
                ApiError::forbidden(
                    ErrorCode::NotHomeroomTeacher,
                    "You are not the homeroom teacher of any class",
                )
            })?),
        UserRole::Student => Err(ApiError::forbidden(
            ErrorCode::Forbidden,
            "Homeroom views are for teachers",
        )
        .into()),
    }
}

impl HomeroomService {
    pub async fn get_class(
        &self,
        request: &HttpRequest,
        query: HomeroomParams,
    ) -> ActixResult<HttpResponse> {
        let claims = current_user(request)?;
        let storage = self.get_storage(request)?;
        let class = resolve_class(&storage, claims, query.class_id).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            class,
            "Homeroom class retrieved successfully",
        )))
    }

    pub async fn list_students(
        &self,
        request: &HttpRequest,
        query: HomeroomParams,
    ) -> ActixResult<HttpResponse> {
        let claims = current_user(request)?;
        let storage = self.get_storage(request)?;
        let class = resolve_class(&storage, claims, query.class_id).await?;
        let students = storage.list_students_by_class(class.id).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            HomeroomStudentsResponse { class, students },
            "Homeroom students retrieved successfully",
        )))
    }

    pub async fn attendance_report(
        &self,
        request: &HttpRequest,
        query: HomeroomParams,
    ) -> ActixResult<HttpResponse> {
        let claims = current_user(request)?;
        let (date_from, date_to) = check_date_range(query.date_from, query.date_to)?;
        let storage = self.get_storage(request)?;
        let class = resolve_class(&storage, claims, query.class_id).await?;

        let students = storage.list_students_by_class(class.id).await?;
        let student_ids: Vec<i64> = students.iter().map(|s| s.id).collect();
        let subject_ids: Vec<i64> = storage
            .list_subjects_by_class(class.id)
            .await?
            .into_iter()
            .map(|s| s.id)
            .collect();

        let mut summaries: HashMap<i64, AttendanceSummary> = HashMap::new();
        if !student_ids.is_empty() && !subject_ids.is_empty() {
            let rows = storage
                .list_attendances(AttendanceFilter {
                    subject_ids: Some(subject_ids),
                    student_ids: Some(student_ids),
                    date_from: date_from.clone(),
                    date_to: date_to.clone(),
                    ..Default::default()
                })
                .await?;
            for row in rows {
                summaries.entry(row.student_id).or_default().add(row.status);
            }
        }

        let students = students
            .into_iter()
            .map(|s| StudentAttendanceRow {
                summary: summaries.remove(&s.id).unwrap_or_default(),
                student_id: s.id,
                username: s.username,
                display_name: s.display_name,
            })
            .collect();

        Ok(HttpResponse::Ok().json(ApiResponse::success(
            HomeroomAttendanceResponse {
                class_id: class.id,
                date_from,
                date_to,
                students,
            },
            "Homeroom attendance retrieved successfully",
        )))
    }

    pub async fn grade_report(
        &self,
        request: &HttpRequest,
        query: HomeroomParams,
    ) -> ActixResult<HttpResponse> {
        let claims = current_user(request)?;
        let storage = self.get_storage(request)?;
        let class = resolve_class(&storage, claims, query.class_id).await?;

        let students = storage.list_students_by_class(class.id).await?;
        let subject_ids: Vec<i64> = storage
            .list_subjects_by_class(class.id)
            .await?
            .into_iter()
            .map(|s| s.id)
            .collect();
        let assignments = storage.list_assignments_by_subjects(&subject_ids).await?;
        let assignment_ids: Vec<i64> = assignments.iter().map(|a| a.id).collect();
        let submissions = storage
            .list_graded_submissions_by_assignments(&assignment_ids)
            .await?;

        Ok(HttpResponse::Ok().json(ApiResponse::success(
            GradeReportResponse {
                subject_id: None,
                class_id: class.id,
                assignment_count: assignments.len() as i64,
                students: summarize_grades(&students, &assignments, &submissions),
            },
            "Homeroom grades retrieved successfully",
        )))
    }
}
