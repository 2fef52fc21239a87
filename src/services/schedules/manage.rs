use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::{
    ScheduleService, find_conflict, invalid_time, invalidate_class_schedule, schedule_not_found,
};
use crate::errors::ApiError;
use crate::models::{
    ApiResponse, ErrorCode,
    schedules::{
        entities::TimeSlot,
        requests::{CreateScheduleRequest, ScheduleFilter, UpdateScheduleRequest},
    },
};
use crate::services::access::load_subject;
use crate::storage::Storage;

/// The subject must be taught in the class the entry belongs to.
async fn ensure_subject_in_class(
    storage: &Arc<dyn Storage>,
    subject_id: i64,
    class_id: i64,
) -> ActixResult<()> {
    let subject = load_subject(storage, subject_id).await?;
    if subject.class_id != class_id {
        return Err(ApiError::bad_request(
            ErrorCode::BadRequest,
            "Subject does not belong to this class",
        )
        .into());
    }
    Ok(())
}

async fn ensure_free(
    storage: &Arc<dyn Storage>,
    class_id: i64,
    slot: &TimeSlot,
    exclude_id: Option<i64>,
) -> ActixResult<()> {
    let same_day = storage
        .list_schedules(ScheduleFilter {
            class_id: Some(class_id),
            day_of_week: Some(slot.day_of_week),
            ..Default::default()
        })
        .await?;
    if let Some(other) = find_conflict(slot, &same_day, exclude_id) {
        return Err(ApiError::conflict(
            ErrorCode::ScheduleConflict,
            format!(
                "Overlaps schedule {} ({}-{})",
                other.id, other.start_time, other.end_time
            ),
        )
        .into());
    }
    Ok(())
}

pub async fn create_schedule(
    service: &ScheduleService,
    request: &HttpRequest,
    schedule: CreateScheduleRequest,
) -> ActixResult<HttpResponse> {
    let slot = TimeSlot::parse(schedule.day_of_week, &schedule.start_time, &schedule.end_time)
        .map_err(invalid_time)?;

    let storage = service.get_storage(request)?;
    if storage.get_class_by_id(schedule.class_id).await?.is_none() {
        return Err(ApiError::not_found(ErrorCode::ClassNotFound, "Class not found").into());
    }
    ensure_subject_in_class(&storage, schedule.subject_id, schedule.class_id).await?;
    ensure_free(&storage, schedule.class_id, &slot, None).await?;

    let created = storage.create_schedule(schedule).await?;
    invalidate_class_schedule(request, created.class_id).await;

    Ok(HttpResponse::Created().json(ApiResponse::success(
        created,
        "Schedule created successfully",
    )))
}

pub async fn update_schedule(
    service: &ScheduleService,
    request: &HttpRequest,
    schedule_id: i64,
    update: UpdateScheduleRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let current = storage
        .get_schedule_by_id(schedule_id)
        .await?
        .ok_or_else(schedule_not_found)?;

    let slot = TimeSlot::parse(
        update.day_of_week.unwrap_or(current.day_of_week),
        update.start_time.as_deref().unwrap_or(&current.start_time),
        update.end_time.as_deref().unwrap_or(&current.end_time),
    )
    .map_err(invalid_time)?;

    if let Some(subject_id) = update.subject_id
        && subject_id != current.subject_id
    {
        ensure_subject_in_class(&storage, subject_id, current.class_id).await?;
    }
    ensure_free(&storage, current.class_id, &slot, Some(schedule_id)).await?;

    let updated = storage
        .update_schedule(schedule_id, update)
        .await?
        .ok_or_else(schedule_not_found)?;
    invalidate_class_schedule(request, updated.class_id).await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        updated,
        "Schedule updated successfully",
    )))
}

pub async fn delete_schedule(
    service: &ScheduleService,
    request: &HttpRequest,
    schedule_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let current = storage
        .get_schedule_by_id(schedule_id)
        .await?
        .ok_or_else(schedule_not_found)?;

    storage.delete_schedule(schedule_id).await?;
    invalidate_class_schedule(request, current.class_id).await;

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Schedule deleted successfully")))
}
