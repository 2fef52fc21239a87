pub mod list;
pub mod manage;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use crate::cache::{self, ObjectCache};
use crate::errors::ApiError;
use crate::models::ErrorCode;
use crate::models::schedules::{
    entities::{Schedule, TimeSlot},
    requests::{CreateScheduleRequest, ScheduleListParams, UpdateScheduleRequest},
};

use super::storage_service;

storage_service! {
    /// Weekly class timetables.
    ScheduleService
}

impl ScheduleService {
    pub async fn list_schedules(
        &self,
        request: &HttpRequest,
        query: ScheduleListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_schedules(self, request, query).await
    }

    pub async fn my_schedule(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::my_schedule(self, request).await
    }

    pub async fn create_schedule(
        &self,
        request: &HttpRequest,
        schedule: CreateScheduleRequest,
    ) -> ActixResult<HttpResponse> {
        manage::create_schedule(self, request, schedule).await
    }

    pub async fn update_schedule(
        &self,
        request: &HttpRequest,
        schedule_id: i64,
        update: UpdateScheduleRequest,
    ) -> ActixResult<HttpResponse> {
        manage::update_schedule(self, request, schedule_id, update).await
    }

    pub async fn delete_schedule(
        &self,
        request: &HttpRequest,
        schedule_id: i64,
    ) -> ActixResult<HttpResponse> {
        manage::delete_schedule(self, request, schedule_id).await
    }
}

fn class_cache_key(class_id: i64) -> String {
    format!("schedule:class:{class_id}")
}

/// The object cache, when the app registered one.
fn object_cache(request: &HttpRequest) -> Option<Arc<dyn ObjectCache>> {
    request
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|data| data.get_ref().clone())
}

pub(crate) async fn cached_class_schedule(
    request: &HttpRequest,
    class_id: i64,
) -> Option<Vec<Schedule>> {
    let cache = object_cache(request)?;
    cache::get_json(cache.as_ref(), &class_cache_key(class_id)).await
}

pub(crate) async fn cache_class_schedule(request: &HttpRequest, class_id: i64, items: &[Schedule]) {
    if let Some(cache) = object_cache(request) {
        cache::insert_json(cache.as_ref(), &class_cache_key(class_id), &items, 0).await;
    }
}

pub(crate) async fn invalidate_class_schedule(request: &HttpRequest, class_id: i64) {
    if let Some(cache) = object_cache(request) {
        cache.remove(&class_cache_key(class_id)).await;
    }
}

/// First entry in `existing` that collides with `slot`, ignoring `exclude_id`.
pub(crate) fn find_conflict<'a>(
    slot: &TimeSlot,
    existing: &'a [Schedule],
    exclude_id: Option<i64>,
) -> Option<&'a Schedule> {
    existing
        .iter()
        .filter(|s| Some(s.id) != exclude_id)
        .find(|s| s.slot().is_ok_and(|other| slot.overlaps(&other)))
}

pub(crate) fn invalid_time(message: String) -> ApiError {
    ApiError::bad_request(ErrorCode::ScheduleInvalidTime, message)
}

pub(crate) fn schedule_not_found() -> ApiError {
    ApiError::not_found(ErrorCode::ScheduleNotFound, "Schedule not found")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64, day: i32, start: &str, end: &str) -> Schedule {
        let now = chrono::Utc::now();
        Schedule {
            id,
            class_id: 1,
            subject_id: 1,
            day_of_week: day,
            start_time: start.into(),
            end_time: end.into(),
            room: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_find_conflict() {
        let existing = vec![entry(1, 1, "07:00", "08:30"), entry(2, 1, "10:00", "11:00")];

        let slot = TimeSlot::parse(1, "08:00", "09:00").unwrap();
        assert_eq!(find_conflict(&slot, &existing, None).map(|s| s.id), Some(1));
        // an entry never conflicts with itself
        assert!(find_conflict(&slot, &existing, Some(1)).is_none());

        let free = TimeSlot::parse(1, "08:30", "10:00").unwrap();
        assert!(find_conflict(&free, &existing, None).is_none());
    }
}
