use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::{ScheduleService, cache_class_schedule, cached_class_schedule};
use crate::models::{
    ApiResponse,
    schedules::{
        entities::Schedule,
        requests::{ScheduleFilter, ScheduleListParams},
        responses::ScheduleListResponse,
    },
    users::entities::UserRole,
};
use crate::services::access::{current_user, student_class_id};
use crate::storage::Storage;

/// A whole class week, served from the object cache when possible.
async fn class_week(
    storage: &Arc<dyn Storage>,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<Vec<Schedule>> {
    if let Some(items) = cached_class_schedule(request, class_id).await {
        tracing::debug!("Schedule cache hit for class {}", class_id);
        return Ok(items);
    }
    let items = storage
        .list_schedules(ScheduleFilter {
            class_id: Some(class_id),
            ..Default::default()
        })
        .await?;
    cache_class_schedule(request, class_id, &items).await;
    Ok(items)
}

pub async fn list_schedules(
    service: &ScheduleService,
    request: &HttpRequest,
    query: ScheduleListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let items = match query.class_id {
        Some(class_id) => {
            let mut items = class_week(&storage, request, class_id).await?;
            if let Some(day) = query.day_of_week {
                items.retain(|s| s.day_of_week == day);
            }
            items
        }
        None => {
            storage
                .list_schedules(ScheduleFilter {
                    day_of_week: query.day_of_week,
                    ..Default::default()
                })
                .await?
        }
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        ScheduleListResponse { items },
        "Schedules retrieved successfully",
    )))
}

pub async fn my_schedule(service: &ScheduleService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let claims = current_user(request)?;
    let storage = service.get_storage(request)?;

    let items = match claims.role {
        UserRole::Student => match student_class_id(&storage, claims).await? {
            Some(class_id) => class_week(&storage, request, class_id).await?,
            None => Vec::new(),
        },
        UserRole::Teacher => {
            let subject_ids = storage.list_subject_ids_by_teacher(claims.user_id).await?;
            storage
                .list_schedules(ScheduleFilter {
                    subject_ids: Some(subject_ids),
                    ..Default::default()
                })
                .await?
        }
        UserRole::Admin => storage.list_schedules(ScheduleFilter::default()).await?,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        ScheduleListResponse { items },
        "Schedule retrieved successfully",
    )))
}
