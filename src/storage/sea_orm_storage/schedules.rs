use super::SeaOrmStorage;
use crate::entity::schedules::{ActiveModel, Column, Entity as Schedules};
use crate::errors::{Result, SpadaError};
use crate::models::schedules::{
    entities::Schedule,
    requests::{CreateScheduleRequest, ScheduleFilter, UpdateScheduleRequest},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn create_schedule_impl(&self, req: CreateScheduleRequest) -> Result<Schedule> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            class_id: Set(req.class_id),
            subject_id: Set(req.subject_id),
            day_of_week: Set(req.day_of_week),
            start_time: Set(req.start_time),
            end_time: Set(req.end_time),
            room: Set(req.room),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            SpadaError::database_operation(format!("Failed to create schedule: {e}"))
        })?;

        Ok(result.into_schedule())
    }

    pub async fn get_schedule_by_id_impl(&self, schedule_id: i64) -> Result<Option<Schedule>> {
        let result = Schedules::find_by_id(schedule_id)
            .one(&self.db)
            .await
            .map_err(|e| {
                SpadaError::database_operation(format!("Failed to query schedule: {e}"))
            })?;

        Ok(result.map(|m| m.into_schedule()))
    }

    /// `HH:MM` strings sort chronologically.
    pub async fn list_schedules_impl(&self, filter: ScheduleFilter) -> Result<Vec<Schedule>> {
        let mut select = Schedules::find();

        if let Some(class_id) = filter.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }

        if let Some(subject_ids) = filter.subject_ids {
            select = select.filter(Column::SubjectId.is_in(subject_ids));
        }

        if let Some(day_of_week) = filter.day_of_week {
            select = select.filter(Column::DayOfWeek.eq(day_of_week));
        }

        let rows = select
            .order_by_asc(Column::DayOfWeek)
            .order_by_asc(Column::StartTime)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                SpadaError::database_operation(format!("Failed to list schedules: {e}"))
            })?;

        Ok(rows.into_iter().map(|m| m.into_schedule()).collect())
    }

    pub async fn update_schedule_impl(
        &self,
        schedule_id: i64,
        update: UpdateScheduleRequest,
    ) -> Result<Option<Schedule>> {
        if self.get_schedule_by_id_impl(schedule_id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(schedule_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(subject_id) = update.subject_id {
            model.subject_id = Set(subject_id);
        }

        if let Some(day_of_week) = update.day_of_week {
            model.day_of_week = Set(day_of_week);
        }

        if let Some(start_time) = update.start_time {
            model.start_time = Set(start_time);
        }

        if let Some(end_time) = update.end_time {
            model.end_time = Set(end_time);
        }

        if let Some(room) = update.room {
            model.room = Set(room);
        }

        model.update(&self.db).await.map_err(|e| {
            SpadaError::database_operation(format!("Failed to update schedule: {e}"))
        })?;

        self.get_schedule_by_id_impl(schedule_id).await
    }

    pub async fn delete_schedule_impl(&self, schedule_id: i64) -> Result<bool> {
        let result = Schedules::delete_by_id(schedule_id)
            .exec(&self.db)
            .await
            .map_err(|e| {
                SpadaError::database_operation(format!("Failed to delete schedule: {e}"))
            })?;

        Ok(result.rows_affected > 0)
    }
}
