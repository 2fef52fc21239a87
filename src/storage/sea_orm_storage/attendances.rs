use super::SeaOrmStorage;
use crate::entity::attendances::{ActiveModel, Column, Entity as Attendances};
use crate::errors::{Result, SpadaError};
use crate::models::{
    PaginationQuery,
    attendance::{
        entities::Attendance,
        requests::{AttendanceEntry, AttendanceFilter, UpdateAttendanceRequest},
        responses::AttendanceListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Select, Set,
    TransactionTrait, sea_query::OnConflict,
};

fn apply_filter(mut select: Select<Attendances>, filter: AttendanceFilter) -> Select<Attendances> {
    if let Some(subject_id) = filter.subject_id {
        select = select.filter(Column::SubjectId.eq(subject_id));
    }
    if let Some(subject_ids) = filter.subject_ids {
        select = select.filter(Column::SubjectId.is_in(subject_ids));
    }
    if let Some(student_id) = filter.student_id {
        select = select.filter(Column::StudentId.eq(student_id));
    }
    if let Some(student_ids) = filter.student_ids {
        select = select.filter(Column::StudentId.is_in(student_ids));
    }
    // ISO dates compare correctly as text.
    if let Some(date_from) = filter.date_from {
        select = select.filter(Column::Date.gte(date_from));
    }
    if let Some(date_to) = filter.date_to {
        select = select.filter(Column::Date.lte(date_to));
    }
    select
}

impl SeaOrmStorage {
    pub async fn record_attendances_impl(
        &self,
        subject_id: i64,
        date: &str,
        entries: Vec<AttendanceEntry>,
        recorded_by: i64,
    ) -> Result<Vec<Attendance>> {
        let now = chrono::Utc::now().timestamp();
        let student_ids: Vec<i64> = entries.iter().map(|e| e.student_id).collect();

        let txn = self.db.begin().await?;

        for entry in entries {
            let model = ActiveModel {
                subject_id: Set(subject_id),
                student_id: Set(entry.student_id),
                date: Set(date.to_string()),
                status: Set(entry.status.to_string()),
                note: Set(entry.note),
                recorded_by: Set(recorded_by),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            };

            Attendances::insert(model)
                .on_conflict(
                    OnConflict::columns([Column::SubjectId, Column::StudentId, Column::Date])
                        .update_columns([
                            Column::Status,
                            Column::Note,
                            Column::RecordedBy,
                            Column::UpdatedAt,
                        ])
                        .to_owned(),
                )
                .exec(&txn)
                .await
                .map_err(|e| {
                    SpadaError::database_operation(format!("Failed to record attendance: {e}"))
                })?;
        }

        txn.commit().await?;

        self.list_attendances_impl(AttendanceFilter {
            subject_id: Some(subject_id),
            student_ids: Some(student_ids),
            date_from: Some(date.to_string()),
            date_to: Some(date.to_string()),
            ..Default::default()
        })
        .await
    }

    pub async fn get_attendance_by_id_impl(&self, attendance_id: i64) -> Result<Option<Attendance>> {
        let result = Attendances::find_by_id(attendance_id)
            .one(&self.db)
            .await
            .map_err(|e| {
                SpadaError::database_operation(format!("Failed to query attendance: {e}"))
            })?;

        Ok(result.map(|m| m.into_attendance()))
    }

    pub async fn list_attendances_with_pagination_impl(
        &self,
        filter: AttendanceFilter,
        pagination: PaginationQuery,
    ) -> Result<AttendanceListResponse> {
        let (page, size) = pagination.normalized();

        let select = apply_filter(Attendances::find(), filter)
            .order_by_desc(Column::Date)
            .order_by_asc(Column::StudentId);

        let (rows, pagination) = self.fetch_page(select, page, size).await?;

        Ok(AttendanceListResponse {
            items: rows.into_iter().map(|m| m.into_attendance()).collect(),
            pagination,
        })
    }

    pub async fn list_attendances_impl(&self, filter: AttendanceFilter) -> Result<Vec<Attendance>> {
        let rows = apply_filter(Attendances::find(), filter)
            .order_by_asc(Column::Date)
            .order_by_asc(Column::StudentId)
            .all(&self.db)
            .await
            .map_err(|e| {
                SpadaError::database_operation(format!("Failed to list attendance: {e}"))
            })?;

        Ok(rows.into_iter().map(|m| m.into_attendance()).collect())
    }

    pub async fn update_attendance_impl(
        &self,
        attendance_id: i64,
        update: UpdateAttendanceRequest,
    ) -> Result<Option<Attendance>> {
        if self.get_attendance_by_id_impl(attendance_id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(attendance_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        if let Some(note) = update.note {
            model.note = Set(note);
        }

        model.update(&self.db).await.map_err(|e| {
            SpadaError::database_operation(format!("Failed to update attendance: {e}"))
        })?;

        self.get_attendance_by_id_impl(attendance_id).await
    }

    pub async fn delete_attendance_impl(&self, attendance_id: i64) -> Result<bool> {
        let result = Attendances::delete_by_id(attendance_id)
            .exec(&self.db)
            .await
            .map_err(|e| {
                SpadaError::database_operation(format!("Failed to delete attendance: {e}"))
            })?;

        Ok(result.rows_affected > 0)
    }
}
