use super::SeaOrmStorage;
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::errors::{Result, SpadaError};
use crate::models::assignments::{
    entities::Assignment,
    requests::{AssignmentListQuery, CreateAssignmentRequest, UpdateAssignmentRequest},
    responses::AssignmentListResponse,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

const DEFAULT_MAX_SCORE: f64 = 100.0;

impl SeaOrmStorage {
    pub async fn create_assignment_impl(
        &self,
        req: CreateAssignmentRequest,
        created_by: i64,
    ) -> Result<Assignment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            subject_id: Set(req.subject_id),
            topic_id: Set(req.topic_id),
            title: Set(req.title),
            description: Set(req.description),
            attachment: Set(req.attachment),
            max_score: Set(req.max_score.unwrap_or(DEFAULT_MAX_SCORE)),
            deadline: Set(req.deadline.map(|d| d.timestamp())),
            allow_late: Set(req.allow_late.unwrap_or(false)),
            created_by: Set(created_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            SpadaError::database_operation(format!("Failed to create assignment: {e}"))
        })?;

        Ok(result.into_assignment())
    }

    pub async fn get_assignment_by_id_impl(&self, assignment_id: i64) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(assignment_id)
            .one(&self.db)
            .await
            .map_err(|e| {
                SpadaError::database_operation(format!("Failed to query assignment: {e}"))
            })?;

        Ok(result.map(|m| m.into_assignment()))
    }

    pub async fn list_assignments_with_pagination_impl(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse> {
        let mut select = Assignments::find();

        if let Some(subject_id) = query.subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }

        if let Some(topic_id) = query.topic_id {
            select = select.filter(Column::TopicId.eq(topic_id));
        }

        if let Some(subject_ids) = query.subject_ids {
            select = select.filter(Column::SubjectId.is_in(subject_ids));
        }

        select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        let (assignments, pagination) = self.fetch_page(select, query.page, query.size).await?;

        Ok(AssignmentListResponse {
            items: assignments
                .into_iter()
                .map(|m| m.into_assignment())
                .collect(),
            pagination,
        })
    }

    pub async fn list_assignments_by_subjects_impl(
        &self,
        subject_ids: &[i64],
    ) -> Result<Vec<Assignment>> {
        if subject_ids.is_empty() {
            return Ok(Vec::new());
        }

        let assignments = Assignments::find()
            .filter(Column::SubjectId.is_in(subject_ids.iter().copied()))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                SpadaError::database_operation(format!("Failed to list assignments: {e}"))
            })?;

        Ok(assignments
            .into_iter()
            .map(|m| m.into_assignment())
            .collect())
    }

    pub async fn update_assignment_impl(
        &self,
        assignment_id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        if self.get_assignment_by_id_impl(assignment_id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(assignment_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(topic_id) = update.topic_id {
            model.topic_id = Set(topic_id);
        }

        if let Some(title) = update.title {
            model.title = Set(title);
        }

        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        if let Some(attachment) = update.attachment {
            model.attachment = Set(attachment);
        }

        if let Some(max_score) = update.max_score {
            model.max_score = Set(max_score);
        }

        if let Some(deadline) = update.deadline {
            model.deadline = Set(deadline.map(|d| d.timestamp()));
        }

        if let Some(allow_late) = update.allow_late {
            model.allow_late = Set(allow_late);
        }

        model.update(&self.db).await.map_err(|e| {
            SpadaError::database_operation(format!("Failed to update assignment: {e}"))
        })?;

        self.get_assignment_by_id_impl(assignment_id).await
    }

    pub async fn delete_assignment_impl(&self, assignment_id: i64) -> Result<bool> {
        let result = Assignments::delete_by_id(assignment_id)
            .exec(&self.db)
            .await
            .map_err(|e| {
                SpadaError::database_operation(format!("Failed to delete assignment: {e}"))
            })?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_assignments_impl(&self) -> Result<u64> {
        Ok(Assignments::find().count(&self.db).await?)
    }
}
