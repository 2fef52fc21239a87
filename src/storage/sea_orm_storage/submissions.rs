use super::SeaOrmStorage;
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::errors::{Result, SpadaError};
use crate::models::submissions::{
    entities::{Submission, SubmissionStatus},
    requests::SubmissionListQuery,
    responses::SubmissionListResponse,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    sea_query::OnConflict,
};

impl SeaOrmStorage {
    /// Relies on the unique (assignment_id, student_id) index.
    pub async fn upsert_submission_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
        content: Option<String>,
        attachment: Option<String>,
        status: SubmissionStatus,
    ) -> Result<Submission> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            assignment_id: Set(assignment_id),
            student_id: Set(student_id),
            content: Set(content),
            attachment: Set(attachment),
            status: Set(status.to_string()),
            score: Set(None),
            feedback: Set(None),
            graded_by: Set(None),
            graded_at: Set(None),
            submitted_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        Submissions::insert(model)
            .on_conflict(
                OnConflict::columns([Column::AssignmentId, Column::StudentId])
                    .update_columns([
                        Column::Content,
                        Column::Attachment,
                        Column::Status,
                        Column::Score,
                        Column::Feedback,
                        Column::GradedBy,
                        Column::GradedAt,
                        Column::SubmittedAt,
                        Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| SpadaError::database_operation(format!("Failed to save submission: {e}")))?;

        self.get_submission_by_assignment_and_student_impl(assignment_id, student_id)
            .await?
            .ok_or_else(|| SpadaError::database_operation("Submission vanished after upsert"))
    }

    pub async fn get_submission_by_id_impl(&self, submission_id: i64) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(submission_id)
            .one(&self.db)
            .await
            .map_err(|e| {
                SpadaError::database_operation(format!("Failed to query submission: {e}"))
            })?;

        Ok(result.map(|m| m.into_submission()))
    }

    pub async fn get_submission_by_assignment_and_student_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| {
                SpadaError::database_operation(format!("Failed to query submission: {e}"))
            })?;

        Ok(result.map(|m| m.into_submission()))
    }

    pub async fn list_submissions_with_pagination_impl(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        let mut select = Submissions::find();

        if let Some(assignment_id) = query.assignment_id {
            select = select.filter(Column::AssignmentId.eq(assignment_id));
        }

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.as_str()));
        }

        if let Some(assignment_ids) = query.assignment_ids {
            select = select.filter(Column::AssignmentId.is_in(assignment_ids));
        }

        select = select
            .order_by_desc(Column::SubmittedAt)
            .order_by_desc(Column::Id);

        let (submissions, pagination) = self.fetch_page(select, query.page, query.size).await?;

        Ok(SubmissionListResponse {
            items: submissions
                .into_iter()
                .map(|m| m.into_submission())
                .collect(),
            pagination,
        })
    }

    pub async fn list_graded_submissions_by_assignments_impl(
        &self,
        assignment_ids: &[i64],
    ) -> Result<Vec<Submission>> {
        if assignment_ids.is_empty() {
            return Ok(Vec::new());
        }

        let submissions = Submissions::find()
            .filter(Column::AssignmentId.is_in(assignment_ids.iter().copied()))
            .filter(Column::Status.eq(SubmissionStatus::Graded.as_str()))
            .all(&self.db)
            .await
            .map_err(|e| {
                SpadaError::database_operation(format!("Failed to list submissions: {e}"))
            })?;

        Ok(submissions
            .into_iter()
            .map(|m| m.into_submission())
            .collect())
    }

    pub async fn grade_submission_impl(
        &self,
        submission_id: i64,
        score: f64,
        feedback: Option<String>,
        graded_by: i64,
    ) -> Result<Option<Submission>> {
        if self.get_submission_by_id_impl(submission_id).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();
        let model = ActiveModel {
            id: Set(submission_id),
            status: Set(SubmissionStatus::Graded.to_string()),
            score: Set(Some(score)),
            feedback: Set(feedback),
            graded_by: Set(Some(graded_by)),
            graded_at: Set(Some(now)),
            updated_at: Set(now),
            ..Default::default()
        };

        model.update(&self.db).await.map_err(|e| {
            SpadaError::database_operation(format!("Failed to grade submission: {e}"))
        })?;

        self.get_submission_by_id_impl(submission_id).await
    }

    pub async fn delete_submission_impl(&self, submission_id: i64) -> Result<bool> {
        let result = Submissions::delete_by_id(submission_id)
            .exec(&self.db)
            .await
            .map_err(|e| {
                SpadaError::database_operation(format!("Failed to delete submission: {e}"))
            })?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_submissions_by_status_impl(&self, status: SubmissionStatus) -> Result<u64> {
        Ok(Submissions::find()
            .filter(Column::Status.eq(status.as_str()))
            .count(&self.db)
            .await?)
    }
}
