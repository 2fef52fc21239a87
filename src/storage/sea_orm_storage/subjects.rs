use super::SeaOrmStorage;
use crate::entity::subjects::{ActiveModel, Column, Entity as Subjects};
use crate::errors::{Result, SpadaError};
use crate::models::subjects::{
    entities::Subject,
    requests::{CreateSubjectRequest, SubjectListParams, UpdateSubjectRequest},
    responses::SubjectListResponse,
};
use crate::utils::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

impl SeaOrmStorage {
    pub async fn create_subject_impl(&self, req: CreateSubjectRequest) -> Result<Subject> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            class_id: Set(req.class_id),
            teacher_id: Set(req.teacher_id),
            name: Set(req.name),
            code: Set(req.code),
            description: Set(req.description),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            SpadaError::database_operation(format!("Failed to create subject: {e}"))
        })?;

        Ok(result.into_subject())
    }

    pub async fn get_subject_by_id_impl(&self, subject_id: i64) -> Result<Option<Subject>> {
        let result = Subjects::find_by_id(subject_id)
            .one(&self.db)
            .await
            .map_err(|e| SpadaError::database_operation(format!("Failed to query subject: {e}")))?;

        Ok(result.map(|m| m.into_subject()))
    }

    pub async fn list_subjects_with_pagination_impl(
        &self,
        query: SubjectListParams,
    ) -> Result<SubjectListResponse> {
        let (page, size) = query.pagination.normalized();

        let mut select = Subjects::find();

        if let Some(class_id) = query.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }

        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let term = search.trim();
            select = select.filter(
                Condition::any()
                    .add(Column::Name.like(contains_pattern(term)))
                    .add(Column::Code.like(contains_pattern(term))),
            );
        }

        select = select.order_by_asc(Column::ClassId).order_by_asc(Column::Name);

        let (subjects, pagination) = self.fetch_page(select, page, size).await?;

        Ok(SubjectListResponse {
            items: subjects.into_iter().map(|m| m.into_subject()).collect(),
            pagination,
        })
    }

    pub async fn list_subjects_by_class_impl(&self, class_id: i64) -> Result<Vec<Subject>> {
        let subjects = Subjects::find()
            .filter(Column::ClassId.eq(class_id))
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| SpadaError::database_operation(format!("Failed to list subjects: {e}")))?;

        Ok(subjects.into_iter().map(|m| m.into_subject()).collect())
    }

    pub async fn list_subject_ids_by_teacher_impl(&self, teacher_id: i64) -> Result<Vec<i64>> {
        let ids = Subjects::find()
            .select_only()
            .column(Column::Id)
            .filter(Column::TeacherId.eq(teacher_id))
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| SpadaError::database_operation(format!("Failed to list subjects: {e}")))?;

        Ok(ids)
    }

    pub async fn update_subject_impl(
        &self,
        subject_id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>> {
        if self.get_subject_by_id_impl(subject_id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(subject_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(teacher_id) = update.teacher_id {
            model.teacher_id = Set(teacher_id);
        }

        if let Some(name) = update.name {
            model.name = Set(name);
        }

        if let Some(code) = update.code {
            model.code = Set(code);
        }

        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        model.update(&self.db).await.map_err(|e| {
            SpadaError::database_operation(format!("Failed to update subject: {e}"))
        })?;

        self.get_subject_by_id_impl(subject_id).await
    }

    pub async fn delete_subject_impl(&self, subject_id: i64) -> Result<bool> {
        let result = Subjects::delete_by_id(subject_id)
            .exec(&self.db)
            .await
            .map_err(|e| {
                SpadaError::database_operation(format!("Failed to delete subject: {e}"))
            })?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_subjects_impl(&self) -> Result<u64> {
        Ok(Subjects::find().count(&self.db).await?)
    }
}
