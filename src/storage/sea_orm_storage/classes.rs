use super::SeaOrmStorage;
use crate::entity::classes::{ActiveModel, Column, Entity as Classes};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{Result, SpadaError};
use crate::models::classes::{
    entities::Class,
    requests::{ClassListParams, CreateClassRequest, UpdateClassRequest},
    responses::ClassListResponse,
};
use crate::utils::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait, sea_query::Expr,
};

impl SeaOrmStorage {
    pub async fn create_class_impl(&self, req: CreateClassRequest) -> Result<Class> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name),
            grade_level: Set(req.grade_level),
            academic_year: Set(req.academic_year),
            homeroom_teacher_id: Set(req.homeroom_teacher_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SpadaError::database_operation(format!("Failed to create class: {e}")))?;

        Ok(result.into_class())
    }

    pub async fn get_class_by_id_impl(&self, class_id: i64) -> Result<Option<Class>> {
        let result = Classes::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(|e| SpadaError::database_operation(format!("Failed to query class: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    /// A teacher leads at most one class; the lowest id wins if data says otherwise.
    pub async fn get_class_by_homeroom_teacher_impl(&self, teacher_id: i64) -> Result<Option<Class>> {
        let result = Classes::find()
            .filter(Column::HomeroomTeacherId.eq(teacher_id))
            .order_by_asc(Column::Id)
            .one(&self.db)
            .await
            .map_err(|e| SpadaError::database_operation(format!("Failed to query class: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    pub async fn list_classes_with_pagination_impl(
        &self,
        query: ClassListParams,
    ) -> Result<ClassListResponse> {
        let (page, size) = query.pagination.normalized();

        let mut select = Classes::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select = select.filter(Column::Name.like(contains_pattern(search.trim())));
        }

        if let Some(grade_level) = query.grade_level {
            select = select.filter(Column::GradeLevel.eq(grade_level));
        }

        if let Some(ref academic_year) = query.academic_year {
            select = select.filter(Column::AcademicYear.eq(academic_year.as_str()));
        }

        select = select
            .order_by_asc(Column::GradeLevel)
            .order_by_asc(Column::Name);

        let (classes, pagination) = self.fetch_page(select, page, size).await?;

        Ok(ClassListResponse {
            items: classes.into_iter().map(|m| m.into_class()).collect(),
            pagination,
        })
    }

    pub async fn update_class_impl(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>> {
        if self.get_class_by_id_impl(class_id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(class_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }

        if let Some(grade_level) = update.grade_level {
            model.grade_level = Set(grade_level);
        }

        if let Some(academic_year) = update.academic_year {
            model.academic_year = Set(academic_year);
        }

        if let Some(homeroom_teacher_id) = update.homeroom_teacher_id {
            model.homeroom_teacher_id = Set(homeroom_teacher_id);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| SpadaError::database_operation(format!("Failed to update class: {e}")))?;

        self.get_class_by_id_impl(class_id).await
    }

    /// `users.class_id` carries no foreign key, so students are detached here.
    pub async fn delete_class_impl(&self, class_id: i64) -> Result<bool> {
        let txn = self.db.begin().await?;

        Users::update_many()
            .col_expr(UserColumn::ClassId, Expr::value(Option::<i64>::None))
            .filter(UserColumn::ClassId.eq(class_id))
            .exec(&txn)
            .await
            .map_err(|e| {
                SpadaError::database_operation(format!("Failed to detach class members: {e}"))
            })?;

        let result = Classes::delete_by_id(class_id)
            .exec(&txn)
            .await
            .map_err(|e| SpadaError::database_operation(format!("Failed to delete class: {e}")))?;

        txn.commit().await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_classes_impl(&self) -> Result<u64> {
        Ok(Classes::find().count(&self.db).await?)
    }
}
