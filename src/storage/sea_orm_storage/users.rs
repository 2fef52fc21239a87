use super::SeaOrmStorage;
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{Result, SpadaError};
use crate::models::users::{
    entities::{User, UserRole, UserStatus},
    requests::{CreateUserRequest, UpdateUserRequest, UserListParams},
    responses::UserListResponse,
};
use crate::utils::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            username: Set(req.username),
            email: Set(req.email),
            password_hash: Set(req.password),
            role: Set(req.role.to_string()),
            status: Set(UserStatus::Active.to_string()),
            display_name: Set(req.display_name),
            identity_number: Set(req.identity_number),
            class_id: Set(req.class_id),
            avatar_url: Set(req.avatar_url),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SpadaError::database_operation(format!("Failed to create user: {e}")))?;

        Ok(result.into_user())
    }

    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SpadaError::database_operation(format!("Failed to query user: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    pub async fn get_user_by_username_impl(&self, username: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| SpadaError::database_operation(format!("Failed to query user: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| SpadaError::database_operation(format!("Failed to query user: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    pub async fn get_user_by_username_or_email_impl(
        &self,
        identifier: &str,
    ) -> Result<Option<User>> {
        let result = Users::find()
            .filter(
                Condition::any()
                    .add(Column::Username.eq(identifier))
                    .add(Column::Email.eq(identifier)),
            )
            .one(&self.db)
            .await
            .map_err(|e| SpadaError::database_operation(format!("Failed to query user: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    pub async fn list_users_with_pagination_impl(
        &self,
        query: UserListParams,
    ) -> Result<UserListResponse> {
        let (page, size) = query.pagination.normalized();

        let mut select = Users::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let term = search.trim();
            select = select.filter(
                Condition::any()
                    .add(Column::Username.like(contains_pattern(term)))
                    .add(Column::Email.like(contains_pattern(term)))
                    .add(Column::DisplayName.like(contains_pattern(term)))
                    .add(Column::IdentityNumber.like(contains_pattern(term))),
            );
        }

        if let Some(role) = query.role {
            select = select.filter(Column::Role.eq(role.as_str()));
        }

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.as_str()));
        }

        if let Some(class_id) = query.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }

        select = select.order_by_desc(Column::CreatedAt).order_by_desc(Column::Id);

        let (users, pagination) = self.fetch_page(select, page, size).await?;

        Ok(UserListResponse {
            items: users.into_iter().map(|m| m.into_user()).collect(),
            pagination,
        })
    }

    pub async fn list_students_by_class_impl(&self, class_id: i64) -> Result<Vec<User>> {
        let students = Users::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::Role.eq(UserRole::Student.as_str()))
            .order_by_asc(Column::DisplayName)
            .order_by_asc(Column::Username)
            .all(&self.db)
            .await
            .map_err(|e| SpadaError::database_operation(format!("Failed to list students: {e}")))?;

        Ok(students.into_iter().map(|m| m.into_user()).collect())
    }

    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Users::update_many()
            .col_expr(Column::LastLogin, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                SpadaError::database_operation(format!("Failed to update last login: {e}"))
            })?;

        Ok(result.rows_affected > 0)
    }

    pub async fn update_user_impl(
        &self,
        id: i64,
        update: UpdateUserRequest,
    ) -> Result<Option<User>> {
        if self.get_user_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(email) = update.email {
            model.email = Set(email);
        }

        if let Some(password) = update.password {
            model.password_hash = Set(password);
        }

        if let Some(role) = update.role {
            model.role = Set(role.to_string());
        }

        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        if let Some(display_name) = update.display_name {
            model.display_name = Set(Some(display_name));
        }

        if let Some(identity_number) = update.identity_number {
            model.identity_number = Set(Some(identity_number));
        }

        if let Some(class_id) = update.class_id {
            model.class_id = Set(class_id);
        }

        if let Some(avatar_url) = update.avatar_url {
            // empty clears the avatar
            model.avatar_url = Set(Some(avatar_url).filter(|url| !url.is_empty()));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| SpadaError::database_operation(format!("Failed to update user: {e}")))?;

        self.get_user_by_id_impl(id).await
    }

    pub async fn delete_user_impl(&self, id: i64) -> Result<bool> {
        let result = Users::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SpadaError::database_operation(format!("Failed to delete user: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_users_by_role_impl(&self, role: UserRole) -> Result<u64> {
        let count = Users::find()
            .filter(Column::Role.eq(role.as_str()))
            .count(&self.db)
            .await
            .map_err(|e| SpadaError::database_operation(format!("Failed to count users: {e}")))?;

        Ok(count)
    }
}
