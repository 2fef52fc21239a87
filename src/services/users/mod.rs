pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::users::requests::{CreateUserRequest, UpdateUserRequest, UserListParams};

use super::storage_service;

storage_service! {
    /// Account administration.
    UserService
}

impl UserService {
    pub async fn list_users(
        &self,
        request: &HttpRequest,
        query: UserListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_users(self, request, query).await
    }

    pub async fn get_user(&self, request: &HttpRequest, user_id: i64) -> ActixResult<HttpResponse> {
        get::get_user(self, request, user_id).await
    }

    pub async fn create_user(
        &self,
        request: &HttpRequest,
        user_data: CreateUserRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_user(self, request, user_data).await
    }

    pub async fn update_user(
        &self,
        request: &HttpRequest,
        user_id: i64,
        update_data: UpdateUserRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_user(self, request, user_id, update_data).await
    }

    pub async fn delete_user(&self, request: &HttpRequest, user_id: i64) -> ActixResult<HttpResponse> {
        delete::delete_user(self, request, user_id).await
    }
}

/// Student accounts must point at an existing class.
pub(crate) async fn ensure_class_exists(
    storage: &std::sync::Arc<dyn crate::storage::Storage>,
    class_id: Option<i64>,
) -> ActixResult<()> {
    if let Some(class_id) = class_id
        && storage.get_class_by_id(class_id).await?.is_none()
    {
        return Err(crate::errors::ApiError::not_found(
            crate::models::ErrorCode::ClassNotFound,
            format!("Class {class_id} not found"),
        )
        .into());
    }
    Ok(())
}
