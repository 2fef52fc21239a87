pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::ApiError;
use crate::models::ErrorCode;
use crate::models::classes::requests::{ClassListParams, CreateClassRequest, UpdateClassRequest};
use crate::models::users::entities::UserRole;
use crate::storage::Storage;

use super::storage_service;

storage_service! {
    ClassService
}

impl ClassService {
    pub async fn list_classes(
        &self,
        request: &HttpRequest,
        query: ClassListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_classes(self, request, query).await
    }

    pub async fn create_class(
        &self,
        request: &HttpRequest,
        class_data: CreateClassRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_class(self, request, class_data).await
    }

    pub async fn get_class(&self, request: &HttpRequest, class_id: i64) -> ActixResult<HttpResponse> {
        get::get_class(self, request, class_id).await
    }

    pub async fn list_class_students(
        &self,
        request: &HttpRequest,
        class_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::list_class_students(self, request, class_id).await
    }

    pub async fn update_class(
        &self,
        request: &HttpRequest,
        class_id: i64,
        update_data: UpdateClassRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_class(self, request, class_id, update_data).await
    }

    pub async fn delete_class(
        &self,
        request: &HttpRequest,
        class_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_class(self, request, class_id).await
    }
}

/// A homeroom teacher must be an existing teacher account.
pub(crate) async fn ensure_homeroom_teacher(
    storage: &Arc<dyn Storage>,
    teacher_id: i64,
) -> ActixResult<()> {
    match storage.get_user_by_id(teacher_id).await? {
        Some(user) if user.role == UserRole::Teacher => Ok(()),
        Some(_) => Err(ApiError::bad_request(
            ErrorCode::BadRequest,
            "Homeroom teacher must have the teacher role",
        )
        .into()),
        None => Err(ApiError::not_found(ErrorCode::UserNotFound, "Homeroom teacher not found").into()),
    }
}

pub(crate) fn class_conflict() -> ApiError {
    ApiError::conflict(ErrorCode::ClassAlreadyExists, "Class name already exists")
}
