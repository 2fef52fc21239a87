pub mod list;
pub mod manage;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::ApiError;
use crate::models::ErrorCode;
use crate::models::assignments::entities::Assignment;
use crate::models::assignments::requests::{
    AssignmentListParams, CreateAssignmentRequest, UpdateAssignmentRequest,
};
use crate::storage::Storage;

use super::storage_service;

storage_service! {
    AssignmentService
}

impl AssignmentService {
    pub async fn list_assignments(
        &self,
        request: &HttpRequest,
        query: AssignmentListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_assignments(self, request, query).await
    }

    pub async fn get_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::get_assignment(self, request, assignment_id).await
    }

    pub async fn create_assignment(
        &self,
        request: &HttpRequest,
        assignment: CreateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        manage::create_assignment(self, request, assignment).await
    }

    pub async fn update_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
        update: UpdateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        manage::update_assignment(self, request, assignment_id, update).await
    }

    pub async fn delete_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        manage::delete_assignment(self, request, assignment_id).await
    }
}

pub(crate) async fn load_assignment(
    storage: &Arc<dyn Storage>,
    assignment_id: i64,
) -> ActixResult<Assignment> {
    storage
        .get_assignment_by_id(assignment_id)
        .await?
        .ok_or_else(|| {
            ApiError::not_found(ErrorCode::AssignmentNotFound, "Assignment not found").into()
        })
}
