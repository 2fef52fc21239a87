pub mod get;
pub mod list;
pub mod manage;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::subjects::requests::{
    CreateSubjectRequest, SubjectListParams, UpdateSubjectRequest,
};

use super::storage_service;

storage_service! {
    /// Subjects taught in a class; the parent of topics and assignments.
    SubjectService
}

impl SubjectService {
    pub async fn list_subjects(
        &self,
        request: &HttpRequest,
        query: SubjectListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_subjects(self, request, query).await
    }

    pub async fn get_subject(
        &self,
        request: &HttpRequest,
        subject_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_subject(self, request, subject_id).await
    }

    pub async fn create_subject(
        &self,
        request: &HttpRequest,
        subject: CreateSubjectRequest,
    ) -> ActixResult<HttpResponse> {
        manage::create_subject(self, request, subject).await
    }

    pub async fn update_subject(
        &self,
        request: &HttpRequest,
        subject_id: i64,
        update: UpdateSubjectRequest,
    ) -> ActixResult<HttpResponse> {
        manage::update_subject(self, request, subject_id, update).await
    }

    pub async fn delete_subject(
        &self,
        request: &HttpRequest,
        subject_id: i64,
    ) -> ActixResult<HttpResponse> {
        manage::delete_subject(self, request, subject_id).await
    }
}
