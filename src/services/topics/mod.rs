use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::ApiError;
use crate::models::{
    ApiResponse, ErrorCode,
    topics::{
        entities::Topic,
        requests::{CreateTopicRequest, UpdateTopicRequest},
        responses::TopicListResponse,
    },
};
use crate::services::access::{
    current_user, ensure_subject_teacher, ensure_subject_visible, load_subject,
};
use crate::storage::Storage;

use super::storage_service;

storage_service! {
    /// Ordered chapters of a subject.
    TopicService
}

pub(crate) async fn load_topic(storage: &Arc<dyn Storage>, topic_id: i64) -> ActixResult<Topic> {
    storage
        .get_topic_by_id(topic_id)
        .await?
        .ok_or_else(|| ApiError::not_found(ErrorCode::TopicNotFound, "Topic not found").into())
}

impl TopicService {
    pub async fn list_topics(
        &self,
        request: &HttpRequest,
        subject_id: i64,
    ) -> ActixResult<HttpResponse> {
        let claims = current_user(request)?;
        let storage = self.get_storage(request)?;

        let subject = load_subject(&storage, subject_id).await?;
        ensure_subject_visible(&storage, claims, &subject).await?;

        let items = storage.list_topics_by_subject(subject_id).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            TopicListResponse { items },
            "Topic list retrieved successfully",
        )))
    }

    pub async fn get_topic(&self, request: &HttpRequest, topic_id: i64) -> ActixResult<HttpResponse> {
        let claims = current_user(request)?;
        let storage = self.get_storage(request)?;

        let topic = load_topic(&storage, topic_id).await?;
        let subject = load_subject(&storage, topic.subject_id).await?;
        ensure_subject_visible(&storage, claims, &subject).await?;

        Ok(HttpResponse::Ok().json(ApiResponse::success(topic, "Topic retrieved successfully")))
    }

    pub async fn create_topic(
        &self,
        request: &HttpRequest,
        mut topic: CreateTopicRequest,
    ) -> ActixResult<HttpResponse> {
        let claims = current_user(request)?;
        topic.title = topic.title.trim().to_string();
        if topic.title.is_empty() {
            return Err(ApiError::bad_request(ErrorCode::BadRequest, "Topic title is required").into());
        }

        let storage = self.get_storage(request)?;
        let subject = load_subject(&storage, topic.subject_id).await?;
        ensure_subject_teacher(claims, &subject)?;

        let created = storage.create_topic(topic).await?;
        Ok(HttpResponse::Created().json(ApiResponse::success(created, "Topic created successfully")))
    }

    pub async fn update_topic(
        &self,
        request: &HttpRequest,
        topic_id: i64,
        update: UpdateTopicRequest,
    ) -> ActixResult<HttpResponse> {
        let claims = current_user(request)?;
        let storage = self.get_storage(request)?;

        let topic = load_topic(&storage, topic_id).await?;
        let subject = load_subject(&storage, topic.subject_id).await?;
        ensure_subject_teacher(claims, &subject)?;

        let updated = storage
            .update_topic(topic_id, update)
            .await?
            .ok_or_else(|| ApiError::not_found(ErrorCode::TopicNotFound, "Topic not found"))?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(updated, "Topic updated successfully")))
    }

    pub async fn delete_topic(
        &self,
        request: &HttpRequest,
        topic_id: i64,
    ) -> ActixResult<HttpResponse> {
        let claims = current_user(request)?;
        let storage = self.get_storage(request)?;

        let topic = load_topic(&storage, topic_id).await?;
        let subject = load_subject(&storage, topic.subject_id).await?;
        ensure_subject_teacher(claims, &subject)?;

        storage.delete_topic(topic_id).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Topic deleted successfully")))
    }
}
