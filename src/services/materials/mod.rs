use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::ApiError;
use crate::middlewares::AuthClaims;
use crate::models::{
    ApiResponse, ErrorCode,
    materials::{
        entities::Material,
        requests::{CreateMaterialRequest, UpdateMaterialRequest},
        responses::MaterialListResponse,
    },
    subjects::entities::Subject,
};
use crate::services::access::{
    current_user, ensure_attachment, ensure_subject_teacher, ensure_subject_visible, load_subject,
};
use crate::services::topics::load_topic;
use crate::storage::Storage;

use super::storage_service;

storage_service! {
    /// Learning material attached to a topic.
    MaterialService
}

/// Subject that owns `topic_id`, for the access checks.
async fn owning_subject(storage: &Arc<dyn Storage>, topic_id: i64) -> ActixResult<Subject> {
    let topic = load_topic(storage, topic_id).await?;
    load_subject(storage, topic.subject_id).await
}

async fn load_material(
    storage: &Arc<dyn Storage>,
    claims: AuthClaims,
    material_id: i64,
    write: bool,
) -> ActixResult<Material> {
    let material = storage
        .get_material_by_id(material_id)
        .await?
        .ok_or_else(|| ApiError::not_found(ErrorCode::MaterialNotFound, "Material not found"))?;
    let subject = owning_subject(storage, material.topic_id).await?;
    if write {
        ensure_subject_teacher(claims, &subject)?;
    } else {
        ensure_subject_visible(storage, claims, &subject).await?;
    }
    Ok(material)
}

impl MaterialService {
    pub async fn list_materials(
        &self,
        request: &HttpRequest,
        topic_id: i64,
    ) -> ActixResult<HttpResponse> {
        let claims = current_user(request)?;
        let storage = self.get_storage(request)?;

        let subject = owning_subject(&storage, topic_id).await?;
        ensure_subject_visible(&storage, claims, &subject).await?;

        let items = storage.list_materials_by_topic(topic_id).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            MaterialListResponse { items },
            "Material list retrieved successfully",
        )))
    }

    pub async fn get_material(
        &self,
        request: &HttpRequest,
        material_id: i64,
    ) -> ActixResult<HttpResponse> {
        let claims = current_user(request)?;
        let storage = self.get_storage(request)?;
        let material = load_material(&storage, claims, material_id, false).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            material,
            "Material retrieved successfully",
        )))
    }

    pub async fn create_material(
        &self,
        request: &HttpRequest,
        mut material: CreateMaterialRequest,
    ) -> ActixResult<HttpResponse> {
        let claims = current_user(request)?;
        material.title = material.title.trim().to_string();
        if material.title.is_empty() {
            return Err(
                ApiError::bad_request(ErrorCode::BadRequest, "Material title is required").into(),
            );
        }

        let storage = self.get_storage(request)?;
        let subject = owning_subject(&storage, material.topic_id).await?;
        ensure_subject_teacher(claims, &subject)?;
        ensure_attachment(&storage, material.attachment.as_deref()).await?;

        let created = storage.create_material(material, claims.user_id).await?;
        Ok(HttpResponse::Created().json(ApiResponse::success(
            created,
            "Material created successfully",
        )))
    }

    pub async fn update_material(
        &self,
        request: &HttpRequest,
        material_id: i64,
        update: UpdateMaterialRequest,
    ) -> ActixResult<HttpResponse> {
        let claims = current_user(request)?;
        let storage = self.get_storage(request)?;
        load_material(&storage, claims, material_id, true).await?;
        if let Some(attachment) = &update.attachment {
            ensure_attachment(&storage, attachment.as_deref()).await?;
        }

        let updated = storage
            .update_material(material_id, update)
            .await?
            .ok_or_else(|| ApiError::not_found(ErrorCode::MaterialNotFound, "Material not found"))?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            updated,
            "Material updated successfully",
        )))
    }

    pub async fn delete_material(
        &self,
        request: &HttpRequest,
        material_id: i64,
    ) -> ActixResult<HttpResponse> {
        let claims = current_user(request)?;
        let storage = self.get_storage(request)?;
        load_material(&storage, claims, material_id, true).await?;

        storage.delete_material(material_id).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Material deleted successfully")))
    }
}
