use super::SeaOrmStorage;
use crate::entity::materials::{ActiveModel, Column, Entity as Materials};
use crate::errors::{Result, SpadaError};
use crate::models::materials::{
    entities::Material,
    requests::{CreateMaterialRequest, UpdateMaterialRequest},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn create_material_impl(
        &self,
        req: CreateMaterialRequest,
        created_by: i64,
    ) -> Result<Material> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            topic_id: Set(req.topic_id),
            title: Set(req.title),
            content: Set(req.content),
            attachment: Set(req.attachment),
            created_by: Set(created_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            SpadaError::database_operation(format!("Failed to create material: {e}"))
        })?;

        Ok(result.into_material())
    }

    pub async fn get_material_by_id_impl(&self, material_id: i64) -> Result<Option<Material>> {
        let result = Materials::find_by_id(material_id)
            .one(&self.db)
            .await
            .map_err(|e| {
                SpadaError::database_operation(format!("Failed to query material: {e}"))
            })?;

        Ok(result.map(|m| m.into_material()))
    }

    pub async fn list_materials_by_topic_impl(&self, topic_id: i64) -> Result<Vec<Material>> {
        let materials = Materials::find()
            .filter(Column::TopicId.eq(topic_id))
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                SpadaError::database_operation(format!("Failed to list materials: {e}"))
            })?;

        Ok(materials.into_iter().map(|m| m.into_material()).collect())
    }

    pub async fn update_material_impl(
        &self,
        material_id: i64,
        update: UpdateMaterialRequest,
    ) -> Result<Option<Material>> {
        if self.get_material_by_id_impl(material_id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(material_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }

        if let Some(content) = update.content {
            model.content = Set(Some(content));
        }

        if let Some(attachment) = update.attachment {
            model.attachment = Set(attachment);
        }

        model.update(&self.db).await.map_err(|e| {
            SpadaError::database_operation(format!("Failed to update material: {e}"))
        })?;

        self.get_material_by_id_impl(material_id).await
    }

    pub async fn delete_material_impl(&self, material_id: i64) -> Result<bool> {
        let result = Materials::delete_by_id(material_id)
            .exec(&self.db)
            .await
            .map_err(|e| {
                SpadaError::database_operation(format!("Failed to delete material: {e}"))
            })?;

        Ok(result.rows_affected > 0)
    }
}
