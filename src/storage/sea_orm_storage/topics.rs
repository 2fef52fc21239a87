use super::SeaOrmStorage;
use crate::entity::topics::{ActiveModel, Column, Entity as Topics};
use crate::errors::{Result, SpadaError};
use crate::models::topics::{
    entities::Topic,
    requests::{CreateTopicRequest, UpdateTopicRequest},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn create_topic_impl(&self, req: CreateTopicRequest) -> Result<Topic> {
        let position = match req.position {
            Some(position) => position,
            None => {
                let last = Topics::find()
                    .filter(Column::SubjectId.eq(req.subject_id))
                    .order_by_desc(Column::Position)
                    .one(&self.db)
                    .await?;
                last.map(|t| t.position + 1).unwrap_or(1)
            }
        };

        let now = chrono::Utc::now().timestamp();
        let model = ActiveModel {
            subject_id: Set(req.subject_id),
            title: Set(req.title),
            description: Set(req.description),
            position: Set(position),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SpadaError::database_operation(format!("Failed to create topic: {e}")))?;

        Ok(result.into_topic())
    }

    pub async fn get_topic_by_id_impl(&self, topic_id: i64) -> Result<Option<Topic>> {
        let result = Topics::find_by_id(topic_id)
            .one(&self.db)
            .await
            .map_err(|e| SpadaError::database_operation(format!("Failed to query topic: {e}")))?;

        Ok(result.map(|m| m.into_topic()))
    }

    pub async fn list_topics_by_subject_impl(&self, subject_id: i64) -> Result<Vec<Topic>> {
        let topics = Topics::find()
            .filter(Column::SubjectId.eq(subject_id))
            .order_by_asc(Column::Position)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SpadaError::database_operation(format!("Failed to list topics: {e}")))?;

        Ok(topics.into_iter().map(|m| m.into_topic()).collect())
    }

    pub async fn update_topic_impl(
        &self,
        topic_id: i64,
        update: UpdateTopicRequest,
    ) -> Result<Option<Topic>> {
        if self.get_topic_by_id_impl(topic_id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(topic_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }

        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        if let Some(position) = update.position {
            model.position = Set(position);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| SpadaError::database_operation(format!("Failed to update topic: {e}")))?;

        self.get_topic_by_id_impl(topic_id).await
    }

    pub async fn delete_topic_impl(&self, topic_id: i64) -> Result<bool> {
        let result = Topics::delete_by_id(topic_id)
            .exec(&self.db)
            .await
            .map_err(|e| SpadaError::database_operation(format!("Failed to delete topic: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
