use super::SeaOrmStorage;
use crate::entity::files::{ActiveModel, Entity as Files};
use crate::errors::{Result, SpadaError};
use crate::models::files::entities::File;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

impl SeaOrmStorage {
    pub async fn create_file_impl(
        &self,
        download_token: &str,
        original_name: &str,
        stored_name: &str,
        file_size: i64,
        content_type: &str,
        user_id: i64,
    ) -> Result<File> {
        let model = ActiveModel {
            download_token: Set(download_token.to_string()),
            original_name: Set(original_name.to_string()),
            stored_name: Set(stored_name.to_string()),
            file_size: Set(file_size),
            content_type: Set(content_type.to_string()),
            user_id: Set(user_id),
            created_at: Set(chrono::Utc::now().timestamp()),
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            SpadaError::database_operation(format!("Failed to save file record: {e}"))
        })?;

        Ok(result.into_file())
    }

    pub async fn get_file_by_token_impl(&self, download_token: &str) -> Result<Option<File>> {
        let result = Files::find_by_id(download_token.to_string())
            .one(&self.db)
            .await
            .map_err(|e| SpadaError::database_operation(format!("Failed to query file: {e}")))?;

        Ok(result.map(|m| m.into_file()))
    }
}
