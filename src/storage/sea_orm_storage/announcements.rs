use super::SeaOrmStorage;
use crate::entity::announcements::{ActiveModel, Column, Entity as Announcements};
use crate::errors::{Result, SpadaError};
use crate::models::announcements::{
    entities::Announcement,
    requests::{
        AnnouncementListParams, AnnouncementVisibility, CreateAnnouncementRequest,
        UpdateAnnouncementRequest,
    },
    responses::AnnouncementListResponse,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn create_announcement_impl(
        &self,
        req: CreateAnnouncementRequest,
        author_id: i64,
    ) -> Result<Announcement> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            title: Set(req.title),
            content: Set(req.content),
            author_id: Set(author_id),
            class_id: Set(req.class_id),
            target_role: Set(req.target_role.map(|r| r.to_string())),
            pinned: Set(req.pinned),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            SpadaError::database_operation(format!("Failed to create announcement: {e}"))
        })?;

        Ok(result.into_announcement())
    }

    pub async fn get_announcement_by_id_impl(
        &self,
        announcement_id: i64,
    ) -> Result<Option<Announcement>> {
        let result = Announcements::find_by_id(announcement_id)
            .one(&self.db)
            .await
            .map_err(|e| {
                SpadaError::database_operation(format!("Failed to query announcement: {e}"))
            })?;

        Ok(result.map(|m| m.into_announcement()))
    }

    /// Pinned first, then newest.
    pub async fn list_announcements_with_pagination_impl(
        &self,
        query: AnnouncementListParams,
        visibility: AnnouncementVisibility,
    ) -> Result<AnnouncementListResponse> {
        let (page, size) = query.pagination.normalized();

        let mut select = Announcements::find();

        if let Some(role) = visibility.role {
            select = select
                .filter(
                    Condition::any()
                        .add(Column::ClassId.is_null())
                        .add(Column::ClassId.is_in(visibility.class_ids)),
                )
                .filter(
                    Condition::any()
                        .add(Column::TargetRole.is_null())
                        .add(Column::TargetRole.eq(role.as_str())),
                );
        }

        if let Some(class_id) = query.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }

        select = select
            .order_by_desc(Column::Pinned)
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        let (rows, pagination) = self.fetch_page(select, page, size).await?;

        Ok(AnnouncementListResponse {
            items: rows.into_iter().map(|m| m.into_announcement()).collect(),
            pagination,
        })
    }

    pub async fn update_announcement_impl(
        &self,
        announcement_id: i64,
        update: UpdateAnnouncementRequest,
    ) -> Result<Option<Announcement>> {
        if self
            .get_announcement_by_id_impl(announcement_id)
            .await?
            .is_none()
        {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(announcement_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }

        if let Some(content) = update.content {
            model.content = Set(content);
        }

        if let Some(class_id) = update.class_id {
            model.class_id = Set(class_id);
        }

        if let Some(target_role) = update.target_role {
            model.target_role = Set(target_role.map(|r| r.to_string()));
        }

        if let Some(pinned) = update.pinned {
            model.pinned = Set(pinned);
        }

        model.update(&self.db).await.map_err(|e| {
            SpadaError::database_operation(format!("Failed to update announcement: {e}"))
        })?;

        self.get_announcement_by_id_impl(announcement_id).await
    }

    pub async fn delete_announcement_impl(&self, announcement_id: i64) -> Result<bool> {
        let result = Announcements::delete_by_id(announcement_id)
            .exec(&self.db)
            .await
            .map_err(|e| {
                SpadaError::database_operation(format!("Failed to delete announcement: {e}"))
            })?;

        Ok(result.rows_affected > 0)
    }
}
