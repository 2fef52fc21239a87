//! School-wide and per-class announcements.
//!
//! Readers only ever see announcements addressed to their role and to the
//! classes they belong to; the same rule guards single reads.

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::ApiError;
use crate::middlewares::AuthClaims;
use crate::models::{
    ApiResponse, ErrorCode,
    announcements::{
        entities::Announcement,
        requests::{
            AnnouncementListParams, AnnouncementVisibility, CreateAnnouncementRequest,
            UpdateAnnouncementRequest,
        },
    },
    users::entities::UserRole,
};
use crate::services::access::{current_user, student_class_id};
use crate::storage::Storage;

use super::storage_service;

storage_service! {
    AnnouncementService
}

fn announcement_not_found() -> ApiError {
    ApiError::not_found(ErrorCode::AnnouncementNotFound, "Announcement not found")
}

/// What the caller is allowed to read.
pub(crate) async fn visibility_for(
    storage: &Arc<dyn Storage>,
    claims: AuthClaims,
) -> ActixResult<AnnouncementVisibility> {
    let class_ids = match claims.role {
        UserRole::Admin => {
            return Ok(AnnouncementVisibility {
                role: None,
                class_ids: Vec::new(),
            });
        }
        UserRole::Student => student_class_id(storage, claims).await?.into_iter().collect(),
        UserRole::Teacher => {
            let mut ids: Vec<i64> = Vec::new();
            for subject_id in storage.list_subject_ids_by_teacher(claims.user_id).await? {
                if let Some(subject) = storage.get_subject_by_id(subject_id).await? {
                    ids.push(subject.class_id);
                }
            }
            if let Some(class) = storage.get_class_by_homeroom_teacher(claims.user_id).await? {
                ids.push(class.id);
            }
            ids.sort_unstable();
            ids.dedup();
            ids
        }
    };
    Ok(AnnouncementVisibility {
        role: Some(claims.role),
        class_ids,
    })
}

/// Same predicate the storage layer applies when listing.
pub(crate) fn is_visible(announcement: &Announcement, visibility: &AnnouncementVisibility) -> bool {
    let Some(role) = visibility.role else {
        return true;
    };
    let role_ok = announcement.target_role.is_none_or(|target| target == role);
    let class_ok = announcement
        .class_id
        .is_none_or(|class_id| visibility.class_ids.contains(&class_id));
    role_ok && class_ok
}

fn validate_text(title: Option<&str>, content: Option<&str>) -> Result<(), ApiError> {
    if title.is_some_and(|t| t.trim().is_empty()) {
        return Err(ApiError::bad_request(ErrorCode::BadRequest, "Title must not be empty"));
    }
    if content.is_some_and(|c| c.trim().is_empty()) {
        return Err(ApiError::bad_request(ErrorCode::BadRequest, "Content must not be empty"));
    }
    Ok(())
}

impl AnnouncementService {
    pub async fn list_announcements(
        &self,
        request: &HttpRequest,
        mut query: AnnouncementListParams,
    ) -> ActixResult<HttpResponse> {
        let claims = current_user(request)?;
        let storage = self.get_storage(request)?;
        if claims.role != UserRole::Admin {
            query.class_id = None;
        }
        let visibility = visibility_for(&storage, claims).await?;

        let page = storage
            .list_announcements_with_pagination(query, visibility)
            .await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            page,
            "Announcements retrieved successfully",
        )))
    }

    pub async fn get_announcement(
        &self,
        request: &HttpRequest,
        announcement_id: i64,
    ) -> ActixResult<HttpResponse> {
        let claims = current_user(request)?;
        let storage = self.get_storage(request)?;

        let announcement = storage
            .get_announcement_by_id(announcement_id)
            .await?
            .ok_or_else(announcement_not_found)?;
        // hidden announcements are indistinguishable from missing ones
        if !is_visible(&announcement, &visibility_for(&storage, claims).await?) {
            return Err(announcement_not_found().into());
        }
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            announcement,
            "Announcement retrieved successfully",
        )))
    }

    pub async fn create_announcement(
        &self,
        request: &HttpRequest,
        mut announcement: CreateAnnouncementRequest,
    ) -> ActixResult<HttpResponse> {
        let claims = current_user(request)?;
        validate_text(Some(&announcement.title), Some(&announcement.content))?;
        announcement.title = announcement.title.trim().to_string();

        let storage = self.get_storage(request)?;
        if let Some(class_id) = announcement.class_id
            && storage.get_class_by_id(class_id).await?.is_none()
        {
            return Err(ApiError::not_found(ErrorCode::ClassNotFound, "Class not found").into());
        }

        let created = storage
            .create_announcement(announcement, claims.user_id)
            .await?;
        tracing::info!("Announcement {} posted by user {}", created.id, claims.user_id);
        Ok(HttpResponse::Created().json(ApiResponse::success(
            created,
            "Announcement created successfully",
        )))
    }

    pub async fn update_announcement(
        &self,
        request: &HttpRequest,
        announcement_id: i64,
        update: UpdateAnnouncementRequest,
    ) -> ActixResult<HttpResponse> {
        let claims = current_user(request)?;
        validate_text(update.title.as_deref(), update.content.as_deref())?;
        let storage = self.get_storage(request)?;
        self.load_own(&storage, claims, announcement_id).await?;

        if let Some(Some(class_id)) = update.class_id
            && storage.get_class_by_id(class_id).await?.is_none()
        {
            return Err(ApiError::not_found(ErrorCode::ClassNotFound, "Class not found").into());
        }

        let updated = storage
            .update_announcement(announcement_id, update)
            .await?
            .ok_or_else(announcement_not_found)?;
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            updated,
            "Announcement updated successfully",
        )))
    }

    pub async fn delete_announcement(
        &self,
        request: &HttpRequest,
        announcement_id: i64,
    ) -> ActixResult<HttpResponse> {
        let claims = current_user(request)?;
        let storage = self.get_storage(request)?;
        self.load_own(&storage, claims, announcement_id).await?;

        storage.delete_announcement(announcement_id).await?;
        Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Announcement deleted successfully",
        )))
    }

    /// Authors edit their own posts; admins edit any.
    async fn load_own(
        &self,
        storage: &Arc<dyn Storage>,
        claims: AuthClaims,
        announcement_id: i64,
    ) -> ActixResult<Announcement> {
        let announcement = storage
            .get_announcement_by_id(announcement_id)
            .await?
            .ok_or_else(announcement_not_found)?;
        if claims.role != UserRole::Admin && announcement.author_id != claims.user_id {
            return Err(ApiError::forbidden(
                ErrorCode::Forbidden,
                "Only the author can modify this announcement",
            )
            .into());
        }
        Ok(announcement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn announcement(class_id: Option<i64>, target_role: Option<UserRole>) -> Announcement {
        let now = chrono::Utc::now();
        Announcement {
            id: 1,
            title: "Ujian".into(),
            content: "Ujian tengah semester dimulai Senin".into(),
            author_id: 2,
            class_id,
            target_role,
            pinned: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_visibility_predicate() {
        let student = AnnouncementVisibility {
            role: Some(UserRole::Student),
            class_ids: vec![3],
        };
        assert!(is_visible(&announcement(None, None), &student));
        assert!(is_visible(&announcement(Some(3), Some(UserRole::Student)), &student));
        assert!(!is_visible(&announcement(Some(4), None), &student));
        assert!(!is_visible(&announcement(None, Some(UserRole::Teacher)), &student));

        let admin = AnnouncementVisibility {
            role: None,
            class_ids: vec![],
        };
        assert!(is_visible(&announcement(Some(4), Some(UserRole::Teacher)), &admin));
    }
}
