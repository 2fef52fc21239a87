use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::{PaginationQuery, de};
use crate::models::users::entities::UserRole;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/announcement.ts")]
pub struct CreateAnnouncementRequest {
    pub title: String,
    pub content: String,
    pub class_id: Option<i64>,
    pub target_role: Option<UserRole>,
    #[serde(default)]
    pub pinned: bool,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/announcement.ts")]
pub struct UpdateAnnouncementRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    #[serde(default, deserialize_with = "de::double_option")]
    #[ts(optional)]
    pub class_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "de::double_option")]
    #[ts(optional)]
    pub target_role: Option<Option<UserRole>>,
    pub pinned: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/announcement.ts")]
pub struct AnnouncementListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    /// Admins only: restrict to one class.
    #[serde(default, deserialize_with = "de::option_from_str")]
    pub class_id: Option<i64>,
}

/// Who is asking, for visibility filtering in storage.
#[derive(Debug, Clone)]
pub struct AnnouncementVisibility {
    /// `None` means no filtering (admins).
    pub role: Option<UserRole>,
    /// Classes whose announcements the viewer sees besides school-wide ones.
    pub class_ids: Vec<i64>,
}
