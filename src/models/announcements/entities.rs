use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::users::entities::UserRole;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/announcement.ts")]
pub struct Announcement {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author_id: i64,
    /// `None` is school-wide.
    pub class_id: Option<i64>,
    /// `None` is visible to every role.
    pub target_role: Option<UserRole>,
    pub pinned: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
