use serde::Deserialize;
use ts_rs::TS;

use super::entities::{UserRole, UserStatus};
use crate::models::common::{PaginationQuery, de};

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/user.ts")]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    /// Plain text on the wire; replaced by the hash before it reaches storage.
    pub password: String,
    pub role: UserRole,
    pub display_name: Option<String>,
    pub identity_number: Option<String>,
    pub class_id: Option<i64>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/user.ts")]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
    pub display_name: Option<String>,
    pub identity_number: Option<String>,
    /// `null` removes the student from their class.
    #[serde(default, deserialize_with = "de::double_option")]
    #[ts(optional)]
    pub class_id: Option<Option<i64>>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/user.ts")]
pub struct UserListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
    #[serde(default, deserialize_with = "de::option_from_str")]
    pub class_id: Option<i64>,
    pub search: Option<String>,
}
