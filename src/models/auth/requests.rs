use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::de;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/auth.ts")]
pub struct LoginRequest {
    /// Username or email.
    pub username: String,
    pub password: String,
}

/// Self-service profile edit. Changing the password requires the current one.
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/auth.ts")]
pub struct UpdateProfileRequest {
    pub display_name: Option<String>,
    #[serde(default, deserialize_with = "de::double_option")]
    #[ts(optional)]
    pub avatar_url: Option<Option<String>>,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}
