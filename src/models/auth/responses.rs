use crate::models::users::entities::User;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/auth.ts")]
pub struct LoginResponse {
    pub access_token: String,
    /// Seconds.
    pub expires_in: i64,
    pub user: User,
}
