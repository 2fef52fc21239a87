use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::{PaginationQuery, de};

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/system.ts")]
pub struct UpdateSettingRequest {
    pub value: String,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/system.ts")]
pub struct SettingAuditParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub key: Option<String>,
    #[serde(default, deserialize_with = "de::option_from_str")]
    pub changed_by: Option<i64>,
}
