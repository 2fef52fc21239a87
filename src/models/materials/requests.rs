use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::de;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/material.ts")]
pub struct CreateMaterialRequest {
    pub topic_id: i64,
    pub title: String,
    pub content: Option<String>,
    pub attachment: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../web/src/types/generated/material.ts")]
pub struct UpdateMaterialRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    #[serde(default, deserialize_with = "de::double_option")]
    #[ts(optional)]
    pub attachment: Option<Option<String>>,
}
